//! Tenant and user directory records.
//!
//! The gateway publishes the known tenants and users so a front end can offer
//! a login picker. The client only reads them.

use serde::{Deserialize, Serialize};

/// A user known to the gateway directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tenant_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_user_decode() {
        let json = r#"{"id": "Mark", "name": "Mark Brown", "tenantId": "T1"}"#;
        let user: DirectoryUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.tenant_id, "T1");
        assert_eq!(user.name, "Mark Brown");
    }
}
