use thiserror::Error;

/// Errors raised while talking to the remote chat gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode gateway response: {0}")]
    Decode(String),

    #[error("transport method '{method}' is not supported for {call}")]
    Unsupported { method: String, call: String },

    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Whether the gateway reported the addressed resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Status { status: 404, .. })
    }
}

/// Errors surfaced by the session manager to its callers.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("session '{0}' not found")]
    NotFound(String),

    #[error("remote gateway unavailable: {0}")]
    RemoteUnavailable(GatewayError),

    #[error("unsupported transport operation: {0}")]
    Unsupported(String),
}

impl From<GatewayError> for ChatError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unsupported { .. } => ChatError::Unsupported(err.to_string()),
            other => ChatError::RemoteUnavailable(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_status_display() {
        let err = GatewayError::Status {
            status: 503,
            body: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "gateway returned HTTP 503: busy");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_status() {
        let err = GatewayError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unsupported_maps_to_unsupported() {
        let err: ChatError = GatewayError::Unsupported {
            method: "delete".to_string(),
            call: "typed fetch".to_string(),
        }
        .into();
        assert!(matches!(err, ChatError::Unsupported(_)));
    }

    #[test]
    fn test_network_maps_to_remote_unavailable() {
        let err: ChatError = GatewayError::Network("connection refused".to_string()).into();
        assert!(matches!(err, ChatError::RemoteUnavailable(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
