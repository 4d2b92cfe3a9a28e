//! HttpChatGateway -- concrete [`ChatGateway`] implementation over HTTP.
//!
//! Every call is addressed through a [`GatewayRoute`]: the route supplies the
//! transport method, the raw path segments and the optional query parameter,
//! and this adapter turns them into a `reqwest` request against
//! `{api_url}{api_route_prefix}/...`. Segments and query values are
//! percent-encoded by `Url`.
//!
//! Bodies are JSON. Response decoding ignores unknown fields.

use std::time::Instant;

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use chatsync_core::gateway::port::ChatGateway;
use chatsync_core::gateway::route::{GatewayMethod, GatewayRoute, RatingUpdate, Scope};
use chatsync_types::chat::{DebugLog, Message, Session};
use chatsync_types::config::{ClientConfig, MIN_REQUEST_TIMEOUT_SECS};
use chatsync_types::directory::DirectoryUser;
use chatsync_types::error::GatewayError;

/// HTTP adapter for the remote chat gateway.
///
/// Holds no session state: it only translates routes into requests and
/// responses into domain types.
#[derive(Debug, Clone)]
pub struct HttpChatGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpChatGateway {
    const USER_AGENT: &'static str = concat!("chatsync/", env!("CARGO_PKG_VERSION"));

    /// Create a gateway client from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        if config.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS {
            warn!(
                configured = config.request_timeout_secs,
                effective = MIN_REQUEST_TIMEOUT_SECS,
                "Request timeout too short, raising it"
            );
        }
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(Self::USER_AGENT)
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to build HTTP client: {e}")))?;

        let base_url = Self::parse_base_url(&config.api_url, &config.api_route_prefix)?;
        debug!(base_url = %base_url, "Gateway client ready");

        Ok(Self { client, base_url })
    }

    /// Base URL every route is appended to (API URL plus route prefix).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn parse_base_url(api_url: &str, route_prefix: &str) -> Result<Url, GatewayError> {
        let mut url = Url::parse(api_url.trim())
            .map_err(|e| GatewayError::InvalidUrl(format!("'{api_url}': {e}")))?;

        if url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(format!(
                "'{api_url}' cannot carry a path"
            )));
        }

        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(route_prefix.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    /// Full request URL for a route.
    pub fn url_for(&self, route: &GatewayRoute<'_>, scope: &Scope) -> Url {
        let mut url = self.base_url.clone();
        // The base was checked to carry a path in `parse_base_url`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(route.segments(scope));
        }
        if let Some((key, value)) = route.query() {
            url.query_pairs_mut().append_pair(key, &value);
        }
        url
    }

    /// Issue a request and decode the response body as `T`.
    ///
    /// Supports `Read` (GET) and `Invoke` (POST, with an optional JSON body).
    /// `Delete` carries no content to decode and is rejected as unsupported.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        route: GatewayRoute<'_>,
        scope: &Scope,
        body: Option<&str>,
    ) -> Result<T, GatewayError> {
        let text = self.fetch_text(route, scope, body).await?;
        serde_json::from_str(&text)
            .map_err(|e| GatewayError::Decode(format!("{}: {e}", route.name())))
    }

    /// Issue a fire-and-forget request; any response body is discarded.
    ///
    /// Supports `Delete` (DELETE) and `Invoke` (POST). `Read` without a
    /// decoded result is rejected as unsupported.
    pub async fn send_empty(
        &self,
        route: GatewayRoute<'_>,
        scope: &Scope,
    ) -> Result<(), GatewayError> {
        let url = self.url_for(&route, scope);
        let request = match route.method() {
            GatewayMethod::Delete => self.client.delete(url),
            GatewayMethod::Invoke => self.client.post(url),
            GatewayMethod::Read => return Err(Self::unsupported(&route, "no-content send")),
        };
        self.execute(&route, request).await?;
        Ok(())
    }

    async fn fetch_text(
        &self,
        route: GatewayRoute<'_>,
        scope: &Scope,
        body: Option<&str>,
    ) -> Result<String, GatewayError> {
        let url = self.url_for(&route, scope);
        let request = match route.method() {
            GatewayMethod::Read => self.client.get(url),
            GatewayMethod::Invoke => match body {
                Some(body) => self.client.post(url).json(body),
                None => self.client.post(url),
            },
            GatewayMethod::Delete => return Err(Self::unsupported(&route, "typed fetch")),
        };

        let response = self.execute(&route, request).await?;
        response
            .text()
            .await
            .map_err(|e| GatewayError::Network(format!("{}: failed to read body: {e}", route.name())))
    }

    async fn execute(
        &self,
        route: &GatewayRoute<'_>,
        request: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(format!("{} request failed: {e}", route.name())))?;

        let status = response.status();
        debug!(
            route = route.name(),
            method = %route.method(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Gateway responded"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn unsupported(route: &GatewayRoute<'_>, call: &str) -> GatewayError {
        error!(
            route = route.name(),
            method = %route.method(),
            call,
            "Transport method not supported for this call"
        );
        GatewayError::Unsupported {
            method: route.method().to_string(),
            call: call.to_string(),
        }
    }
}

/// Decode a summarize-name response.
///
/// The gateway answers with a JSON string; a bare text body is accepted too.
fn decode_name(body: &str) -> String {
    match serde_json::from_str::<String>(body) {
        Ok(name) => name,
        Err(_) => body.trim().to_string(),
    }
}

impl ChatGateway for HttpChatGateway {
    async fn list_sessions(&self, scope: &Scope) -> Result<Vec<Session>, GatewayError> {
        self.fetch_json(GatewayRoute::ListSessions, scope, None).await
    }

    async fn create_session(&self, scope: &Scope) -> Result<Session, GatewayError> {
        self.fetch_json(GatewayRoute::CreateSession, scope, None).await
    }

    async fn list_messages(
        &self,
        scope: &Scope,
        session_id: &str,
    ) -> Result<Vec<Message>, GatewayError> {
        self.fetch_json(GatewayRoute::ListMessages { session_id }, scope, None)
            .await
    }

    async fn rename_session(
        &self,
        scope: &Scope,
        session_id: &str,
        new_name: &str,
    ) -> Result<(), GatewayError> {
        self.send_empty(GatewayRoute::RenameSession { session_id, new_name }, scope)
            .await
    }

    async fn delete_session(&self, scope: &Scope, session_id: &str) -> Result<(), GatewayError> {
        self.send_empty(GatewayRoute::DeleteSession { session_id }, scope)
            .await
    }

    async fn complete(
        &self,
        scope: &Scope,
        session_id: &str,
        prompt: &str,
    ) -> Result<Vec<Message>, GatewayError> {
        self.fetch_json(GatewayRoute::Completion { session_id }, scope, Some(prompt))
            .await
    }

    async fn summarize_name(
        &self,
        scope: &Scope,
        session_id: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        let body = self
            .fetch_text(GatewayRoute::SummarizeName { session_id }, scope, Some(prompt))
            .await?;
        Ok(decode_name(&body))
    }

    async fn rate_message(
        &self,
        scope: &Scope,
        session_id: &str,
        message_id: &str,
        rating: RatingUpdate,
    ) -> Result<Message, GatewayError> {
        let route = GatewayRoute::RateMessage {
            session_id,
            message_id,
            rating,
        };
        self.fetch_json(route, scope, None).await
    }

    async fn get_debug_log(
        &self,
        scope: &Scope,
        session_id: &str,
        debug_log_id: &str,
    ) -> Result<DebugLog, GatewayError> {
        let route = GatewayRoute::DebugLog {
            session_id,
            debug_log_id,
        };
        self.fetch_json(route, scope, None).await
    }

    async fn list_tenants(&self) -> Result<Vec<String>, GatewayError> {
        self.fetch_json(GatewayRoute::Tenants, &Scope::new("", ""), None)
            .await
    }

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, GatewayError> {
        self.fetch_json(GatewayRoute::Users, &Scope::new("", ""), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatsync_types::chat::Rating;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn gateway(api_url: &str, prefix: &str) -> HttpChatGateway {
        let config = ClientConfig {
            api_url: api_url.to_string(),
            api_route_prefix: prefix.to_string(),
            request_timeout_secs: 5,
            ..ClientConfig::default()
        };
        HttpChatGateway::new(&config).unwrap()
    }

    fn scope() -> Scope {
        Scope::new("T1", "U1")
    }

    /// Serve exactly one HTTP response on a local port.
    ///
    /// Returns the base URL and a handle resolving to the raw request text.
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    // --- URL building ---

    #[test]
    fn test_url_for_session_routes() {
        let gw = gateway("http://localhost:8000", "");
        let url = gw.url_for(&GatewayRoute::ListSessions, &scope());
        assert_eq!(url.as_str(), "http://localhost:8000/tenant/T1/user/U1/sessions");
    }

    #[test]
    fn test_url_for_applies_route_prefix() {
        let gw = gateway("http://localhost:8000/", "/api/v1/");
        let url = gw.url_for(&GatewayRoute::Completion { session_id: "s1" }, &scope());
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/tenant/T1/user/U1/sessions/s1/completion"
        );
    }

    #[test]
    fn test_url_for_encodes_segments_and_query() {
        let gw = gateway("http://localhost:8000", "");
        let url = gw.url_for(
            &GatewayRoute::RenameSession {
                session_id: "a/b",
                new_name: "Q&A time",
            },
            &scope(),
        );
        assert_eq!(url.path(), "/tenant/T1/user/U1/sessions/a%2Fb/rename");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("newChatSessionName".to_string(), "Q&A time".to_string())]
        );
    }

    #[test]
    fn test_url_for_rating_shapes() {
        let gw = gateway("http://localhost:8000", "");
        let unset = gw.url_for(
            &GatewayRoute::RateMessage {
                session_id: "s1",
                message_id: "m1",
                rating: Rating::Unset.into(),
            },
            &scope(),
        );
        assert_eq!(unset.query(), None);

        let negative = gw.url_for(
            &GatewayRoute::RateMessage {
                session_id: "s1",
                message_id: "m1",
                rating: Rating::Negative.into(),
            },
            &scope(),
        );
        assert_eq!(negative.query(), Some("rating=false"));
    }

    #[test]
    fn test_invalid_api_url_is_rejected() {
        let config = ClientConfig {
            api_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpChatGateway::new(&config),
            Err(GatewayError::InvalidUrl(_))
        ));

        let config = ClientConfig {
            api_url: "mailto:someone@example.com".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpChatGateway::new(&config),
            Err(GatewayError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_decode_name_accepts_json_or_text() {
        assert_eq!(decode_name("\"Tax questions\""), "Tax questions");
        assert_eq!(decode_name("Tax questions\n"), "Tax questions");
    }

    // --- Method dispatch ---

    #[tokio::test]
    async fn test_typed_fetch_rejects_delete() {
        let gw = gateway("http://127.0.0.1:9", "");
        let result: Result<Session, GatewayError> = gw
            .fetch_json(GatewayRoute::DeleteSession { session_id: "s1" }, &scope(), None)
            .await;
        assert!(matches!(result, Err(GatewayError::Unsupported { .. })));
    }

    #[tokio::test]
    async fn test_no_content_send_rejects_read() {
        let gw = gateway("http://127.0.0.1:9", "");
        let result = gw.send_empty(GatewayRoute::ListSessions, &scope()).await;
        assert!(matches!(result, Err(GatewayError::Unsupported { .. })));
    }

    // --- Against a local server ---

    #[tokio::test]
    async fn test_list_sessions_decodes_response() {
        let body = r#"[{"id":"x","sessionId":"s1","name":"Chat 1","tenantId":"T1","userId":"U1","extra":1}]"#;
        let (base, request) = serve_once("200 OK", body).await;

        let sessions = gateway(&base, "").list_sessions(&scope()).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].session_id, "s1");

        let request = request.await.unwrap();
        assert!(request.starts_with("GET /tenant/T1/user/U1/sessions HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_zero_timeout_still_reaches_gateway() {
        let body = r#"[{"id":"s1","name":"Chat 1"}]"#;
        let (base, _request) = serve_once("200 OK", body).await;
        let config = ClientConfig {
            api_url: base,
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };

        let sessions = HttpChatGateway::new(&config)
            .unwrap()
            .list_sessions(&scope())
            .await
            .unwrap();
        assert_eq!(sessions[0].session_id, "s1");
    }

    #[tokio::test]
    async fn test_complete_posts_prompt_as_json() {
        let body = r#"[{"id":"m2","sessionId":"s2","senderRole":"Assistant","text":"Hi there"}]"#;
        let (base, request) = serve_once("200 OK", body).await;

        let messages = gateway(&base, "")
            .complete(&scope(), "s2", "Hello")
            .await
            .unwrap();
        assert_eq!(messages[0].text, "Hi there");

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /tenant/T1/user/U1/sessions/s2/completion HTTP/1.1"));
        assert!(request.ends_with("\"Hello\""));
    }

    #[tokio::test]
    async fn test_delete_sends_delete() {
        let (base, request) = serve_once("204 No Content", "").await;

        gateway(&base, "")
            .delete_session(&scope(), "s1")
            .await
            .unwrap();

        let request = request.await.unwrap();
        assert!(request.starts_with("DELETE /tenant/T1/user/U1/sessions/s1 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, _request) = serve_once("404 Not Found", "\"no such session\"").await;

        let err = gateway(&base, "")
            .list_messages(&scope(), "gone")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base, _request) = serve_once("200 OK", "{not json").await;

        let err = gateway(&base, "").create_session(&scope()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = gateway(&format!("http://{addr}"), "")
            .list_sessions(&scope())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
