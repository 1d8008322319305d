//! HTTP transport for the DataSync backend
//!
//! Single point of outbound communication. Attaches the bearer token, builds
//! percent-encoded endpoint URLs, and classifies responses into the error
//! taxonomy so the per-resource modules stay free of HTTP details.

use crate::config::Settings;
use crate::error::{ApiError, ApiResult};
use crate::session::TokenStore;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Typed client for the backend REST API.
///
/// Stateless between calls: the bearer token is read from the injected
/// [`TokenStore`] on every request, never cached, so a login or logout takes
/// effect on the next call.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client against the configured backend.
    pub fn new(settings: &Settings, session: Arc<dyn TokenStore>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            session,
        })
    }

    /// The session store this client reads its token from.
    pub fn session(&self) -> &Arc<dyn TokenStore> {
        &self.session
    }

    /// Build an endpoint URL from path segments.
    ///
    /// Each segment is percent-encoded individually, so database names with
    /// spaces or slashes stay a single segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL validated at configuration load")
            .pop_if_empty()
            .extend(segments);
        url
    }

    /// Start a request with the bearer token attached when one is stored.
    ///
    /// A missing token is not an error here; the backend answers 401 and that
    /// is surfaced as [`ApiError::Auth`] by response classification.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        let builder = self.http.request(method, url);
        match self.session.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and collect status + body without classifying.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> ApiResult<(StatusCode, Vec<u8>)> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok((status, body))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let (status, body) = self.execute(self.request(Method::GET, segments)).await?;
        check_status(status, &body)?;
        decode(&body)
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        payload: &B,
    ) -> ApiResult<T> {
        let builder = self.request(Method::POST, segments).json(payload);
        let (status, body) = self.execute(builder).await?;
        check_status(status, &body)?;
        decode(&body)
    }

    /// POST with a JSON payload, ignoring the response body.
    pub(crate) async fn post_unit<B: Serialize>(
        &self,
        segments: &[&str],
        payload: &B,
    ) -> ApiResult<()> {
        let builder = self.request(Method::POST, segments).json(payload);
        let (status, body) = self.execute(builder).await?;
        check_status(status, &body)
    }

    /// POST with an empty body, decoding the response.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let (status, body) = self.execute(self.request(Method::POST, segments)).await?;
        check_status(status, &body)?;
        decode(&body)
    }

    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        payload: &B,
    ) -> ApiResult<T> {
        let builder = self.request(Method::PUT, segments).json(payload);
        let (status, body) = self.execute(builder).await?;
        check_status(status, &body)?;
        decode(&body)
    }

    pub(crate) async fn put_unit<B: Serialize>(
        &self,
        segments: &[&str],
        payload: &B,
    ) -> ApiResult<()> {
        let builder = self.request(Method::PUT, segments).json(payload);
        let (status, body) = self.execute(builder).await?;
        check_status(status, &body)
    }

    pub(crate) async fn delete_unit(&self, segments: &[&str]) -> ApiResult<()> {
        let (status, body) = self.execute(self.request(Method::DELETE, segments)).await?;
        check_status(status, &body)
    }
}

/// Classify a response status.
///
/// 2xx passes; 401/403 become [`ApiError::Auth`] so callers can send the
/// operator to login; everything else is a [`ApiError::RequestFailed`]
/// carrying the backend message when one is present.
pub(crate) fn check_status(status: StatusCode, body: &[u8]) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }

    let message = backend_message(body);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Auth(
            message.unwrap_or_else(|| "authentication required".to_string()),
        ));
    }

    Err(ApiError::RequestFailed {
        status: Some(status.as_u16()),
        message: message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        }),
    })
}

/// Pull a human-readable message out of an error body.
///
/// The backend answers with `{"message": ...}` or `{"error": ...}` depending
/// on the endpoint; plain-text bodies are used as-is.
pub(crate) fn backend_message(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }
        return None;
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use pretty_assertions::assert_eq;

    fn test_client() -> ApiClient {
        let settings = Settings::default();
        ApiClient::new(&settings, Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = test_client();
        let url = client.endpoint(&["sync", "databases"]);
        assert_eq!(url.as_str(), "http://localhost:8080/sync/databases");
    }

    #[test]
    fn test_endpoint_percent_encodes_database_names() {
        let client = test_client();

        let url = client.endpoint(&["sync", "tables", "test db/2"]);
        assert_eq!(url.as_str(), "http://localhost:8080/sync/tables/test%20db%2F2");

        let url = client.endpoint(&["sync", "backup", "test db/2", "logs"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/sync/backup/test%20db%2F2/logs"
        );
    }

    #[test]
    fn test_check_status_passes_success() {
        assert!(check_status(StatusCode::OK, b"").is_ok());
        assert!(check_status(StatusCode::CREATED, b"{}").is_ok());
    }

    #[test]
    fn test_check_status_distinguishes_auth() {
        let err = check_status(StatusCode::UNAUTHORIZED, b"").unwrap_err();
        assert!(err.is_auth());

        let err = check_status(StatusCode::FORBIDDEN, br#"{"message":"no"}"#).unwrap_err();
        assert!(err.is_auth());

        let err = check_status(StatusCode::INTERNAL_SERVER_ERROR, b"").unwrap_err();
        assert!(!err.is_auth());
    }

    #[test]
    fn test_check_status_carries_backend_message() {
        let err =
            check_status(StatusCode::BAD_REQUEST, br#"{"message":"cron invalido"}"#).unwrap_err();
        match err {
            ApiError::RequestFailed { status, message } => {
                assert_eq!(status, Some(400));
                assert_eq!(message, "cron invalido");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_backend_message_shapes() {
        assert_eq!(
            backend_message(br#"{"message":"backup started"}"#),
            Some("backup started".to_string())
        );
        assert_eq!(
            backend_message(br#"{"error":"unknown database"}"#),
            Some("unknown database".to_string())
        );
        assert_eq!(backend_message(b"plain failure"), Some("plain failure".to_string()));
        assert_eq!(backend_message(b""), None);
        assert_eq!(backend_message(br#"{"detail":"ignored"}"#), None);
    }
}
