//! HTTP client for the EduWaka collaborator API.
//!
//! JSON request/response bodies throughout; authenticated calls carry
//! `Authorization: Bearer <access token>`. The client is stateless with
//! respect to authentication: the session manager owns the tokens and hands
//! the bearer credential to each call that needs one.
//!
//! ## Design
//! - One `reqwest::Client` with a 30s timeout, shared by all operations
//! - Endpoint modules split by backend app: auth, profile, institutions,
//!   courses, assistant
//! - Collaborator rejections surface the first structured field error in a
//!   fixed precedence, then `detail`/`message`, then a per-operation fallback
//! - No automatic retries and no request cancellation

pub mod assistant;
pub mod auth;
pub mod courses;
pub mod institutions;
pub mod profile;

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Paginated list envelope used by the collaborator's list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// EduWaka API client.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client against the given base URL (trailing slash optional).
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path relative to the base.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.endpoint(path))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.endpoint(path))
    }

    pub(crate) fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.patch(self.endpoint(path))
    }

    /// Parse a success body, or convert a rejection into [`ApiError`].
    ///
    /// `fields` is the precedence list of structured field errors checked
    /// before the `detail`/`message` keys; `fallback` is the operation's
    /// generic failure string.
    pub(crate) async fn expect_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        fields: &[&str],
        fallback: &str,
    ) -> ApiResult<T> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::rejection(response, fields, fallback).await)
        }
    }

    /// Build the rejection error from a non-2xx response.
    pub(crate) async fn rejection(
        response: reqwest::Response,
        fields: &[&str],
        fallback: &str,
    ) -> ApiError {
        let status = response.status();
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        tracing::debug!(%status, "collaborator rejected request");
        ApiError::Rejected(field_error(&body, fields).unwrap_or_else(|| fallback.to_string()))
    }
}

/// Extract the first field-level validation message in `fields` order,
/// falling back to the `detail` and then `message` keys.
pub(crate) fn field_error(body: &serde_json::Value, fields: &[&str]) -> Option<String> {
    for field in fields {
        if let Some(message) = body
            .get(field)
            .and_then(|v| v.get(0))
            .and_then(|v| v.as_str())
        {
            return Some(message.to_string());
        }
    }
    for key in ["detail", "message"] {
        if let Some(message) = body.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}

/// Attach the bearer credential to a request.
pub(crate) fn bearer(
    request: reqwest::RequestBuilder,
    access_token: &str,
) -> reqwest::RequestBuilder {
    request.header("Authorization", format!("Bearer {access_token}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = ApiClient::new("http://127.0.0.1:8000/api").unwrap();
        assert_eq!(
            client.endpoint("auth/token/"),
            "http://127.0.0.1:8000/api/auth/token/"
        );
    }

    #[test]
    fn endpoint_preserves_existing_trailing_slash() {
        let client = ApiClient::new("http://127.0.0.1:8000/api/").unwrap();
        assert_eq!(
            client.endpoint("register/"),
            "http://127.0.0.1:8000/api/register/"
        );
    }

    #[test]
    fn field_error_follows_precedence() {
        let body = json!({
            "username": ["username taken"],
            "email": ["email taken"],
            "detail": "generic detail",
        });
        let message = field_error(&body, &["email", "username", "password"]);
        assert_eq!(message.as_deref(), Some("email taken"));
    }

    #[test]
    fn field_error_falls_back_to_detail() {
        let body = json!({"detail": "Invalid username or password."});
        let message = field_error(&body, &["email", "username", "password"]);
        assert_eq!(message.as_deref(), Some("Invalid username or password."));
    }

    #[test]
    fn field_error_falls_back_to_message_key() {
        let body = json!({"message": "quota exceeded"});
        assert_eq!(field_error(&body, &[]).as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn field_error_on_empty_body_is_none() {
        assert!(field_error(&serde_json::Value::Null, &["email"]).is_none());
    }

    #[test]
    fn paginated_envelope_deserializes() {
        let raw = json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": ["a", "b"],
        });
        let page: Paginated<String> = serde_json::from_value(raw).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.results, vec!["a", "b"]);
        assert!(page.next.is_none());
    }
}
