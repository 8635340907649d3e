/*
[INPUT]:  HTTP configuration (webhook URL, timeouts, bearer token)
[OUTPUT]: Configured reqwest client ready for webhook calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{ClonerError, Result};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Client bound to a single webhook endpoint
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http_client: Client,
    webhook_url: Url,
    auth_token: Option<String>,
    timeout: Duration,
}

impl WebhookClient {
    /// Create a new client with default configuration
    pub fn new(webhook_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), webhook_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, webhook_url: &str) -> Result<Self> {
        let webhook_url = Url::parse(webhook_url)?;
        if !matches!(webhook_url.scheme(), "http" | "https") {
            return Err(ClonerError::Config(format!(
                "webhook url must be http or https, got {}",
                webhook_url.scheme()
            )));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            webhook_url,
            auth_token: None,
            timeout: config.timeout,
        })
    }

    /// Attach a bearer token to every request
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.auth_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn webhook_url(&self) -> &Url {
        &self.webhook_url
    }

    pub fn has_auth_token(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Build a POST to the webhook carrying `body` as JSON
    pub(crate) fn post_json<B: Serialize + ?Sized>(&self, body: &B) -> RequestBuilder {
        let builder = self
            .http_client
            .post(self.webhook_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body, mapping transport and status failures
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|err| self.map_send_error(err))?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        if body.trim().is_empty() {
            return Err(ClonerError::InvalidResponse(
                "webhook returned an empty body".to_string(),
            ));
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClonerError {
        if err.is_timeout() {
            ClonerError::Timeout {
                duration: self.timeout.as_secs(),
            }
        } else {
            ClonerError::Http(err)
        }
    }

    fn status_error(status: StatusCode, body: &str) -> ClonerError {
        let message = extract_error_message(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ClonerError::Authentication { message }
            }
            _ => ClonerError::api_error(status, message),
        }
    }
}

/// Pull `error` or `message` out of a JSON error body, falling back to raw text
fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Err(_) => Some(trimmed.chars().take(200).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = WebhookClient::new("ftp://example.com/hook").unwrap_err();
        assert!(matches!(err, ClonerError::Config(_)));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let err = WebhookClient::new("not a url").unwrap_err();
        assert!(matches!(err, ClonerError::UrlParse(_)));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let client = WebhookClient::new("https://example.com/hook")
            .expect("client init")
            .with_auth_token("   ");
        assert!(!client.has_auth_token());
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error": "bad token"}"#).as_deref(),
            Some("bad token")
        );
        assert_eq!(
            extract_error_message(r#"{"message": "try later"}"#).as_deref(),
            Some("try later")
        );
        assert_eq!(extract_error_message("gateway down").as_deref(), Some("gateway down"));
        assert_eq!(extract_error_message("  "), None);
    }

    #[test]
    fn test_status_error_maps_auth() {
        let err = WebhookClient::status_error(StatusCode::FORBIDDEN, "");
        assert!(matches!(err, ClonerError::Authentication { .. }));

        let err = WebhookClient::status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        match err {
            ClonerError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
