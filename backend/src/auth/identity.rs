//! Identity provider exchange
//!
//! The only call this system needs from the identity boundary: exchange an
//! opaque user credential for a stable user id. Provider-specific token flows
//! stay on the provider's side of this trait.

use async_trait::async_trait;
use groove_shared::errors::SignInError;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Exchanges an opaque credential for a stable user id
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn exchange(&self, credential: &str) -> Result<String, SignInError>;
}

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    user_id: String,
}

/// HTTP-backed identity provider
///
/// POSTs the credential to the configured exchange endpoint and reads back
/// `{"user_id": "..."}`. Failures collapse into the fixed sign-in taxonomy:
/// transport problems are network errors, a rejected credential is treated
/// as a cancelled sign-in, other client errors point at misconfiguration.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    exchange_url: String,
}

impl HttpIdentityProvider {
    pub fn new(exchange_url: String, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            exchange_url,
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn exchange(&self, credential: &str) -> Result<String, SignInError> {
        let response = self
            .client
            .post(&self.exchange_url)
            .json(&serde_json::json!({ "credential": credential }))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "identity exchange transport failure");
                if e.is_timeout() || e.is_connect() {
                    SignInError::Network
                } else {
                    SignInError::Unknown
                }
            })?;

        match response.status() {
            StatusCode::OK => {
                let body: ExchangeResponse = response.json().await.map_err(|e| {
                    warn!(error = %e, "identity exchange returned malformed body");
                    SignInError::Unknown
                })?;
                Ok(body.user_id)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SignInError::Cancelled),
            status if status.is_client_error() => {
                warn!(%status, "identity exchange rejected the request");
                Err(SignInError::Configuration)
            }
            status => {
                warn!(%status, "identity exchange failed");
                Err(SignInError::Unknown)
            }
        }
    }
}

/// Development provider: the credential itself is the stable user id
///
/// Used when no exchange endpoint is configured.
pub struct DevIdentityProvider;

#[async_trait]
impl IdentityProvider for DevIdentityProvider {
    async fn exchange(&self, credential: &str) -> Result<String, SignInError> {
        let trimmed = credential.trim();
        if trimmed.is_empty() {
            return Err(SignInError::Configuration);
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn dev_provider_echoes_credential() {
        let provider = DevIdentityProvider;
        assert_eq!(provider.exchange("  user-1  ").await.unwrap(), "user-1");
        assert_eq!(
            provider.exchange("   ").await.unwrap_err(),
            SignInError::Configuration
        );
    }

    #[tokio::test]
    async fn http_provider_exchanges_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exchange"))
            .and(body_json_string(r#"{"credential":"tok-1"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user_id": "user-42"
            })))
            .mount(&server)
            .await;

        let provider =
            HttpIdentityProvider::new(format!("{}/exchange", server.uri()), 5).unwrap();
        assert_eq!(provider.exchange("tok-1").await.unwrap(), "user-42");
    }

    #[tokio::test]
    async fn http_provider_maps_rejection_to_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let provider = HttpIdentityProvider::new(server.uri(), 5).unwrap();
        assert_eq!(
            provider.exchange("bad").await.unwrap_err(),
            SignInError::Cancelled
        );
    }

    #[tokio::test]
    async fn http_provider_maps_client_error_to_configuration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let provider = HttpIdentityProvider::new(server.uri(), 5).unwrap();
        assert_eq!(
            provider.exchange("bad").await.unwrap_err(),
            SignInError::Configuration
        );
    }

    #[tokio::test]
    async fn http_provider_maps_server_error_to_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = HttpIdentityProvider::new(server.uri(), 5).unwrap();
        assert_eq!(
            provider.exchange("tok").await.unwrap_err(),
            SignInError::Unknown
        );
    }

    #[tokio::test]
    async fn http_provider_maps_unreachable_host_to_network() {
        // Nothing listens on this port.
        let provider =
            HttpIdentityProvider::new("http://127.0.0.1:1/exchange".to_string(), 1).unwrap();
        assert_eq!(
            provider.exchange("tok").await.unwrap_err(),
            SignInError::Network
        );
    }
}
