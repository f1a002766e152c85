//! HTTP registry client
//!
//! Every operation is a JSON `POST` to `<base>/<operation>` carrying the
//! caller's access token in the `x-authenticated-user-token` header.

use super::response::RegistryResponse;
use super::transport::RegistryTransport;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as ReqwestClient;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

/// Header carrying the caller's access token
pub const ACCESS_TOKEN_HEADER: &str = "x-authenticated-user-token";

/// Configuration for the registry client
#[derive(Debug, Clone)]
pub struct RegistryClientConfig {
    /// Base URL of the registry, e.g. `http://localhost:8080/`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RegistryClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Registry transport over HTTP
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    client: ReqwestClient,
    base_url: Url,
}

impl HttpRegistryClient {
    /// Create a client for the configured registry
    pub fn new(config: RegistryClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Http {
                message: format!("Failed to create HTTP client: {}", e),
                status_code: None,
                source: Some(anyhow::Error::new(e)),
            })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a registry operation
    pub fn endpoint(&self, operation: &str) -> Result<Url> {
        self.base_url.join(operation).map_err(|e| Error::Configuration {
            message: format!("invalid registry endpoint '{}'", operation),
            source: Some(e.into()),
        })
    }

    async fn post(&self, operation: &str, body: &Value, access_token: &str) -> Result<RegistryResponse> {
        let url = self.endpoint(operation)?;
        tracing::debug!(%url, operation, "Sending registry request");

        let response = self
            .client
            .post(url)
            .headers(headers(access_token)?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(operation, status = status.as_u16(), "Registry request failed");
            return Err(Error::Http {
                message: format!("registry {} returned {}: {}", operation, status, text.trim()),
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        RegistryResponse::parse(&text)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    // Url::join replaces the last segment unless the base ends with a slash
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| Error::Configuration {
        message: format!("invalid registry URL '{}'", raw),
        source: Some(e.into()),
    })
}

fn headers(access_token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let token = HeaderValue::from_str(access_token)
        .map_err(|_| Error::validation("access_token", "access token is not a valid header value"))?;
    headers.insert(ACCESS_TOKEN_HEADER, token);
    Ok(headers)
}

#[async_trait]
impl RegistryTransport for HttpRegistryClient {
    async fn add_entity(&self, entity: &Value, access_token: &str) -> Result<RegistryResponse> {
        self.post("add", entity, access_token).await
    }

    async fn read_entity(&self, entity_id: &str, access_token: &str) -> Result<RegistryResponse> {
        self.post("read", &json!({ "id": entity_id }), access_token).await
    }

    async fn update_entity(&self, entity: &Value, access_token: &str) -> Result<RegistryResponse> {
        self.post("update", entity, access_token).await
    }

    async fn delete_entity(&self, entity_id: &str, access_token: &str) -> Result<RegistryResponse> {
        self.post("delete", &json!({ "id": entity_id }), access_token).await
    }
}
