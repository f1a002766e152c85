//! Registry response envelope

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Status reported by the registry for a successful call
pub const STATUS_SUCCESSFUL: &str = "SUCCESSFUL";
/// Status reported by the registry for a failed call
pub const STATUS_UNSUCCESSFUL: &str = "UNSUCCESSFUL";

/// `params` block of a registry response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errmsg: Option<String>,
}

/// A registry response: `{ "params": { "status", "errmsg" }, "result": ... }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryResponse {
    #[serde(default)]
    pub params: ResponseParams,
    #[serde(default)]
    pub result: Value,
}

impl RegistryResponse {
    /// Parse a response body
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::Json {
            message: format!("failed to parse registry response: {}", e),
            source: e,
        })
    }

    /// A successful response carrying `result`
    pub fn success(result: Value) -> Self {
        Self {
            params: ResponseParams {
                status: Some(STATUS_SUCCESSFUL.to_string()),
                errmsg: None,
            },
            result,
        }
    }

    /// A failed response carrying an error message
    pub fn failure(errmsg: impl Into<String>) -> Self {
        Self {
            params: ResponseParams {
                status: Some(STATUS_UNSUCCESSFUL.to_string()),
                errmsg: Some(errmsg.into()),
            },
            result: json!({}),
        }
    }

    pub fn is_successful(&self) -> bool {
        self.params
            .status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case(STATUS_SUCCESSFUL))
    }

    /// The `result` block, or a `Registry` error naming `operation`
    pub fn into_result(self, operation: &str) -> Result<Value> {
        if self.is_successful() {
            return Ok(self.result);
        }
        let message = self
            .params
            .errmsg
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "registry returned status {}",
                    self.params.status.as_deref().unwrap_or("<none>")
                )
            });
        tracing::error!(operation, %message, "Registry call returned failure status");
        Err(Error::Registry {
            operation: operation.to_string(),
            message,
        })
    }
}
