//! Error types for the Registry Bridge core library
//!
//! Two layers live here. [`TransformError`] is the closed taxonomy raised by the
//! transformation engine; every variant names the field that caused it.
//! [`Error`] is the crate-wide error that also covers directory loading and
//! registry I/O, using thiserror for the definitions and anyhow for opaque sources.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for Registry Bridge operations
#[derive(Error, Debug)]
pub enum Error {
    /// A field could not be transformed
    #[error("Transformation failed: {0}")]
    Transform(#[from] TransformError),

    /// A directory or settings file could not be loaded
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Transport failure while talking to the registry
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The registry answered, but with a non-successful status
    #[error("Registry {operation} failed: {message}")]
    Registry { operation: String, message: String },

    /// A required request attribute is blank or missing
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Which side is responsible for a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fault {
    /// The caller supplied bad input
    Client,
    /// The deployment is misconfigured or a dependency failed
    Server,
}

/// Failures raised while transforming a record.
///
/// These are configuration or input defects, never transient conditions, and
/// abort the whole transformation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// `toFieldName`, `fromType` or `toType` is absent or blank
    #[error("basic configuration (toFieldName, fromType, toType) is missing for field '{field}'")]
    BasicConfigMissing { field: String },

    /// Malformed `List<...>` syntax, a custom list mapped to a scalar list,
    /// or custom types nested deeper than the engine allows
    #[error("invalid type configuration for field '{field}': {reason}")]
    InvalidTypeConfig { field: String, reason: String },

    /// A date-string type without both `fromDateFormat` and `toDateFormat`
    #[error("invalid date format configuration for field '{field}'")]
    InvalidDateFormat { field: String },

    /// The input value cannot be transformed as configured
    #[error("invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// The input value is not present in the resolved enum table
    #[error("value '{value}' is not a configured enum value for field '{field}'")]
    InvalidEnumInput { field: String, value: String },

    /// An enum is referenced but no table was found for it
    #[error("enum values are missing in the configuration for field '{field}'")]
    EnumValuesEmpty { field: String },

    /// `filters`/`filterField` missing, blank or individually malformed
    #[error("invalid filter configuration for field '{field}': {reason}")]
    InvalidFilterConfig { field: String, reason: String },
}

impl TransformError {
    /// Name of the field the error was raised for
    pub fn field(&self) -> &str {
        match self {
            Self::BasicConfigMissing { field }
            | Self::InvalidTypeConfig { field, .. }
            | Self::InvalidDateFormat { field }
            | Self::InvalidInput { field, .. }
            | Self::InvalidEnumInput { field, .. }
            | Self::EnumValuesEmpty { field }
            | Self::InvalidFilterConfig { field, .. } => field,
        }
    }

    /// Stable error code, suitable for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::BasicConfigMissing { .. } => "BASIC_CONFIG_MISSING",
            Self::InvalidTypeConfig { .. } => "INVALID_TYPE_CONFIG",
            Self::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::InvalidEnumInput { .. } => "INVALID_ENUM_INPUT",
            Self::EnumValuesEmpty { .. } => "ENUM_VALUES_EMPTY",
            Self::InvalidFilterConfig { .. } => "INVALID_FILTER_CONFIG",
        }
    }

    /// Bad input is the caller's fault; everything else is bad configuration
    pub fn fault(&self) -> Fault {
        match self {
            Self::InvalidInput { .. } | Self::InvalidEnumInput { .. } => Fault::Client,
            _ => Fault::Server,
        }
    }
}

impl Error {
    /// Create a configuration error without an underlying source
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error for a blank or missing attribute
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Which side is responsible for this error
    pub fn fault(&self) -> Fault {
        match self {
            Self::Transform(err) => err.fault(),
            Self::Validation { .. } => Fault::Client,
            Self::Http {
                status_code: Some(code),
                ..
            } if (400..500).contains(code) => Fault::Client,
            _ => Fault::Server,
        }
    }

    /// Only transport failures may succeed when tried again
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status_code, .. } => match status_code {
                Some(code) => *code == 429 || *code >= 500,
                None => true,
            },
            _ => false,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Client => write!(f, "client"),
            Fault::Server => write!(f, "server"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http {
            message: err.to_string(),
            status_code: err.status().map(|s| s.as_u16()),
            source: Some(anyhow::Error::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_error_display_names_field() {
        let err = TransformError::BasicConfigMissing {
            field: "firstName".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "basic configuration (toFieldName, fromType, toType) is missing for field 'firstName'"
        );
        assert_eq!(err.field(), "firstName");
    }

    #[test]
    fn test_fault_classification() {
        let input = TransformError::InvalidInput {
            field: "dob".to_string(),
            reason: "bad date".to_string(),
        };
        let enum_input = TransformError::InvalidEnumInput {
            field: "gender".to_string(),
            value: "x".to_string(),
        };
        let filter = TransformError::InvalidFilterConfig {
            field: "userId".to_string(),
            reason: "filterField is blank".to_string(),
        };

        assert_eq!(input.fault(), Fault::Client);
        assert_eq!(enum_input.fault(), Fault::Client);
        assert_eq!(filter.fault(), Fault::Server);
        assert_eq!(Error::from(filter).fault(), Fault::Server);
    }

    #[test]
    fn test_transform_errors_are_not_retryable() {
        let err = Error::from(TransformError::EnumValuesEmpty {
            field: "gender".to_string(),
        });
        assert!(!err.is_retryable());
        assert!(err.to_string().starts_with("Transformation failed:"));
    }

    #[test]
    fn test_http_retry_and_fault() {
        let unavailable = Error::Http {
            message: "service unavailable".to_string(),
            status_code: Some(503),
            source: None,
        };
        let forbidden = Error::Http {
            message: "forbidden".to_string(),
            status_code: Some(403),
            source: None,
        };
        assert!(unavailable.is_retryable());
        assert_eq!(unavailable.fault(), Fault::Server);
        assert!(!forbidden.is_retryable());
        assert_eq!(forbidden.fault(), Fault::Client);
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            TransformError::BasicConfigMissing { field: "a".into() },
            TransformError::InvalidTypeConfig { field: "a".into(), reason: String::new() },
            TransformError::InvalidDateFormat { field: "a".into() },
            TransformError::InvalidInput { field: "a".into(), reason: String::new() },
            TransformError::InvalidEnumInput { field: "a".into(), value: String::new() },
            TransformError::EnumValuesEmpty { field: "a".into() },
            TransformError::InvalidFilterConfig { field: "a".into(), reason: String::new() },
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
