//! Registry Bridge Core - directory-driven record transformation
//!
//! This crate maps records between an application-facing profile schema and an
//! external registry schema. What gets mapped where is described by a field
//! directory and an enum directory supplied from configuration files.
//!
//! # Main Components
//!
//! - **Directories**: field and enum directories loaded from JSON or YAML and
//!   compiled once into typed mappings
//! - **Transformation Engine**: type coercion, enum substitution in both
//!   directions, date reformatting, scalar/list bridging, filter selection and
//!   recursion into nested custom types
//! - **Registry**: an async transport trait, an HTTP client and a user profile
//!   service built on top of the engine
//! - **Error Handling**: a closed transformation error taxonomy plus a crate
//!   error type using `thiserror` and `anyhow`
//!
//! # Example
//!
//! ```
//! use registry_bridge_core::{Direction, EnumDirectory, FieldDirectory, Transformer};
//! use serde_json::json;
//!
//! # fn main() -> registry_bridge_core::Result<()> {
//! let fields = FieldDirectory::from_value(json!({
//!     "teacher": {
//!         "subject": {"toFieldName": "subjects", "fromType": "String", "toType": "List<String>"}
//!     }
//! }))?;
//! let enums = EnumDirectory::empty();
//!
//! let output = Transformer::new(&fields, &enums)
//!     .transform_value(&json!({"subject": "Math"}), "teacher", Direction::Write)?;
//! assert_eq!(output, json!({"subjects": ["Math"]}));
//! # Ok(())
//! # }
//! ```

pub mod directory;
pub mod engine;
pub mod error;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use directory::{EnumDirectory, EnumTable, FieldDirectory, FieldMapping, ScalarKind, TypeExpr};
pub use engine::{transform, Transformer, DEFAULT_MAX_DEPTH};
pub use error::{Error, Fault, Result, TransformError};
pub use registry::{HttpRegistryClient, RegistryClientConfig, RegistryResponse, RegistryTransport, UserRegistry};
pub use types::{Direction, Record};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
