//! Field and enum directories
//!
//! Directories are the externally supplied configuration that drives the
//! transformation engine. They are parsed and compiled once, then shared
//! read-only by any number of transformations.
//!
//! - `type_expr`: the closed type model (`Scalar | Custom | List<...>`)
//! - `mapping`: compiled per-field mapping rules
//! - `fields`: the field directory keyed by schema and field name
//! - `enums`: enum tables and the enum directory
//! - `loader`: JSON / YAML file loading

pub mod enums;
pub mod fields;
pub mod loader;
pub mod mapping;
pub mod type_expr;

pub use enums::{EnumDirectory, EnumTable};
pub use fields::FieldDirectory;
pub use loader::Format;
pub use mapping::{EnumRef, FieldMapping, FilterRule, FromField, Source};
pub use type_expr::{ElementType, ScalarKind, TypeExpr};
