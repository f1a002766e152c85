//! Type expressions used by field mappings
//!
//! A declared type is one of six fixed scalar names, a custom name that refers
//! to another schema section, or `List<inner>`. Expressions are parsed once
//! when a directory is loaded.
//!
//! Copyright (c) 2025 Registry Bridge Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static LIST_PATTERN: OnceLock<Regex> = OnceLock::new();

fn list_pattern() -> &'static Regex {
    LIST_PATTERN.get_or_init(|| {
        Regex::new(r"^List\s*<\s*(.*?)\s*>$").expect("list type pattern is a valid regex")
    })
}

/// The fixed scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Boolean,
    Double,
    Long,
    /// A string holding a date in a configured pattern
    DateString,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 6] = [
        ScalarKind::String,
        ScalarKind::Integer,
        ScalarKind::Boolean,
        ScalarKind::Double,
        ScalarKind::Long,
        ScalarKind::DateString,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::Integer => "Integer",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Double => "Double",
            ScalarKind::Long => "Long",
            ScalarKind::DateString => "DateString",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

/// Element type of a list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    Scalar(ScalarKind),
    /// Name of a schema section describing a nested record
    Custom(String),
}

impl ElementType {
    fn parse(name: &str) -> Self {
        match ScalarKind::from_name(name) {
            Some(kind) => ElementType::Scalar(kind),
            None => ElementType::Custom(name.to_string()),
        }
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            ElementType::Scalar(kind) => Some(*kind),
            ElementType::Custom(_) => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ElementType::Custom(_))
    }

    fn same_as(&self, other: &ElementType) -> bool {
        match (self, other) {
            (ElementType::Scalar(a), ElementType::Scalar(b)) => a == b,
            (ElementType::Custom(a), ElementType::Custom(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

/// A parsed `fromType` / `toType` declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Scalar(ScalarKind),
    /// A non-list custom name; values of this type pass through coercion untouched
    Custom(String),
    List(ElementType),
}

impl TypeExpr {
    /// Parse a declared type.
    ///
    /// Anything starting with `List` must be a well-formed `List<inner>` with
    /// a non-list inner name; the error carries the reason.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("type is blank".to_string());
        }

        if let Some(captures) = list_pattern().captures(raw) {
            let inner = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            if inner.is_empty() {
                return Err(format!("list type '{}' has no element type", raw));
            }
            if inner.starts_with("List") || inner.contains(&['<', '>'][..]) {
                return Err(format!("nested list type '{}' is not supported", raw));
            }
            return Ok(TypeExpr::List(ElementType::parse(inner)));
        }

        if raw.starts_with("List") || raw.contains(&['<', '>'][..]) {
            return Err(format!("expected List<ElementType>, found '{}'", raw));
        }

        Ok(match ScalarKind::from_name(raw) {
            Some(kind) => TypeExpr::Scalar(kind),
            None => TypeExpr::Custom(raw.to_string()),
        })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeExpr::List(_))
    }

    pub fn element(&self) -> Option<&ElementType> {
        match self {
            TypeExpr::List(element) => Some(element),
            _ => None,
        }
    }

    /// `List<T>` where `T` is a custom (record) type
    pub fn is_custom_list(&self) -> bool {
        self.element().is_some_and(ElementType::is_custom)
    }

    /// Scalar kind of a non-list type, `None` for custom and list types
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            TypeExpr::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Date strings, including lists of them
    pub fn is_date(&self) -> bool {
        match self {
            TypeExpr::Scalar(kind) => *kind == ScalarKind::DateString,
            TypeExpr::List(element) => element.scalar_kind() == Some(ScalarKind::DateString),
            TypeExpr::Custom(_) => false,
        }
    }

    /// Equality with custom names compared case-insensitively
    pub fn same_as(&self, other: &TypeExpr) -> bool {
        match (self, other) {
            (TypeExpr::Scalar(a), TypeExpr::Scalar(b)) => a == b,
            (TypeExpr::Custom(a), TypeExpr::Custom(b)) => a.eq_ignore_ascii_case(b),
            (TypeExpr::List(a), TypeExpr::List(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Scalar(kind) => f.write_str(kind.name()),
            ElementType::Custom(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Scalar(kind) => f.write_str(kind.name()),
            TypeExpr::Custom(name) => f.write_str(name),
            TypeExpr::List(element) => write!(f, "List<{}>", element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars_case_insensitively() {
        assert_eq!(TypeExpr::parse("String").unwrap(), TypeExpr::Scalar(ScalarKind::String));
        assert_eq!(TypeExpr::parse("long").unwrap(), TypeExpr::Scalar(ScalarKind::Long));
        assert_eq!(
            TypeExpr::parse("DateString").unwrap(),
            TypeExpr::Scalar(ScalarKind::DateString)
        );
    }

    #[test]
    fn test_parse_lists() {
        assert_eq!(
            TypeExpr::parse("List<Integer>").unwrap(),
            TypeExpr::List(ElementType::Scalar(ScalarKind::Integer))
        );
        assert_eq!(
            TypeExpr::parse("List< Address >").unwrap(),
            TypeExpr::List(ElementType::Custom("Address".to_string()))
        );
        assert!(TypeExpr::parse("List<Address>").unwrap().is_custom_list());
        assert!(!TypeExpr::parse("List<String>").unwrap().is_custom_list());
    }

    #[test]
    fn test_parse_custom() {
        let parsed = TypeExpr::parse("Address").unwrap();
        assert_eq!(parsed, TypeExpr::Custom("Address".to_string()));
        assert_eq!(parsed.scalar_kind(), None);
        assert!(!parsed.is_list());
    }

    #[test]
    fn test_malformed_lists_are_rejected() {
        assert!(TypeExpr::parse("List").is_err());
        assert!(TypeExpr::parse("List<>").is_err());
        assert!(TypeExpr::parse("List<String").is_err());
        assert!(TypeExpr::parse("List<List<String>>").is_err());
        assert!(TypeExpr::parse("   ").is_err());
    }

    #[test]
    fn test_is_date() {
        assert!(TypeExpr::parse("DateString").unwrap().is_date());
        assert!(TypeExpr::parse("List<DateString>").unwrap().is_date());
        assert!(!TypeExpr::parse("String").unwrap().is_date());
    }

    #[test]
    fn test_same_as_ignores_case_of_custom_names() {
        let a = TypeExpr::parse("List<Address>").unwrap();
        let b = TypeExpr::parse("List<address>").unwrap();
        assert!(a.same_as(&b));
        assert!(!a.same_as(&TypeExpr::parse("List<String>").unwrap()));
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["String", "List<Long>", "List<Address>", "Profile"] {
            assert_eq!(TypeExpr::parse(raw).unwrap().to_string(), raw);
        }
    }
}
