//! Value extraction from nested records by dotted path

use crate::directory::Source;
use crate::types::{stringify, Record};
use serde_json::Value;
use std::borrow::Cow;

/// Value at a dotted path such as `address.city`.
///
/// A path that runs into a missing key or crosses a non-record value is absent.
pub fn value_at<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };
    let mut node = record;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        node = node.get(segment)?.as_object()?;
    }
    node.get(leaf)
}

/// Values at several paths joined by a single space.
///
/// Absent and null parts are left out and the result is trimmed, so an
/// all-absent join is a blank string.
pub fn joined_value(record: &Record, paths: &[String]) -> Value {
    let joined = paths
        .iter()
        .filter_map(|path| value_at(record, path))
        .filter(|value| !value.is_null())
        .map(stringify)
        .collect::<Vec<_>>()
        .join(" ");
    Value::String(joined.trim().to_string())
}

/// Extract the source value of a mapping
pub fn extract<'a>(record: &'a Record, source: Source<'_>) -> Option<Cow<'a, Value>> {
    match source {
        Source::Single(path) => value_at(record, path).map(Cow::Borrowed),
        Source::Joined(paths) => Some(Cow::Owned(joined_value(record, paths))),
    }
}
