//! Writing resolved values into the output record

use crate::types::Record;
use serde_json::Value;

/// Write `value` at the dotted `path`, creating intermediate records.
///
/// An intermediate that holds something other than a record is replaced.
/// With `merge_list` set and a list already at the leaf, an incoming list
/// extends it and any other value is appended; otherwise the leaf is
/// overwritten.
pub(crate) fn write(output: &mut Record, path: &str, merge_list: bool, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    write_at(output, &segments, merge_list, value);
}

fn write_at(node: &mut Record, segments: &[&str], merge_list: bool, value: Value) {
    match segments {
        [] => {}
        [leaf] => write_leaf(node, leaf, merge_list, value),
        [head, rest @ ..] => {
            let slot = node
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Record::new()));
            if !slot.is_object() {
                *slot = Value::Object(Record::new());
            }
            if let Value::Object(child) = slot {
                write_at(child, rest, merge_list, value);
            }
        }
    }
}

fn write_leaf(node: &mut Record, leaf: &str, merge_list: bool, value: Value) {
    if merge_list {
        if let Some(Value::Array(existing)) = node.get_mut(leaf) {
            match value {
                Value::Array(items) => existing.extend(items),
                other => existing.push(other),
            }
            return;
        }
    }
    node.insert(leaf.to_string(), value);
}
