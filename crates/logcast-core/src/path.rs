//! Dotted-path utilities over nested JSON objects.
//!
//! Paths are split on `.` only; there is no escaping and no array indexing.
//! [`flatten`] is fully recursive while [`unflatten`] merges a single dot
//! level, so the two are not inverses of each other.

use serde_json::{Map, Value};

use crate::config::PathRule;
use crate::error::{EncodeError, PathError};
use crate::types::Field;

/// A decoded JSON object.
pub type Object = Map<String, Value>;

/// Set `value` at `path`, creating intermediate objects as needed.
///
/// The leaf is overwritten unconditionally. An intermediate segment that
/// already holds a non-object value is a [`PathError::Conflict`].
pub fn set(root: &mut Object, path: &str, value: Value) -> Result<(), PathError> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut current = root;
    for segment in parents.into_iter().flat_map(|p| p.split('.')) {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match entry {
            Value::Object(map) => map,
            _ => {
                return Err(PathError::Conflict {
                    path: path.to_string(),
                    segment: segment.to_string(),
                })
            }
        };
    }
    current.insert(leaf.to_string(), value);
    Ok(())
}

/// Remove and return the value at `path`.
///
/// Returns `None` when any segment is missing or an intermediate segment is
/// not an object. When the removal leaves the immediate parent object empty,
/// the parent entry is removed as well; pruning never goes further up.
pub fn remove(root: &mut Object, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let (leaf, parents) = segments.split_last()?;
    let Some((parent_key, ancestors)) = parents.split_last() else {
        return root.shift_remove(*leaf);
    };

    let mut current = root;
    for segment in ancestors {
        current = current.get_mut(*segment)?.as_object_mut()?;
    }
    let parent = current.get_mut(*parent_key)?.as_object_mut()?;
    let value = parent.shift_remove(*leaf)?;
    if parent.is_empty() {
        current.shift_remove(*parent_key);
    }
    Some(value)
}

/// Apply move/keep/remove rules in order.
///
/// Every source is detached first; the detached values are then set at their
/// destinations, so a rule never observes another rule's output. Rules with
/// an empty destination simply drop their source.
pub fn apply_rules(root: &mut Object, rules: &[PathRule]) -> Result<(), PathError> {
    let mut moved: Vec<(&str, Value)> = Vec::new();
    for rule in rules {
        let Some(value) = remove(root, &rule.source) else {
            continue;
        };
        tracing::trace!(source = %rule.source, destination = %rule.destination, "path rule matched");
        if !rule.destination.is_empty() {
            moved.push((rule.destination.as_str(), value));
        }
    }

    for (destination, value) in moved {
        set(root, destination, value)?;
    }
    Ok(())
}

/// Collapse nested objects into dot-joined top-level keys.
///
/// `{"a":{"b":1}}` becomes `{"a.b":1}`. Arrays are leaves and empty objects
/// are kept as `{}` leaves. With a non-empty `prefix` and a non-empty result,
/// the flattened map is wrapped as a single object under `prefix`.
pub fn flatten(root: Object, prefix: &str) -> Object {
    let mut flat = Map::new();
    flatten_into(&mut flat, None, root);

    if prefix.is_empty() || flat.is_empty() {
        return flat;
    }
    let mut wrapped = Map::new();
    wrapped.insert(prefix.to_string(), Value::Object(flat));
    wrapped
}

fn flatten_into(out: &mut Object, parent: Option<&str>, map: Object) {
    for (key, value) in map {
        let name = match parent {
            Some(parent) => format!("{parent}.{key}"),
            None => key,
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(out, Some(&name), inner),
            other => {
                out.insert(name, other);
            }
        }
    }
}

/// Merge dotted field names one level deep.
///
/// Everything after the first dot is a single nested key: `a.b.c` becomes
/// `a` holding `{"b.c": ...}`. Fields sharing a prefix merge into one opaque
/// sub-document. Undotted fields keep their order and come first; merged
/// groups follow in first-seen order.
pub fn unflatten(fields: Vec<Field>) -> Result<Vec<Field>, EncodeError> {
    let mut out = Vec::with_capacity(fields.len());
    let mut groups: Vec<(String, Object)> = Vec::new();

    for field in fields {
        let Some((prefix, rest)) = field.name.split_once('.') else {
            out.push(field);
            continue;
        };
        let value = crate::encoder::json_value(&field)?;
        let rest = rest.to_string();
        match groups.iter_mut().find(|(name, _)| name == prefix) {
            Some((_, map)) => {
                map.insert(rest, value);
            }
            None => {
                let mut map = Map::new();
                map.insert(rest, value);
                groups.push((prefix.to_string(), map));
            }
        }
    }

    for (name, map) in groups {
        let raw = serde_json::to_vec(&Value::Object(map))?;
        out.push(Field::json(name, raw));
    }
    Ok(out)
}
