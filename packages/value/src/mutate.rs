//! # Path-addressed mutation
//!
//! `set_value_at_path` rewrites one location of a document and returns the
//! new document. The input is never modified: containers on the path are
//! copied (shallowly, via `Arc::make_mut`) and every container off the path
//! is shared with the input.
//!
//! ## Shape policy
//!
//! Paths are trusted to describe the shape the caller wants:
//! - a missing or `null` intermediate becomes an empty array when the next
//!   segment is an index, otherwise an empty object
//! - an index segment over a non-array replaces it with an empty array
//! - a key segment over a scalar replaces it with an empty object
//! - an index past the end pads the array with `null`, by at most
//!   [`MAX_INDEX_PADDING`] elements
//!
//! Replacing a non-null value discards its contents. That is logged, never
//! reported as an error.
//!
//! Two writes are dropped instead, leaving the document unchanged: a key
//! segment over an array (arrays have no named members in JSON) and an
//! index that would pad past [`MAX_INDEX_PADDING`]. Both are checked before
//! anything is touched, so a dropped write never leaves a partial edit.

use std::sync::Arc;

use tracing::warn;

use crate::path::{path_to_string, Segment};
use crate::value::{Map, Value, ValueKind};

/// Largest number of `null`s an index past the end may append to an array
pub const MAX_INDEX_PADDING: usize = 1 << 16;

/// Return a copy of `root` with `new_value` stored at `path`.
///
/// A missing root is treated as `null`. The empty path replaces the whole
/// document.
pub fn set_value_at_path(root: Option<&Value>, path: &[Segment], new_value: Value) -> Value {
    if path.is_empty() {
        return new_value;
    }
    root.cloned().unwrap_or_default().with_value_at(path, new_value)
}

/// Nesting depth along `path` once `value` is stored there: one level per
/// container the path walks through, plus the depth of `value` itself.
///
/// Compare with [`MAX_NESTING_DEPTH`](crate::MAX_NESTING_DEPTH) before
/// writing text that must parse again.
pub fn nesting_depth_at(path: &[Segment], value: &Value) -> usize {
    path.len().saturating_add(value.depth())
}

/// Read the value stored at `path`, if every segment resolves.
pub fn get_value_at_path<'a>(root: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    path.iter().try_fold(root, |current, segment| current.get(segment))
}

impl Value {
    /// Owned form of [`set_value_at_path`].
    ///
    /// Containers this value holds exclusively are updated in place; shared
    /// ones are copied first, so other holders never observe the write.
    pub fn with_value_at(self, path: &[Segment], new_value: Value) -> Value {
        let Some((last, parents)) = path.split_last() else {
            return new_value;
        };

        if let Err((depth, rejection)) = check_path(&self, path) {
            warn!(
                path = %path_to_string(&path[..=depth]),
                reason = %rejection,
                "Write dropped; document left unchanged"
            );
            return self;
        }

        let mut working = self;
        let mut current = &mut working;
        for (depth, segment) in parents.iter().enumerate() {
            let slot = slot_mut(current, segment, &path[..depth]);
            if slot.is_null() {
                *slot = empty_container_for(&path[depth + 1]);
            }
            current = slot;
        }
        *slot_mut(current, last, parents) = new_value;

        working
    }
}

/// Why a write was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    KeyOnArray,
    IndexTooFar { len: usize },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::KeyOnArray => f.write_str("key segment over an array"),
            Rejection::IndexTooFar { len } => write!(
                f,
                "index pads an array of {} elements by {} or more",
                len, MAX_INDEX_PADDING
            ),
        }
    }
}

/// Walk `path` over the existing document without touching it. Returns the
/// depth of the first segment whose write would be dropped.
fn check_path(root: &Value, path: &[Segment]) -> Result<(), (usize, Rejection)> {
    let mut current = Some(root);
    for (depth, segment) in path.iter().enumerate() {
        match (current, segment) {
            (Some(Value::Array(_)), Segment::Key(_)) => return Err((depth, Rejection::KeyOnArray)),
            (existing, Segment::Index(index)) => {
                let len = existing.and_then(Value::as_array).map_or(0, <[Value]>::len);
                if index.saturating_sub(len) >= MAX_INDEX_PADDING {
                    return Err((depth, Rejection::IndexTooFar { len }));
                }
            }
            _ => {}
        }
        current = current.and_then(|value| value.get(segment));
    }
    Ok(())
}

/// Mutable reference to the child `segment` of `container`, coercing the
/// container to the shape the segment needs. `at` is the container's path.
///
/// Callers run [`check_path`] first, which bounds every index.
fn slot_mut<'a>(container: &'a mut Value, segment: &Segment, at: &[Segment]) -> &'a mut Value {
    match segment {
        Segment::Index(index) => {
            let index = *index;
            let items = coerce_array(container, at);
            if items.len() <= index {
                items.resize(index.saturating_add(1), Value::Null);
            }
            &mut items[index]
        }
        Segment::Key(key) => coerce_object(container, at)
            .entry(key.clone())
            .or_insert(Value::Null),
    }
}

fn coerce_array<'a>(value: &'a mut Value, at: &[Segment]) -> &'a mut Vec<Value> {
    if !value.is_array() {
        note_discarded(value, ValueKind::Array, at);
        *value = Value::empty_array();
    }
    match value {
        Value::Array(items) => Arc::make_mut(items),
        _ => unreachable!("value was coerced to an array"),
    }
}

fn coerce_object<'a>(value: &'a mut Value, at: &[Segment]) -> &'a mut Map {
    if !value.is_object() {
        note_discarded(value, ValueKind::Object, at);
        *value = Value::empty_object();
    }
    match value {
        Value::Object(map) => Arc::make_mut(map),
        _ => unreachable!("value was coerced to an object"),
    }
}

fn empty_container_for(next: &Segment) -> Value {
    match next {
        Segment::Index(_) => Value::empty_array(),
        Segment::Key(_) => Value::empty_object(),
    }
}

fn note_discarded(value: &Value, expected: ValueKind, at: &[Segment]) {
    if !value.is_null() {
        warn!(
            path = %path_to_string(at),
            found = %value.kind(),
            expected = %expected,
            "Path shape disagrees with document; replacing existing value"
        );
    }
}
