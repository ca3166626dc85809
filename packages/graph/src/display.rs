//! Read-only text shown for a selected node.

use jsonlens_value::{to_canonical_text, Map, Value};

use crate::graph::NodeRow;

/// Render a node's rows as the content view shows them.
///
/// - no rows: `{}`
/// - a single key-less row: the bare value (strings unquoted)
/// - otherwise: a pretty-printed object of the keyed scalar rows; array and
///   object rows and rows with an empty key are left out
pub fn normalize_node_rows(rows: &[NodeRow]) -> String {
    match rows {
        [] => "{}".to_string(),
        [row] if row.key.is_none() => row.value.to_plain_string(),
        _ => {
            let fields: Map = rows
                .iter()
                .filter(|row| row.is_scalar())
                .filter_map(|row| match row.key.as_deref() {
                    Some(key) if !key.is_empty() => Some((key.to_string(), row.value.clone())),
                    _ => None,
                })
                .collect();
            let object = Value::object(fields);
            to_canonical_text(&object).unwrap_or_else(|_| object.to_string())
        }
    }
}
