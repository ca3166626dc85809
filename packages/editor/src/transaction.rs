//! # Edit Transactions
//!
//! Read → parse → mutate → serialize → write, as one step:
//!
//! 1. read the canonical text and parse it (failure aborts the edit)
//! 2. apply each field edit at `node_path + [field]`, in order, each one
//!    against the result of the previous
//! 3. serialize the final document
//! 4. write it back, which re-derives the graph and updates every observer
//!
//! Nothing is written unless every step succeeds. Edits that would nest the
//! document deeper than [`MAX_NESTING_DEPTH`] are refused up front, since the
//! written text could not be parsed back into a graph.

use indexmap::IndexMap;
use jsonlens_value::{
    nesting_depth_at, parse, to_text_with_indent, Path, Value, CANONICAL_INDENT, MAX_ARRAY_INDEX,
    MAX_NESTING_DEPTH,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::store::DocumentHandle;
use crate::EditorError;

/// New values for fields of one node, applied in insertion order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldEdits(IndexMap<String, Value>);

impl FieldEdits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FieldEdits::insert`]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Setting a field twice keeps its first position and the latest value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldEdits {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut edits = Self::new();
        for (field, value) in iter {
            edits.insert(field, value);
        }
        edits
    }
}

/// Result of a committed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Text written into the document
    pub text: String,
    /// The document that text serializes
    pub document: Value,
}

/// One edit against a document handle
pub struct EditTransaction<'a, D: DocumentHandle + ?Sized> {
    document: &'a mut D,
    indent: usize,
}

impl<'a, D: DocumentHandle + ?Sized> EditTransaction<'a, D> {
    pub fn new(document: &'a mut D) -> Self {
        Self {
            document,
            indent: CANONICAL_INDENT,
        }
    }

    /// Indentation of the written text (`0` for compact)
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[instrument(skip(self, node_path, edits), fields(path = %node_path, fields = edits.len()))]
    pub fn apply(self, node_path: &Path, edits: &FieldEdits) -> Result<EditOutcome, EditorError> {
        let root = parse(self.document.get_json()).map_err(|err| {
            warn!(error = %err, "Edit aborted: document is not valid JSON");
            EditorError::from(err)
        })?;

        for (field, value) in edits.iter() {
            let depth = nesting_depth_at(node_path.child(field).segments(), value);
            if depth > MAX_NESTING_DEPTH {
                warn!(field, depth, "Edit aborted: document would nest too deeply");
                return Err(EditorError::TooDeep {
                    depth,
                    max: MAX_NESTING_DEPTH,
                });
            }
        }

        let document = edits.iter().fold(root, |root, (field, value)| {
            root.with_value_at(node_path.child(field).segments(), value.clone())
        });

        let text = to_text_with_indent(&document, self.indent)?;
        self.document.set_json(text.clone());
        info!(len = text.len(), "Edit applied");

        Ok(EditOutcome { text, document })
    }
}

/// Parse a path given as a JSON array, e.g. `["user", 0]`.
///
/// Indices above [`MAX_ARRAY_INDEX`] are rejected.
pub fn parse_path(text: &str) -> Result<Path, EditorError> {
    let path: Path = serde_json::from_str(text).map_err(|e| EditorError::InvalidPath(e.to_string()))?;
    if let Some(index) = path
        .iter()
        .filter(|segment| segment.is_out_of_range())
        .find_map(|segment| segment.as_index())
    {
        return Err(EditorError::InvalidPath(format!(
            "index {} exceeds the largest array index {}",
            index, MAX_ARRAY_INDEX
        )));
    }
    Ok(path)
}

/// Parse field edits given as a JSON object, e.g. `{"name": "Ana"}`.
pub fn parse_field_edits(text: &str) -> Result<FieldEdits, EditorError> {
    serde_json::from_str(text).map_err(|e| EditorError::InvalidEdits(e.to_string()))
}
