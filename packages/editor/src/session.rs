//! # Node Edit Session
//!
//! Editing state for one selected node: a read-only content view, draft
//! values for the editable fields, and the message of the last failed save.
//!
//! ```text
//! viewing ──begin_edit──▶ editing ──save ok──▶ viewing
//!    ▲                       │  └──save err──▶ editing (error set)
//!    └──────cancel───────────┘
//! ```

use indexmap::IndexMap;
use jsonlens_graph::{normalize_node_rows, NodeData, NodeId};
use jsonlens_value::Value;
use tracing::debug;

use crate::store::{DocumentHandle, DocumentStore};
use crate::transaction::{EditTransaction, FieldEdits};
use crate::EditorError;

/// Fields offered for editing when none are configured
pub const DEFAULT_EDITABLE_FIELDS: &[&str] = &["name", "color"];

#[derive(Debug, Clone)]
pub struct NodeEditSession {
    node: NodeData,
    editable_fields: Vec<String>,
    drafts: IndexMap<String, String>,
    editing: bool,
    error: Option<String>,
}

impl NodeEditSession {
    pub fn new(node: NodeData) -> Self {
        Self::with_fields(node, DEFAULT_EDITABLE_FIELDS.iter().copied())
    }

    pub fn with_fields<I, S>(node: NodeData, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            node,
            editable_fields: fields.into_iter().map(Into::into).collect(),
            drafts: IndexMap::new(),
            editing: false,
            error: None,
        }
    }

    /// Session for a node of the store's current graph
    pub fn open(store: &DocumentStore, id: &NodeId) -> Result<Self, EditorError> {
        store
            .node(id)
            .cloned()
            .map(Self::new)
            .ok_or_else(|| EditorError::NodeNotFound(id.to_string()))
    }

    pub fn node(&self) -> &NodeData {
        &self.node
    }

    pub fn editable_fields(&self) -> &[String] {
        &self.editable_fields
    }

    /// Read-only content view of the node
    pub fn content(&self) -> String {
        normalize_node_rows(&self.node.rows)
    }

    /// Display form of the node's path, e.g. `$["user"]`
    pub fn path_string(&self) -> String {
        self.node.path.to_string()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Enter edit mode with drafts prefilled from the node's current rows.
    /// Fields the node lacks (or holds `null` for) start empty.
    pub fn begin_edit(&mut self) {
        self.drafts = self
            .editable_fields
            .iter()
            .map(|field| {
                let current = match self.node.field_value(field) {
                    None | Some(Value::Null) => String::new(),
                    Some(value) => value.to_plain_string(),
                };
                (field.clone(), current)
            })
            .collect();
        self.error = None;
        self.editing = true;
        debug!(path = %self.node.path, "Edit started");
    }

    pub fn draft(&self, field: &str) -> Option<&str> {
        self.drafts.get(field).map(String::as_str)
    }

    /// Update a draft. Returns false outside edit mode or for fields that
    /// are not editable.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        if !self.editing {
            return false;
        }
        match self.drafts.get_mut(field) {
            Some(draft) => {
                *draft = value.into();
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.editing = false;
        self.drafts.clear();
        self.error = None;
    }

    /// Write the drafts as string fields of the node.
    ///
    /// On failure the session stays in edit mode and [`error`](Self::error)
    /// holds the message to show.
    pub fn save<D: DocumentHandle + ?Sized>(&mut self, document: &mut D) -> bool {
        if !self.editing {
            return false;
        }
        self.error = None;

        let edits: FieldEdits = self
            .drafts
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect();

        match EditTransaction::new(document).apply(&self.node.path, &edits) {
            Ok(_) => {
                self.editing = false;
                self.drafts.clear();
                true
            }
            Err(err) => {
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Message of the last failed save
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonlens_value::Path;

    fn store_with(text: &str) -> DocumentStore {
        DocumentStore::with_json(text)
    }

    #[test]
    fn test_session_starts_in_view_mode() {
        let store = store_with(r#"{"user": {"name": "Al", "color": "red", "age": 3}}"#);
        let user = store.node_at(&Path::root().key("user")).unwrap().clone();
        let session = NodeEditSession::new(user);

        assert!(!session.is_editing());
        assert_eq!(session.path_string(), r#"$["user"]"#);
        assert!(session.content().contains("\"age\": 3"));
    }

    #[test]
    fn test_begin_edit_prefills_drafts() {
        let store = store_with(r#"{"user": {"name": "Al", "color": null}}"#);
        let id = store.node_at(&Path::root().key("user")).unwrap().id.clone();
        let mut session = NodeEditSession::open(&store, &id).unwrap();

        session.begin_edit();
        assert_eq!(session.draft("name"), Some("Al"));
        assert_eq!(session.draft("color"), Some(""));
        assert!(!session.set_field("age", "4"));
    }

    #[test]
    fn test_save_writes_drafts_and_leaves_edit_mode() {
        let mut store = store_with(r#"{"user": {"name": "Al", "color": "red"}}"#);
        let id = store.node_at(&Path::root().key("user")).unwrap().id.clone();
        let mut session = NodeEditSession::open(&store, &id).unwrap();

        session.begin_edit();
        assert!(session.set_field("name", "Ana"));
        assert!(session.set_field("color", "blue"));
        assert!(session.save(&mut store));

        assert!(!session.is_editing());
        let user = store.node_at(&Path::root().key("user")).unwrap();
        assert_eq!(user.field_value("name"), Some(&Value::from("Ana")));
        assert_eq!(user.field_value("color"), Some(&Value::from("blue")));
    }

    #[test]
    fn test_failed_save_keeps_edit_mode_and_reports() {
        let mut store = store_with(r#"{"user": {"name": "Al"}}"#);
        let id = store.node_at(&Path::root().key("user")).unwrap().id.clone();
        let mut session = NodeEditSession::open(&store, &id).unwrap();
        session.begin_edit();

        store.set_json("{ broken");
        assert!(!session.save(&mut store));
        assert!(session.is_editing());
        assert!(session.error().unwrap().starts_with("Parse error"));
        assert_eq!(store.get_json(), "{ broken");
    }

    #[test]
    fn test_open_unknown_node() {
        let store = store_with("{}");
        let err = NodeEditSession::open(&store, &NodeId::from("99")).unwrap_err();
        assert_eq!(err, EditorError::NodeNotFound("99".to_string()));
    }

    #[test]
    fn test_cancel_discards_drafts() {
        let store = store_with(r#"{"name": "root"}"#);
        let mut session = NodeEditSession::open(&store, &NodeId::from("1")).unwrap();
        session.begin_edit();
        session.set_field("name", "changed");
        session.cancel();

        assert!(!session.is_editing());
        assert_eq!(session.draft("name"), None);
        assert!(!session.set_field("name", "x"));
    }
}
