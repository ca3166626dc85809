//! # Document Store
//!
//! Authoritative holder of the canonical document text.
//!
//! Every write re-derives the graph projection and notifies observers
//! before returning, so anyone reading the store afterwards sees the new
//! text and the graph that matches it:
//!
//! ```text
//! set_json(text) → store text → GraphProjector::set_graph → observers
//! ```
//!
//! The store never parses for its own sake. Text that is not valid JSON is
//! stored as given; the projection records the parse error.

use std::sync::Arc;

use jsonlens_graph::{Graph, GraphProjector, NodeData, NodeId};
use jsonlens_value::{ParseError, Path};
use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::transaction::{EditOutcome, EditTransaction, FieldEdits};
use crate::EditorError;

/// Text held before the first write
pub const INITIAL_DOCUMENT: &str = "{}";

/// Change pushed to observers after the store has been updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent<'a> {
    Changed { text: &'a str, version: u64 },
    Cleared { version: u64 },
}

/// Anything that mirrors the canonical text (editor panes, caches, tests)
pub trait DocumentObserver: Send {
    fn on_event(&mut self, event: &DocumentEvent<'_>);
}

impl<F> DocumentObserver for F
where
    F: FnMut(&DocumentEvent<'_>) + Send,
{
    fn on_event(&mut self, event: &DocumentEvent<'_>) {
        self(event)
    }
}

/// Read/write access to canonical text.
///
/// Edit transactions depend on this rather than on a concrete store so they
/// can run against fakes.
pub trait DocumentHandle {
    fn get_json(&self) -> &str;
    fn set_json(&mut self, text: String);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct DocumentStore {
    json: String,
    loading: bool,
    version: u64,
    projector: GraphProjector,
    observers: Vec<(SubscriptionId, Box<dyn DocumentObserver>)>,
    next_subscription: u64,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            json: INITIAL_DOCUMENT.to_string(),
            loading: true,
            version: 0,
            projector: GraphProjector::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Store created and immediately loaded with `text`
    pub fn with_json(text: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.set_json(text);
        store
    }

    /// Replace the canonical text, re-derive the graph and notify observers.
    #[instrument(skip(self, text))]
    pub fn set_json(&mut self, text: impl Into<String>) {
        self.json = text.into();
        self.loading = false;
        self.version += 1;
        debug!(len = self.json.len(), version = self.version, "Document replaced");

        self.projector.set_graph(&self.json);
        let event = DocumentEvent::Changed {
            text: &self.json,
            version: self.version,
        };
        notify(&mut self.observers, &event);
    }

    pub fn get_json(&self) -> &str {
        &self.json
    }

    /// Reset to empty text and drop the projection.
    pub fn clear(&mut self) {
        self.json.clear();
        self.loading = false;
        self.version += 1;
        info!(version = self.version, "Document cleared");

        self.projector.clear_graph();
        let event = DocumentEvent::Cleared {
            version: self.version,
        };
        notify(&mut self.observers, &event);
    }

    /// True until the first `set_json` or `clear`
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Incremented by every write
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn graph(&self) -> &Graph {
        self.projector.graph()
    }

    pub fn projector(&self) -> &GraphProjector {
        &self.projector
    }

    pub fn node(&self, id: &NodeId) -> Option<&NodeData> {
        self.projector.node(id)
    }

    pub fn node_at(&self, path: &Path) -> Option<&NodeData> {
        self.projector.node_at(path)
    }

    /// Why the current text has no graph, if it failed to parse
    pub fn parse_error(&self) -> Option<&ParseError> {
        self.projector.last_error()
    }

    /// Register an observer. It receives every event after this call.
    pub fn subscribe(&mut self, observer: impl DocumentObserver + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Register a closure observer
    pub fn subscribe_fn<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(&DocumentEvent<'_>) + Send + 'static,
    {
        self.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Apply field edits to the node at `node_path` as one transaction.
    pub fn apply_edits(&mut self, node_path: &Path, edits: &FieldEdits) -> Result<EditOutcome, EditorError> {
        EditTransaction::new(self).apply(node_path, edits)
    }
}

fn notify(observers: &mut [(SubscriptionId, Box<dyn DocumentObserver>)], event: &DocumentEvent<'_>) {
    for (_, observer) in observers.iter_mut() {
        observer.on_event(event);
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("json_len", &self.json.len())
            .field("loading", &self.loading)
            .field("version", &self.version)
            .field("nodes", &self.projector.graph().nodes.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl DocumentHandle for DocumentStore {
    fn get_json(&self) -> &str {
        DocumentStore::get_json(self)
    }

    fn set_json(&mut self, text: String) {
        DocumentStore::set_json(self, text)
    }
}

/// A store shared between threads.
///
/// Each `transact` call holds the lock for the whole read-modify-write, so
/// at most one mutation is in flight and none is lost.
#[derive(Clone, Default)]
pub struct SharedDocumentStore {
    inner: Arc<Mutex<DocumentStore>>,
}

impl SharedDocumentStore {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn get_json(&self) -> String {
        self.inner.lock().get_json().to_string()
    }

    pub fn set_json(&self, text: impl Into<String>) {
        self.inner.lock().set_json(text);
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Run `f` with exclusive access to the store
    pub fn transact<R>(&self, f: impl FnOnce(&mut DocumentStore) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    pub fn apply_edits(&self, node_path: &Path, edits: &FieldEdits) -> Result<EditOutcome, EditorError> {
        self.transact(|store| store.apply_edits(node_path, edits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let store = DocumentStore::new();
        assert_eq!(store.get_json(), "{}");
        assert!(store.is_loading());
        assert_eq!(store.version(), 0);
        assert!(store.graph().is_empty());
    }

    #[test]
    fn test_set_json_rederives_graph_before_returning() {
        let mut store = DocumentStore::new();
        store.set_json(r#"{"user": {"name": "Al"}}"#);

        assert!(!store.is_loading());
        assert_eq!(store.version(), 1);
        assert_eq!(store.graph().nodes.len(), 2);
        assert!(store.node_at(&Path::root().key("user")).is_some());
    }

    #[test]
    fn test_invalid_text_is_stored_verbatim() {
        let mut store = DocumentStore::with_json("{\"a\": 1}");
        store.set_json("{oops");

        assert_eq!(store.get_json(), "{oops");
        assert!(store.graph().is_empty());
        assert!(store.parse_error().is_some());
    }

    #[test]
    fn test_clear_resets_text_and_graph() {
        let mut store = DocumentStore::with_json("{\"a\": {\"b\": 1}}");
        store.clear();

        assert_eq!(store.get_json(), "");
        assert!(store.graph().is_empty());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_observers_receive_events_in_order() {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut store = DocumentStore::new();
        store.subscribe_fn(move |event| {
            let entry = match event {
                DocumentEvent::Changed { text, version } => format!("changed:{}:{}", version, text),
                DocumentEvent::Cleared { version } => format!("cleared:{}", version),
            };
            sink.lock().push(entry);
        });

        store.set_json("[1]");
        store.clear();

        assert_eq!(*seen.lock(), vec!["changed:1:[1]".to_string(), "cleared:2".to_string()]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let count = std::sync::Arc::new(Mutex::new(0));
        let sink = count.clone();

        let mut store = DocumentStore::new();
        let id = store.subscribe_fn(move |_| *sink.lock() += 1);
        store.set_json("{}");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_json("[]");

        assert_eq!(*count.lock(), 1);
        assert_eq!(store.observer_count(), 0);
    }
}
