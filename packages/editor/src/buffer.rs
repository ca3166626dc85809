//! # Editor Buffer
//!
//! Raw-text pane that mirrors the canonical document. The buffer subscribes
//! to a [`DocumentStore`](crate::DocumentStore) and is overwritten on every
//! store write, so it cannot drift from the store.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::store::{DocumentEvent, DocumentObserver};

/// Cloneable handle to the pane's text. Clones share the same text.
#[derive(Clone, Debug, Default)]
pub struct EditorBuffer {
    state: Arc<RwLock<BufferState>>,
}

#[derive(Debug, Default)]
struct BufferState {
    contents: String,
    has_changes: bool,
    synced_version: u64,
}

impl EditorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        let buffer = Self::new();
        buffer.state.write().contents = contents.into();
        buffer
    }

    pub fn contents(&self) -> String {
        self.state.read().contents.clone()
    }

    /// True once the text differs from what was last saved
    pub fn has_changes(&self) -> bool {
        self.state.read().has_changes
    }

    /// Store version the buffer last mirrored
    pub fn synced_version(&self) -> u64 {
        self.state.read().synced_version
    }

    /// Text typed by the user
    pub fn set_contents(&self, contents: impl Into<String>) {
        let mut state = self.state.write();
        state.contents = contents.into();
        state.has_changes = true;
    }

    pub fn mark_saved(&self) {
        self.state.write().has_changes = false;
    }
}

impl DocumentObserver for EditorBuffer {
    fn on_event(&mut self, event: &DocumentEvent<'_>) {
        let mut state = self.state.write();
        match *event {
            DocumentEvent::Changed { text, version } => {
                if state.contents != text {
                    state.contents = text.to_string();
                    state.has_changes = true;
                }
                state.synced_version = version;
                debug!(version, "Editor buffer synced");
            }
            DocumentEvent::Cleared { version } => {
                state.contents.clear();
                state.has_changes = false;
                state.synced_version = version;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentStore;

    #[test]
    fn test_buffer_follows_store_writes() {
        let buffer = EditorBuffer::new();
        let mut store = DocumentStore::new();
        store.subscribe(buffer.clone());

        store.set_json("[1, 2]");
        assert_eq!(buffer.contents(), "[1, 2]");
        assert!(buffer.has_changes());
        assert_eq!(buffer.synced_version(), store.version());
    }

    #[test]
    fn test_identical_text_is_not_a_change() {
        let buffer = EditorBuffer::with_contents("{\"a\": 1}");
        let mut store = DocumentStore::new();
        store.subscribe(buffer.clone());

        store.set_json("{\"a\": 1}");
        assert!(!buffer.has_changes());
        assert_eq!(buffer.synced_version(), 1);
    }

    #[test]
    fn test_clear_empties_buffer() {
        let buffer = EditorBuffer::with_contents("x");
        buffer.set_contents("typed");
        assert!(buffer.has_changes());

        let mut store = DocumentStore::new();
        store.subscribe(buffer.clone());
        store.clear();

        assert_eq!(buffer.contents(), "");
        assert!(!buffer.has_changes());
    }
}
