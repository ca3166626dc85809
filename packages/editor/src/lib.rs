//! # jsonlens Editor
//!
//! Document state and editing for jsonlens.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ DocumentStore: canonical JSON text          │
//! │  - set_json / clear                         │
//! │  - re-derives the graph on every write      │
//! └─────────────────────────────────────────────┘
//!          ↓ events                ↓ graph
//! ┌──────────────────────┐  ┌──────────────────────┐
//! │ EditorBuffer         │  │ NodeEditSession      │
//! │  raw-text mirror     │  │  drafts for one node │
//! └──────────────────────┘  └──────────────────────┘
//!                                  ↓ save
//! ┌─────────────────────────────────────────────┐
//! │ EditTransaction: parse → mutate → write     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Text is the source of truth**: the graph and the buffer are derived
//! 2. **Writes are synchronous**: after `set_json` returns, every view agrees
//! 3. **Edits are all-or-nothing**: a failed transaction writes nothing
//!
//! ## Usage
//!
//! ```rust
//! use jsonlens_editor::{DocumentStore, EditorBuffer, FieldEdits};
//! use jsonlens_value::Path;
//!
//! let mut store = DocumentStore::new();
//! let buffer = EditorBuffer::new();
//! store.subscribe(buffer.clone());
//!
//! store.set_json(r#"{"user": {"name": "Al"}}"#);
//! store
//!     .apply_edits(&Path::root().key("user"), &FieldEdits::new().set("name", "Ana"))
//!     .unwrap();
//!
//! assert_eq!(buffer.contents(), store.get_json());
//! ```

mod buffer;
mod errors;
mod session;
mod store;
mod transaction;

pub use buffer::EditorBuffer;
pub use errors::EditorError;
pub use session::{NodeEditSession, DEFAULT_EDITABLE_FIELDS};
pub use store::{
    DocumentEvent, DocumentHandle, DocumentObserver, DocumentStore, SharedDocumentStore, SubscriptionId,
    INITIAL_DOCUMENT,
};
pub use transaction::{parse_field_edits, parse_path, EditOutcome, EditTransaction, FieldEdits};

// Re-export common types for convenience
pub use jsonlens_graph::{Graph, NodeData, NodeId};
pub use jsonlens_value::{Path, Segment, Value};
