//! # jsonlens graph
//!
//! Derives the node/edge view the visualization layer draws from a document
//! value. The projection owns no document state: it is recomputed from the
//! canonical text every time that text changes.
//!
//! ```text
//! {"user": {"name": "Al", "tags": ["a"]}}
//!
//!   [1] $            user: {2 keys}
//!    └─▶ [2] $["user"]      name: "Al", tags: [1 items]
//!         └─▶ [3] $["user"]["tags"][0]   "a"
//! ```

pub mod display;
pub mod graph;
pub mod projector;

pub use display::normalize_node_rows;
pub use graph::{EdgeData, Graph, NodeData, NodeId, NodeRow};
pub use projector::{project, project_text, GraphProjector};
