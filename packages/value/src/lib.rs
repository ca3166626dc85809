//! # jsonlens value
//!
//! The document model shared by every jsonlens package.
//!
//! ```text
//! canonical text ──parse──▶ Value ──set_value_at_path──▶ Value ──serialize──▶ canonical text
//! ```
//!
//! `Value` is persistent: containers live behind `Arc`, so a mutation copies
//! only the containers on the path it rewrites and shares everything else
//! with the previous version of the document.

pub mod error;
pub mod mutate;
pub mod path;
pub mod text;
pub mod value;

pub use error::{ParseError, ParseResult, SerializeError};
pub use mutate::{get_value_at_path, nesting_depth_at, set_value_at_path, MAX_INDEX_PADDING};
pub use path::{path_to_string, Path, Segment, MAX_ARRAY_INDEX};
pub use text::{
    parse, to_canonical_text, to_compact_text, to_text_with_indent, CANONICAL_INDENT, MAX_NESTING_DEPTH,
};
pub use value::{Map, Value, ValueKind};
