//! Error types for the editor

use jsonlens_value::{ParseError, SerializeError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Serialize(#[from] SerializeError),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid field edits: {0}")]
    InvalidEdits(String),

    #[error("Edit would nest the document {depth} levels deep (at most {max} are supported)")]
    TooDeep { depth: usize, max: usize },
}
