pub mod edit;
pub mod get;
pub mod graph;
pub mod init;
pub mod path;
pub mod set;

pub use edit::{edit, EditArgs};
pub use get::{get, GetArgs};
pub use graph::{graph, GraphArgs};
pub use init::{init, InitArgs};
pub use path::{path, PathArgs};
pub use set::{set, SetArgs};

use anyhow::{anyhow, Context, Result};
use jsonlens_editor::parse_path;
use jsonlens_value::{parse, Path, Value};
use std::fs;
use std::path::{Path as FsPath, PathBuf};
use tracing::{debug, info};

/// A document read from disk
pub struct LoadedDocument {
    pub file: PathBuf,
    pub value: Value,
}

pub fn resolve(cwd: &str, file: &FsPath) -> PathBuf {
    PathBuf::from(cwd).join(file)
}

/// Read the document text only; edits go through the store, which parses.
pub fn read_source(file: &FsPath) -> Result<String> {
    let source = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    debug!(file = %file.display(), len = source.len(), "Document read");
    Ok(source)
}

/// Read and parse a document, rendering parse failures as a diagnostic.
pub fn load_document(file: &FsPath) -> Result<LoadedDocument> {
    let source = read_source(file)?;
    let value = parse(&source).map_err(|e| {
        let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");
        anyhow!("\n{}", e.report(file_name, &source))
    })?;

    Ok(LoadedDocument {
        file: file.to_path_buf(),
        value,
    })
}

pub fn parse_path_arg(text: &str) -> Result<Path> {
    parse_path(text).with_context(|| format!("Paths are JSON arrays like '[\"user\", 0]', got {}", text))
}

pub fn parse_value_arg(text: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("Not a JSON value: {}", text))
}

pub fn write_document(file: &FsPath, text: &str) -> Result<()> {
    fs::write(file, text).with_context(|| format!("Failed to write {}", file.display()))?;
    info!(file = %file.display(), len = text.len(), "Document written");
    Ok(())
}
