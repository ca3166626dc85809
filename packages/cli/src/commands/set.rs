use super::{load_document, parse_path_arg, parse_value_arg, resolve, write_document};
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use jsonlens_value::{nesting_depth_at, set_value_at_path, to_text_with_indent, Path, Value, MAX_NESTING_DEPTH};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// JSON document to update
    pub file: PathBuf,

    /// Path as a JSON array, e.g. '["user", 0]'
    #[arg(short, long)]
    pub path: String,

    /// New value as JSON (quote strings: '"Ana"')
    #[arg(short, long)]
    pub value: String,

    /// Write the result back instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

pub fn set(args: SetArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = parse_path_arg(&args.path)?;
    let new_value = parse_value_arg(&args.value)?;
    let document = load_document(&resolve(cwd, &args.file))?;

    let output = apply_set(&document.value, &path, new_value, config.indent)?;

    if args.write {
        write_document(&document.file, &output)?;
        println!("{} Set {} in {}", "✓".green(), path, args.file.display());
    } else {
        println!("{}", output);
    }
    Ok(())
}

pub fn apply_set(document: &Value, path: &Path, new_value: Value, indent: usize) -> Result<String> {
    let depth = nesting_depth_at(path.segments(), &new_value);
    if depth > MAX_NESTING_DEPTH {
        bail!(
            "Result would nest {} levels deep; at most {} can be read back",
            depth,
            MAX_NESTING_DEPTH
        );
    }
    let updated = set_value_at_path(Some(document), path.segments(), new_value);
    Ok(to_text_with_indent(&updated, indent)?)
}
