use super::{load_document, parse_path_arg, resolve};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use jsonlens_value::{get_value_at_path, to_text_with_indent, Path, Value};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GetArgs {
    /// JSON document to read
    pub file: PathBuf,

    /// Path as a JSON array (defaults to the whole document)
    #[arg(short, long, default_value = "[]")]
    pub path: String,

    /// Print on one line
    #[arg(long)]
    pub compact: bool,
}

pub fn get(args: GetArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = parse_path_arg(&args.path)?;
    let document = load_document(&resolve(cwd, &args.file))?;

    let indent = if args.compact { 0 } else { config.indent };
    println!("{}", render_value_at(&document.value, &path, indent)?);
    Ok(())
}

pub fn render_value_at(document: &Value, path: &Path, indent: usize) -> Result<String> {
    let value = get_value_at_path(document, path.segments()).ok_or_else(|| anyhow!("Nothing at {}", path))?;
    Ok(to_text_with_indent(value, indent)?)
}
