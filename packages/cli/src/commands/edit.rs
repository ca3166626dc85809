use super::{parse_path_arg, parse_value_arg, read_source, resolve, write_document};
use crate::config::Config;
use anyhow::{anyhow, bail, Result};
use clap::Args;
use colored::Colorize;
use jsonlens_editor::{DocumentStore, EditTransaction, EditorBuffer, FieldEdits};
use jsonlens_graph::normalize_node_rows;
use jsonlens_value::Value;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// JSON document to edit
    pub file: PathBuf,

    /// Path of the node to edit, as a JSON array
    #[arg(short, long, default_value = "[]")]
    pub path: String,

    /// Field assignment `name=value`; repeat for several fields
    #[arg(short, long = "field", value_name = "NAME=VALUE", required = true)]
    pub fields: Vec<String>,

    /// Parse values as JSON instead of storing them as strings
    #[arg(long)]
    pub typed: bool,

    /// Allow fields that are not listed in editableFields
    #[arg(long)]
    pub any_field: bool,

    /// Write the result back instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = parse_path_arg(&args.path)?;
    let edits = parse_field_args(&args.fields, args.typed)?;

    if !args.any_field {
        let editable = |field: &str| config.editable_fields.iter().any(|e| e == field);
        if let Some((field, _)) = edits.iter().find(|(field, _)| !editable(field)) {
            bail!(
                "Field '{}' is not editable (editable: {}); pass --any-field to override",
                field,
                config.editable_fields.join(", ")
            );
        }
    }

    let file = resolve(cwd, &args.file);
    let source = read_source(&file)?;

    let buffer = EditorBuffer::new();
    let mut store = DocumentStore::new();
    store.subscribe(buffer.clone());
    store.set_json(source);

    if let Some(err) = store.parse_error() {
        let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");
        return Err(anyhow!("\n{}", err.report(file_name, store.get_json())));
    }

    EditTransaction::new(&mut store)
        .with_indent(config.indent)
        .apply(&path, &edits)?;

    if args.write {
        write_document(&file, &buffer.contents())?;
        buffer.mark_saved();
        println!("{} Edited {} in {}", "✓".green(), path, args.file.display());
        if let Some(node) = store.node_at(&path) {
            println!("{}", normalize_node_rows(&node.rows).dimmed());
        }
    } else {
        println!("{}", buffer.contents());
    }
    Ok(())
}

/// Parse `name=value` arguments, in order.
pub fn parse_field_args(args: &[String], typed: bool) -> Result<FieldEdits> {
    args.iter()
        .map(|arg| -> Result<(String, Value)> {
            let (name, raw) = arg
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected NAME=VALUE, got '{}'", arg))?;
            if name.is_empty() {
                bail!("Field name missing in '{}'", arg);
            }
            let value = if typed { parse_value_arg(raw)? } else { Value::from(raw) };
            Ok((name.to_string(), value))
        })
        .collect()
}
