use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use anyhow::Context;
use jsonlens_editor::DEFAULT_EDITABLE_FIELDS;

pub const DEFAULT_CONFIG_NAME: &str = "jsonlens.config.json";

/// jsonlens configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Indentation of written documents (0 for compact)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Fields offered when editing a node
    #[serde(default = "default_editable_fields")]
    pub editable_fields: Vec<String>,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_indent() -> usize {
    jsonlens_value::CANONICAL_INDENT
}

fn default_editable_fields() -> Vec<String> {
    DEFAULT_EDITABLE_FIELDS.iter().map(|f| f.to_string()).collect()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", DEFAULT_CONFIG_NAME))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            editable_fields: default_editable_fields(),
            log_filter: default_log_filter(),
        }
    }
}
