use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Indentation of written documents
    #[arg(short, long)]
    pub indent: Option<usize>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(indent) = args.indent {
        config.indent = indent;
    }

    let content = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    info!(file = %config_path.display(), indent = config.indent, "Config created");

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(InitArgs { indent: Some(4), force: false }, &cwd).unwrap();
        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.indent, 4);
        assert_eq!(config.editable_fields, vec!["name", "color"]);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{"indent": 8}"#).unwrap();

        init(InitArgs { indent: Some(1), force: false }, &cwd).unwrap();
        assert_eq!(Config::load(&cwd).unwrap().indent, 8);

        init(InitArgs { indent: Some(1), force: true }, &cwd).unwrap();
        assert_eq!(Config::load(&cwd).unwrap().indent, 1);
    }
}
