mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, get, graph, init, path, set, EditArgs, GetArgs, GraphArgs, InitArgs, PathArgs, SetArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// jsonlens - inspect and edit JSON documents as node graphs
#[derive(Parser, Debug)]
#[command(name = "jsonlens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default jsonlens.config.json
    Init(InitArgs),

    /// Print the value at a path
    Get(GetArgs),

    /// Replace the value at a path
    Set(SetArgs),

    /// Edit fields of the node at a path
    Edit(EditArgs),

    /// Print the node graph of a document
    Graph(GraphArgs),

    /// Render a path as a path string
    Path(PathArgs),
}

/// RUST_LOG wins; otherwise the configured filter.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let log_filter = Config::load(&cwd)
        .map(|config| config.log_filter)
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&log_filter);

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Get(args) => get(args, &cwd),
        Command::Set(args) => set(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
        Command::Graph(args) => graph(args, &cwd),
        Command::Path(args) => path(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
