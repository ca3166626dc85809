use super::{load_document, resolve};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use jsonlens_graph::{project, Graph, NodeRow};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GraphArgs {
    /// JSON document to project
    pub file: PathBuf,

    /// Print the graph as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn graph(args: GraphArgs, cwd: &str) -> Result<()> {
    let document = load_document(&resolve(cwd, &args.file))?;
    let graph = project(&document.value);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        print!("{}", render_graph(&graph));
        println!(
            "{} {} nodes, {} edges",
            "✓".green(),
            graph.nodes.len(),
            graph.edges.len()
        );
    }
    Ok(())
}

/// Plain-text listing: one block per node, then the edges.
pub fn render_graph(graph: &Graph) -> String {
    let mut out = String::new();

    for node in &graph.nodes {
        let _ = writeln!(out, "[{}] {}", node.id, node.path);
        for row in &node.rows {
            let _ = writeln!(out, "    {}", render_row(row));
        }
    }

    if !graph.edges.is_empty() {
        let _ = writeln!(out, "edges:");
        for edge in &graph.edges {
            let _ = writeln!(out, "    {} -> {}", edge.from, edge.to);
        }
    }
    out
}

fn render_row(row: &NodeRow) -> String {
    let key = row.key.as_deref().unwrap_or("(value)");
    match row.children_count {
        Some(count) => {
            let targets: Vec<&str> = row.to.iter().map(|id| id.as_str()).collect();
            format!("{}: {} of {} -> [{}]", key, row.kind, count, targets.join(", "))
        }
        None => format!("{}: {}", key, row.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonlens_value::parse;

    #[test]
    fn test_render_graph_lists_nodes_and_edges() {
        let value = parse(r#"{"title": "x", "user": {"name": "Al"}}"#).unwrap();
        let rendered = render_graph(&project(&value));

        assert_eq!(
            rendered,
            "[1] $\n    title: \"x\"\n    user: object of 1 -> [2]\n[2] $[\"user\"]\n    name: \"Al\"\nedges:\n    1 -> 2\n"
        );
    }

    #[test]
    fn test_render_scalar_root() {
        let value = parse("42").unwrap();
        assert_eq!(render_graph(&project(&value)), "[1] $\n    (value): 42\n");
    }
}
