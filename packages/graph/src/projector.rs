//! # Graph projection
//!
//! Projection rules:
//! - an object becomes one node; scalar fields become rows, array/object
//!   fields become container rows whose children are projected as nodes
//! - a scalar in node position becomes a node with a single key-less row
//! - an array in node position has no node of its own: its elements are
//!   projected at the same level
//!
//! Node ids are assigned in depth-first pre-order starting at `"1"`.

use jsonlens_value::{parse, Map, ParseError, Path, Value};
use tracing::{debug, instrument, warn};

use crate::graph::{EdgeData, Graph, NodeData, NodeId, NodeRow};

/// Derive the graph for a document value.
#[instrument(skip(value), fields(kind = %value.kind()))]
pub fn project(value: &Value) -> Graph {
    let mut builder = GraphBuilder::default();
    builder.project_at(value, Path::root(), None);
    let graph = builder.graph;
    debug!(nodes = graph.nodes.len(), edges = graph.edges.len(), "Projection complete");
    graph
}

/// Parse canonical text and derive its graph.
pub fn project_text(text: &str) -> Result<Graph, ParseError> {
    Ok(project(&parse(text)?))
}

#[derive(Default)]
struct GraphBuilder {
    graph: Graph,
    next_id: usize,
}

impl GraphBuilder {
    /// Returns the ids of the nodes created at this level.
    fn project_at(&mut self, value: &Value, path: Path, parent: Option<&NodeId>) -> Vec<NodeId> {
        match value {
            Value::Array(items) => {
                let mut ids = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    ids.extend(self.project_at(item, path.child(index), parent));
                }
                ids
            }
            Value::Object(map) => vec![self.project_object(map, path, parent)],
            scalar => {
                let (id, slot) = self.open_node(path, parent);
                self.graph.nodes[slot].rows = vec![NodeRow::scalar(None, scalar.clone())];
                vec![id]
            }
        }
    }

    fn project_object(&mut self, map: &Map, path: Path, parent: Option<&NodeId>) -> NodeId {
        let (id, slot) = self.open_node(path.clone(), parent);

        let mut rows = Vec::with_capacity(map.len());
        for (key, child) in map {
            if child.is_container() {
                let to = self.project_at(child, path.child(key.as_str()), Some(&id));
                rows.push(NodeRow::container(key.as_str(), child, to));
            } else {
                rows.push(NodeRow::scalar(Some(key.clone()), child.clone()));
            }
        }

        self.graph.nodes[slot].rows = rows;
        id
    }

    /// Push an empty node (and its incoming edge) so ids follow pre-order.
    /// Returns the id and the node's index in `graph.nodes`.
    fn open_node(&mut self, path: Path, parent: Option<&NodeId>) -> (NodeId, usize) {
        self.next_id += 1;
        let id = NodeId::new(self.next_id.to_string());
        let slot = self.graph.nodes.len();

        self.graph.nodes.push(NodeData {
            id: id.clone(),
            rows: Vec::new(),
            path,
        });

        if let Some(parent) = parent {
            self.graph.edges.push(EdgeData {
                id: format!("e{}-{}", parent, id),
                from: parent.clone(),
                to: id.clone(),
            });
        }

        (id, slot)
    }
}

/// Holds the projection of the current canonical text.
///
/// Unparseable text empties the graph and keeps the error for the caller
/// that wants to surface it.
#[derive(Debug, Default)]
pub struct GraphProjector {
    graph: Graph,
    last_error: Option<ParseError>,
}

impl GraphProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive the graph from canonical text
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn set_graph(&mut self, text: &str) {
        match parse(text) {
            Ok(value) => self.set_graph_from_value(&value),
            Err(err) => {
                warn!(error = %err, "Document text is not valid JSON; graph cleared");
                self.graph = Graph::default();
                self.last_error = Some(err);
            }
        }
    }

    pub fn set_graph_from_value(&mut self, value: &Value) {
        self.graph = project(value);
        self.last_error = None;
    }

    pub fn clear_graph(&mut self) {
        self.graph = Graph::default();
        self.last_error = None;
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn node(&self, id: &NodeId) -> Option<&NodeData> {
        self.graph.node(id)
    }

    pub fn node_at(&self, path: &Path) -> Option<&NodeData> {
        self.graph.node_at(path)
    }

    /// Parse failure of the most recent `set_graph`, if any
    pub fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }
}
