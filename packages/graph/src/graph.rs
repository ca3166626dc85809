//! Graph data consumed by the visualization layer.

use std::fmt;

use jsonlens_value::{Path, Value, ValueKind};
use serde::{Deserialize, Serialize};

/// Identifier of a projected node
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One field of a node.
///
/// Scalar fields carry their value. Array and object fields carry `null`,
/// the number of children, and the nodes they link to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRow {
    pub key: Option<String>,
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<NodeId>,
}

impl NodeRow {
    pub fn scalar(key: Option<String>, value: Value) -> Self {
        Self {
            key,
            kind: value.kind(),
            value,
            children_count: None,
            to: Vec::new(),
        }
    }

    pub fn container(key: impl Into<String>, container: &Value, to: Vec<NodeId>) -> Self {
        Self {
            key: Some(key.into()),
            value: Value::Null,
            kind: container.kind(),
            children_count: container.children_count(),
            to,
        }
    }

    pub fn is_scalar(&self) -> bool {
        !self.kind.is_container()
    }
}

/// A visualized node: one object, or one scalar array element / root
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub rows: Vec<NodeRow>,
    /// Location of the represented value in the document
    pub path: Path,
}

impl NodeData {
    pub fn row(&self, key: &str) -> Option<&NodeRow> {
        self.rows.iter().find(|row| row.key.as_deref() == Some(key))
    }

    /// Value of a scalar field, if the node has one with that key
    pub fn field_value(&self, key: &str) -> Option<&Value> {
        self.row(key).filter(|row| row.is_scalar()).map(|row| &row.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    pub id: String,
    pub from: NodeId,
    pub to: NodeId,
}

/// Derived node/edge view of one document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<NodeData>,
    pub edges: Vec<EdgeData>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&NodeData> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn node_at(&self, path: &Path) -> Option<&NodeData> {
        self.nodes.iter().find(|node| &node.path == path)
    }

    pub fn children_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeData> + 'a {
        self.edges
            .iter()
            .filter(move |edge| &edge.from == id)
            .filter_map(move |edge| self.node(&edge.to))
    }

    pub fn parent_of(&self, id: &NodeId) -> Option<&NodeData> {
        self.edges
            .iter()
            .find(|edge| &edge.to == id)
            .and_then(|edge| self.node(&edge.from))
    }
}
