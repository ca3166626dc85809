//! Projection of realistic documents

use jsonlens_graph::{normalize_node_rows, project_text, NodeId};
use jsonlens_value::{Path, Value, ValueKind};

const CATALOG: &str = r#"{
  "store": "Main",
  "open": true,
  "products": [
    {"name": "Lamp", "color": "red", "sizes": ["S", "M"]},
    {"name": "Desk", "color": null, "dimensions": {"w": 120, "h": 75}}
  ],
  "owner": {"name": "Ana"}
}"#;

#[test]
fn test_catalog_projection_shape() {
    let graph = project_text(CATALOG).unwrap();

    // root, 2 products, 2 sizes, dimensions, owner
    assert_eq!(graph.nodes.len(), 7);
    assert_eq!(graph.edges.len(), 6);

    let root = graph.node_at(&Path::root()).unwrap();
    let kinds: Vec<ValueKind> = root.rows.iter().map(|row| row.kind).collect();
    assert_eq!(
        kinds,
        vec![ValueKind::String, ValueKind::Boolean, ValueKind::Array, ValueKind::Object]
    );
}

#[test]
fn test_every_node_path_resolves_in_document() {
    let document = jsonlens_value::parse(CATALOG).unwrap();
    let graph = project_text(CATALOG).unwrap();

    for node in &graph.nodes {
        let value = jsonlens_value::get_value_at_path(&document, node.path.segments());
        assert!(value.is_some(), "node {} path {} does not resolve", node.id, node.path);
    }
}

#[test]
fn test_edges_reference_existing_nodes() {
    let graph = project_text(CATALOG).unwrap();
    for edge in &graph.edges {
        assert!(graph.node(&edge.from).is_some());
        assert!(graph.node(&edge.to).is_some());
    }
    let desk = graph.node_at(&Path::root().key("products").index(1)).unwrap();
    let dimensions = graph.children_of(&desk.id).next().unwrap();
    assert_eq!(dimensions.path, Path::root().key("products").index(1).key("dimensions"));
}

#[test]
fn test_node_content_view() {
    let graph = project_text(CATALOG).unwrap();
    let desk = graph.node_at(&Path::root().key("products").index(1)).unwrap();
    assert_eq!(
        normalize_node_rows(&desk.rows),
        "{\n  \"name\": \"Desk\",\n  \"color\": null\n}"
    );

    let size = graph
        .node_at(&Path::root().key("products").index(0).key("sizes").index(1))
        .unwrap();
    assert_eq!(normalize_node_rows(&size.rows), "M");
}

#[test]
fn test_graph_serializes_for_visualization_layer() {
    let graph = project_text(r#"{"user":{"name":"Al"}}"#).unwrap();
    let json = serde_json::to_value(&graph).unwrap();

    assert_eq!(json["nodes"][0]["path"], serde_json::json!([]));
    assert_eq!(json["nodes"][0]["rows"][0]["type"], "object");
    assert_eq!(json["nodes"][0]["rows"][0]["childrenCount"], 1);
    assert_eq!(json["nodes"][1]["path"], serde_json::json!(["user"]));
    assert_eq!(json["nodes"][1]["rows"][0]["value"], "Al");
    assert_eq!(json["edges"][0]["from"], "1");
    assert_eq!(graph.nodes[1].id, NodeId::from("2"));
    assert_eq!(graph.nodes[1].field_value("name"), Some(&Value::from("Al")));
}
