//! End-to-end flows through store, buffer, session and transactions

use std::thread;

use jsonlens_editor::{
    DocumentStore, EditorBuffer, EditorError, FieldEdits, NodeEditSession, SharedDocumentStore,
};
use jsonlens_value::{parse, Path, Segment, Value, MAX_NESTING_DEPTH};

#[test]
fn test_node_edit_updates_store_graph_and_buffer() -> anyhow::Result<()> {
    let mut store = DocumentStore::new();
    let buffer = EditorBuffer::new();
    store.subscribe(buffer.clone());
    store.set_json(r#"{"user":{"name":"Al","color":"red"}}"#);

    let user_path = Path::root().key("user");
    let user_id = store.node_at(&user_path).expect("user node").id.clone();

    let mut session = NodeEditSession::open(&store, &user_id)?;
    assert_eq!(session.path_string(), r#"$["user"]"#);

    session.begin_edit();
    session.set_field("name", "Ana");
    session.set_field("color", "blue");
    assert!(session.save(&mut store), "save failed: {:?}", session.error());

    let users: Vec<_> = store.graph().nodes.iter().filter(|n| n.path == user_path).collect();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].field_value("name"), Some(&Value::from("Ana")));
    assert_eq!(users[0].field_value("color"), Some(&Value::from("blue")));

    assert_eq!(buffer.contents(), store.get_json());
    assert_eq!(buffer.synced_version(), store.version());
    assert_eq!(
        parse(store.get_json())?,
        parse(r#"{"user":{"name":"Ana","color":"blue"}}"#)?
    );
    Ok(())
}

#[test]
fn test_failed_edit_leaves_everything_unchanged() {
    let mut store = DocumentStore::new();
    let buffer = EditorBuffer::new();
    store.subscribe(buffer.clone());
    store.set_json("{\"user\": ");
    let version = store.version();

    let err = store
        .apply_edits(&Path::root().key("user"), &FieldEdits::new().set("name", "Ana"))
        .unwrap_err();

    assert!(matches!(err, EditorError::Parse(_)));
    assert_eq!(store.get_json(), "{\"user\": ");
    assert_eq!(store.version(), version);
    assert_eq!(buffer.contents(), "{\"user\": ");
}

#[test]
fn test_edit_creates_missing_structure() -> anyhow::Result<()> {
    let mut store = DocumentStore::with_json(r#"{"title": "x"}"#);
    store.apply_edits(
        &Path::root().key("items").index(2),
        &FieldEdits::new().set("name", "third"),
    )?;

    let expected = parse(r#"{"title": "x", "items": [null, null, {"name": "third"}]}"#)?;
    assert_eq!(parse(store.get_json())?, expected);

    let third = store.node_at(&Path::root().key("items").index(2)).expect("third item");
    assert_eq!(third.field_value("name"), Some(&Value::from("third")));
    Ok(())
}

#[test]
fn test_concurrent_edits_are_not_lost() -> anyhow::Result<()> {
    let shared = SharedDocumentStore::new(DocumentStore::with_json(r#"{"counter": {"n": 0}}"#));
    let counter_path = Path::root().key("counter");

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            let counter_path = counter_path.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    shared
                        .transact(|store| {
                            let n = store
                                .node_at(&counter_path)
                                .and_then(|node| node.field_value("n"))
                                .and_then(Value::as_number)
                                .and_then(|n| n.as_i64())
                                .unwrap_or(0);
                            store.apply_edits(&counter_path, &FieldEdits::new().set("n", n + 1))
                        })
                        .expect("edit");
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker panicked");
    }

    let text = shared.get_json();
    assert_eq!(parse(&text)?, parse(r#"{"counter": {"n": 100}}"#)?);
    Ok(())
}

#[test]
fn test_clear_then_reload() {
    let mut store = DocumentStore::with_json(r#"{"a": {"b": 1}}"#);
    let buffer = EditorBuffer::new();
    store.subscribe(buffer.clone());

    store.clear();
    assert!(store.graph().is_empty());
    assert_eq!(buffer.contents(), "");

    store.set_json(r#"{"c": 2}"#);
    assert_eq!(store.graph().nodes.len(), 1);
    assert_eq!(buffer.contents(), r#"{"c": 2}"#);
}

#[test]
fn test_too_deep_edit_keeps_store_projectable() {
    let mut store = DocumentStore::with_json(r#"{"a": {"b": 1}}"#);
    let version = store.version();
    let nodes = store.graph().nodes.len();
    let deep: Path = (0..MAX_NESTING_DEPTH + 3).map(|i| Segment::key(format!("k{}", i))).collect();

    let err = store
        .apply_edits(&deep, &FieldEdits::new().set("name", "x"))
        .unwrap_err();

    assert!(matches!(err, EditorError::TooDeep { .. }));
    assert_eq!(store.version(), version);
    assert!(store.parse_error().is_none());
    assert_eq!(store.graph().nodes.len(), nodes);
}

#[test]
fn test_key_edit_over_array_leaves_array_intact() -> anyhow::Result<()> {
    let mut store = DocumentStore::with_json(r#"{"list": [1, 2, 3]}"#);
    store.apply_edits(&Path::root().key("list"), &FieldEdits::new().set("name", "n"))?;

    assert_eq!(parse(store.get_json())?, parse(r#"{"list": [1, 2, 3]}"#)?);
    Ok(())
}
