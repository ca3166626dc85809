use jsonlens_editor::{
    parse_field_edits, parse_path, DocumentStore, EditTransaction, EditorBuffer, EditorError, NodeId,
};
use jsonlens_graph::normalize_node_rows;
use jsonlens_value::{nesting_depth_at, parse, set_value_at_path, to_canonical_text, Value, MAX_NESTING_DEPTH};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One open document: the store plus the raw-text editor pane mirroring it
#[wasm_bindgen]
pub struct JsonSession {
    store: DocumentStore,
    buffer: EditorBuffer,
}

impl Default for JsonSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsonSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsonSession {
        let buffer = EditorBuffer::new();
        let mut store = DocumentStore::new();
        store.subscribe(buffer.clone());
        JsonSession { store, buffer }
    }

    #[wasm_bindgen(js_name = setJson)]
    pub fn set_json(&mut self, text: String) {
        self.store.set_json(text);
    }

    #[wasm_bindgen(js_name = getJson)]
    pub fn get_json(&self) -> String {
        self.store.get_json().to_string()
    }

    #[wasm_bindgen(getter, js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Current graph as JSON (`{ nodes, edges }`)
    pub fn graph(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.store.graph()).map_err(to_js)
    }

    /// Why the current text has no graph, if it is not valid JSON
    #[wasm_bindgen(js_name = parseError)]
    pub fn parse_error(&self) -> Option<String> {
        self.store.parse_error().map(ToString::to_string)
    }

    /// One node as JSON
    pub fn node(&self, id: &str) -> Result<String, JsValue> {
        let node = self.find_node(id).map_err(to_js)?;
        serde_json::to_string(node).map_err(to_js)
    }

    /// Read-only content view of a node
    #[wasm_bindgen(js_name = nodeContent)]
    pub fn node_content(&self, id: &str) -> Result<String, JsValue> {
        self.find_node(id)
            .map(|node| normalize_node_rows(&node.rows))
            .map_err(to_js)
    }

    /// Path string of a node, e.g. `$["user"]`
    #[wasm_bindgen(js_name = nodePath)]
    pub fn node_path(&self, id: &str) -> Result<String, JsValue> {
        self.find_node(id).map(|node| node.path.to_string()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = editorContents)]
    pub fn editor_contents(&self) -> String {
        self.buffer.contents()
    }

    /// Set fields of the node at `pathJson` (a JSON array) to the values of
    /// `fieldsJson` (a JSON object). Returns the new document text.
    #[wasm_bindgen(js_name = applyEdit)]
    pub fn apply_edit(&mut self, path_json: &str, fields_json: &str) -> Result<String, JsValue> {
        self.edit(path_json, fields_json).map_err(to_js)
    }
}

impl JsonSession {
    fn find_node(&self, id: &str) -> Result<&jsonlens_editor::NodeData, EditorError> {
        self.store
            .node(&NodeId::from(id))
            .ok_or_else(|| EditorError::NodeNotFound(id.to_string()))
    }

    fn edit(&mut self, path_json: &str, fields_json: &str) -> Result<String, EditorError> {
        let path = parse_path(path_json)?;
        let edits = parse_field_edits(fields_json)?;
        let outcome = EditTransaction::new(&mut self.store).apply(&path, &edits)?;
        Ok(outcome.text)
    }
}

/// Store `valueJson` at `pathJson` within `rootJson` (absent root is null)
#[wasm_bindgen(js_name = setValueAtPath)]
pub fn set_value_at_path_js(root_json: Option<String>, path_json: &str, value_json: &str) -> Result<String, JsValue> {
    set_value_at_path_text(root_json.as_deref(), path_json, value_json).map_err(to_js)
}

/// Render a path given as a JSON array, e.g. `["a", 0]` → `$["a"][0]`
#[wasm_bindgen(js_name = jsonPathToString)]
pub fn json_path_to_string(path_json: &str) -> Result<String, JsValue> {
    parse_path(path_json).map(|path| path.to_string()).map_err(to_js)
}

fn set_value_at_path_text(root_json: Option<&str>, path_json: &str, value_json: &str) -> Result<String, EditorError> {
    let root: Option<Value> = root_json.map(parse).transpose()?;
    let path = parse_path(path_json)?;
    let value = parse(value_json)?;

    let depth = nesting_depth_at(path.segments(), &value);
    if depth > MAX_NESTING_DEPTH {
        return Err(EditorError::TooDeep {
            depth,
            max: MAX_NESTING_DEPTH,
        });
    }

    let updated = set_value_at_path(root.as_ref(), path.segments(), value);
    Ok(to_canonical_text(&updated)?)
}
