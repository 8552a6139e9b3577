//! Mind Map - WASM Module
//!
//! This module provides the layout and interaction core for the test
//! coverage mind map (source file → functions → tests). It is compiled to
//! WebAssembly and exposes a JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: the input tree, building it from test references, and the per-instance engine
//! - `selection`: line-based filtering of test references
//! - `layout`: horizontal, radial and clustered layouts plus edge paths
//! - `view`: pan/zoom transform and pointer state machine
//! - `search`: case-insensitive search and opacity
//! - `minimap`: projection of the scene and viewport into the overview
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing

use js_sys::{Array, Float32Array, Function};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

pub mod graph;
pub mod layout;
pub mod minimap;
pub mod search;
pub mod selection;
pub mod spatial;
pub mod view;

use graph::{MindMapEngine, MindMapNode, TestReference};
use layout::LayoutMode;
use view::PointerButton;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Echo an error to the browser console and turn it into a JS `Error`.
fn to_js_error(err: impl Display) -> JsValue {
    let message = err.to_string();
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsError::new(&message).into()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

/// Shorten a label for drawing inside a node box.
#[wasm_bindgen(js_name = truncateLabel)]
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    graph::truncate_label(label, max_chars)
}

/// Main entry point for one mind map instance.
///
/// This struct wraps the internal MindMapEngine and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct MindMapWasm {
    engine: MindMapEngine,
    on_node_click: Option<Function>,
}

#[wasm_bindgen]
impl MindMapWasm {
    /// Create an empty mind map with the reference geometry.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: MindMapEngine::new(),
            on_node_click: None,
        }
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Replace the tree with a `{ id, label, edgeLabel?, children? }` object.
    ///
    /// Throws on malformed input, duplicate ids or nodes below the test level;
    /// the previous tree is kept in that case.
    #[wasm_bindgen(js_name = setTree)]
    pub fn set_tree(&mut self, tree: JsValue) -> Result<(), JsValue> {
        let tree: MindMapNode = serde_wasm_bindgen::from_value(tree).map_err(to_js_error)?;
        self.engine.set_tree(tree).map_err(to_js_error)
    }

    /// Build the tree from an array of test references for one file.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path of the source file (root id)
    /// * `file_name` - Display name of the source file (root label)
    /// * `tests` - Array of `{ functionName, testFile, testName, comment?, lineRange, coveredLines }`
    /// * `selected_line` - Keep only tests related to this line, if given
    #[wasm_bindgen(js_name = setTestReferences)]
    pub fn set_test_references(
        &mut self,
        file_path: &str,
        file_name: &str,
        tests: JsValue,
        selected_line: Option<u32>,
    ) -> Result<(), JsValue> {
        let tests: Vec<TestReference> = serde_wasm_bindgen::from_value(tests).map_err(to_js_error)?;
        self.engine
            .load_test_references(file_path, file_name, &tests, selected_line)
            .map_err(to_js_error)
    }

    /// Drop the tree. Pan/zoom state is kept.
    #[wasm_bindgen(js_name = clearTree)]
    pub fn clear_tree(&mut self) {
        self.engine.clear_tree();
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Switch to `horizontal`, `radial` or `clustered` without reloading data.
    ///
    /// Returns true if the mode changed.
    #[wasm_bindgen(js_name = setLayoutMode)]
    pub fn set_layout_mode(&mut self, mode: &str) -> Result<bool, JsValue> {
        let mode: LayoutMode = mode.parse().map_err(to_js_error)?;
        Ok(self.engine.set_layout_mode(mode))
    }

    #[wasm_bindgen(js_name = layoutMode)]
    pub fn layout_mode(&self) -> String {
        self.engine.layout_mode().to_string()
    }

    /// Current layout `{ mode, width, height, positions, edges }`, or null.
    pub fn layout(&self) -> Result<JsValue, JsValue> {
        match self.engine.scene() {
            Some(scene) => to_js(scene),
            None => Ok(JsValue::NULL),
        }
    }

    /// Edge paths `{ fromId, toId, path: { kind, ... } }` for the current layout.
    #[wasm_bindgen(js_name = edgePaths)]
    pub fn edge_paths(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.routed_edges())
    }

    /// SVG path data for every edge, in edge order.
    #[wasm_bindgen(js_name = edgeSvgPaths)]
    pub fn edge_svg_paths(&self) -> Array {
        self.engine
            .routed_edges()
            .iter()
            .map(|edge| JsValue::from_str(&edge.path.to_svg()))
            .collect()
    }

    /// Node centres as a Float32Array [x0, y0, x1, y1, ...] in layout order.
    #[wasm_bindgen(js_name = positionsBuffer)]
    pub fn positions_buffer(&self) -> Float32Array {
        let positions: Vec<f32> = self
            .engine
            .scene()
            .map(|scene| scene.positions.iter().flat_map(|node| [node.x, node.y]).collect())
            .unwrap_or_default();
        Float32Array::from(&positions[..])
    }

    #[wasm_bindgen(js_name = sceneWidth)]
    pub fn scene_width(&self) -> f32 {
        self.engine.scene().map_or(0.0, |scene| scene.width)
    }

    #[wasm_bindgen(js_name = sceneHeight)]
    pub fn scene_height(&self) -> f32 {
        self.engine.scene().map_or(0.0, |scene| scene.height)
    }

    // =========================================================================
    // Pan & Zoom
    // =========================================================================

    /// Start a pan. `button` is the DOM `MouseEvent.button` code.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, button: i16, x: f32, y: f32) -> bool {
        self.engine
            .view_mut()
            .pointer_down(PointerButton::from(button), x, y)
    }

    /// Returns true if the translation changed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.engine.view_mut().pointer_move(x, y)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.engine.view_mut().pointer_up();
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.engine.view_mut().pointer_leave();
    }

    #[wasm_bindgen(js_name = isPanning)]
    pub fn is_panning(&self) -> bool {
        self.engine.view().is_panning()
    }

    /// Zoom by one wheel notch. Returns true if the scale changed.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        self.engine.view_mut().wheel(delta_y)
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> bool {
        self.engine.view_mut().zoom_in()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> bool {
        self.engine.view_mut().zoom_out()
    }

    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view(&mut self) {
        self.engine.view_mut().reset();
    }

    /// Current `{ x, y, scale }`.
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.transform())
    }

    #[wasm_bindgen(js_name = zoomPercent)]
    pub fn zoom_percent(&self) -> u32 {
        self.engine.view().zoom_percent()
    }

    /// Resize the main view. Returns false for a non-positive size.
    #[wasm_bindgen(js_name = setViewportSize)]
    pub fn set_viewport_size(&mut self, width: f32, height: f32) -> bool {
        self.engine.set_viewport_size(width, height)
    }

    /// Ids of the nodes inside the visible area.
    #[wasm_bindgen(js_name = visibleNodes)]
    pub fn visible_nodes(&self) -> Array {
        self.engine
            .visible_nodes()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    // =========================================================================
    // Search
    // =========================================================================

    #[wasm_bindgen(js_name = setSearchQuery)]
    pub fn set_search_query(&mut self, query: &str) {
        self.engine.set_search_query(query);
    }

    /// 1.0 for matches (or for everything with no query), 0.3 otherwise.
    #[wasm_bindgen(js_name = nodeOpacity)]
    pub fn node_opacity(&self, node_id: &str) -> f32 {
        self.engine.node_opacity(node_id)
    }

    #[wasm_bindgen(js_name = matchCount)]
    pub fn match_count(&self) -> usize {
        self.engine.search().match_count()
    }

    // =========================================================================
    // Minimap
    // =========================================================================

    /// `{ scale, contentWidth, contentHeight, nodeRects, viewportRect }`, or
    /// null when the minimap is hidden or there is no tree.
    pub fn minimap(&self) -> Result<JsValue, JsValue> {
        match self.engine.minimap() {
            Some(projection) => to_js(&projection),
            None => Ok(JsValue::NULL),
        }
    }

    /// Flip minimap visibility, returning the new state.
    #[wasm_bindgen(js_name = toggleMinimap)]
    pub fn toggle_minimap(&mut self) -> bool {
        self.engine.toggle_minimap()
    }

    #[wasm_bindgen(js_name = showMinimap)]
    pub fn show_minimap(&self) -> bool {
        self.engine.show_minimap()
    }

    #[wasm_bindgen(js_name = setShowMinimap)]
    pub fn set_show_minimap(&mut self, show: bool) {
        self.engine.set_show_minimap(show);
    }

    // =========================================================================
    // Node Clicks
    // =========================================================================

    /// Register `callback(nodeId)`, fired for test leaves only.
    #[wasm_bindgen(js_name = setOnNodeClick)]
    pub fn set_on_node_click(&mut self, callback: Function) {
        self.on_node_click = Some(callback);
    }

    #[wasm_bindgen(js_name = clearOnNodeClick)]
    pub fn clear_on_node_click(&mut self) {
        self.on_node_click = None;
    }

    /// Handle a click at a viewport pixel.
    ///
    /// Returns the clicked leaf id (after firing the callback), or undefined
    /// when the click hit nothing or an inert node.
    pub fn click(&self, x: f32, y: f32) -> Result<Option<String>, JsValue> {
        let Some(node_id) = self.engine.click_at(x, y).map(str::to_owned) else {
            return Ok(None);
        };
        self.dispatch_click(&node_id)?;
        Ok(Some(node_id))
    }

    /// Activate a node by id, e.g. from the keyboard.
    ///
    /// Returns true if it was a leaf and the callback fired.
    #[wasm_bindgen(js_name = activateNode)]
    pub fn activate_node(&self, node_id: &str) -> Result<bool, JsValue> {
        let Some(node_id) = self.engine.activate(node_id) else {
            return Ok(false);
        };
        self.dispatch_click(node_id)?;
        Ok(true)
    }

    fn dispatch_click(&self, node_id: &str) -> Result<(), JsValue> {
        if let Some(callback) = &self.on_node_click {
            callback.call1(&JsValue::NULL, &JsValue::from_str(node_id))?;
        }
        Ok(())
    }
}

impl Default for MindMapWasm {
    fn default() -> Self {
        Self::new()
    }
}
