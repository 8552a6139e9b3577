//! MindMapEngine - one rendered mind map instance.
//!
//! The engine owns the tree, the active layout mode and the last layout
//! result, plus the view, search and hit-testing state derived from them.
//! Every tree or mode change recomputes the layout from scratch before
//! anything reads positions, so the minimap, search and hit index never
//! see stale geometry.
//!
//! The view transform is independent of what is shown: it survives tree
//! and mode changes until an explicit reset.

use super::error::TreeError;
use super::node::MindMapNode;
use super::reference::{TestReference, build_mind_map};
use crate::layout::{LayoutMetrics, LayoutMode, LayoutResult, MindMapLayout, RoutedEdge, route_edges};
use crate::minimap::{self, MinimapConfig, MinimapProjection};
use crate::search::SearchState;
use crate::selection::filter_tests_by_line;
use crate::spatial::SceneIndex;
use crate::view::{ViewController, ViewTransform, ViewportSize};

/// The mind map engine.
///
/// This struct manages:
/// - The input tree and the active layout mode
/// - The current layout result and its spatial index
/// - Pan/zoom state, search state and minimap visibility
pub struct MindMapEngine {
    layout: MindMapLayout,
    minimap: MinimapConfig,
    viewport: ViewportSize,

    tree: Option<MindMapNode>,
    mode: LayoutMode,

    /// Layout of `tree` under `mode`; `None` without a tree.
    scene: Option<LayoutResult>,

    /// Node boxes of `scene` for hit testing.
    index: SceneIndex,

    view: ViewController,
    search: SearchState,
    show_minimap: bool,
}

impl MindMapEngine {
    /// Create an empty engine with the reference geometry.
    pub fn new() -> Self {
        let metrics = LayoutMetrics::default();
        let minimap = MinimapConfig::for_metrics(&metrics);
        Self::with_config(metrics, minimap, ViewportSize::default())
    }

    /// Create an empty engine with explicit geometry.
    pub fn with_config(metrics: LayoutMetrics, minimap: MinimapConfig, viewport: ViewportSize) -> Self {
        Self {
            layout: MindMapLayout::new(metrics),
            minimap,
            viewport,
            tree: None,
            mode: LayoutMode::default(),
            scene: None,
            index: SceneIndex::new(),
            view: ViewController::new(),
            search: SearchState::new(),
            show_minimap: true,
        }
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        self.layout.metrics()
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Replace the tree and relayout.
    ///
    /// An invalid tree is rejected and the previous state is kept.
    pub fn set_tree(&mut self, tree: MindMapNode) -> Result<(), TreeError> {
        tree.validate()?;
        tracing::debug!(root = %tree.id, nodes = tree.node_count(), "replacing mind map tree");
        self.tree = Some(tree);
        self.relayout();
        Ok(())
    }

    /// Build the tree for one file from its test references, keeping only
    /// the tests related to `selected_line` when one is given.
    pub fn load_test_references(
        &mut self,
        file_path: &str,
        file_name: &str,
        tests: &[TestReference],
        selected_line: Option<u32>,
    ) -> Result<(), TreeError> {
        let kept = filter_tests_by_line(tests, selected_line);
        tracing::debug!(
            file = file_path,
            line = ?selected_line,
            kept = kept.len(),
            total = tests.len(),
            "filtered test references"
        );
        self.set_tree(build_mind_map(file_path, file_name, kept))
    }

    /// Drop the tree. The view transform is kept.
    pub fn clear_tree(&mut self) {
        self.tree = None;
        self.relayout();
    }

    pub fn tree(&self) -> Option<&MindMapNode> {
        self.tree.as_ref()
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Switch layout mode on the current tree. Returns whether it changed.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.relayout();
        true
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.mode
    }

    /// The current layout result.
    pub fn scene(&self) -> Option<&LayoutResult> {
        self.scene.as_ref()
    }

    /// Drawable paths for the current edges.
    pub fn routed_edges(&self) -> Vec<RoutedEdge> {
        self.scene
            .as_ref()
            .map(|scene| route_edges(scene, self.layout.metrics()))
            .unwrap_or_default()
    }

    fn relayout(&mut self) {
        self.scene = self
            .tree
            .as_ref()
            .map(|tree| self.layout.compute(tree, self.mode));

        let metrics = self.layout.metrics();
        self.index = match &self.scene {
            Some(scene) => SceneIndex::build(scene, metrics.node_width, metrics.node_height),
            None => SceneIndex::new(),
        };
        self.search.refresh(self.tree.as_ref());
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewController {
        &mut self.view
    }

    pub fn transform(&self) -> ViewTransform {
        self.view.transform()
    }

    /// Resize the main view. Returns false for a non-positive or non-finite size.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) -> bool {
        match ViewportSize::new(width, height) {
            Some(viewport) => {
                self.viewport = viewport;
                true
            }
            None => false,
        }
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Ids of the nodes whose boxes intersect the visible part of the scene.
    pub fn visible_nodes(&self) -> Vec<&str> {
        let Some(scene) = &self.scene else {
            return Vec::new();
        };
        let (min_x, min_y, max_x, max_y) =
            self.view
                .transform()
                .visible_scene_rect(self.viewport, scene.width, scene.height);
        self.index
            .in_rect(min_x, min_y, max_x, max_y)
            .into_iter()
            .map(|node| node.id.as_str())
            .collect()
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn set_search_query(&mut self, query: &str) {
        self.search.set_query(self.tree.as_ref(), query);
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn node_opacity(&self, node_id: &str) -> f32 {
        self.search.opacity(node_id)
    }

    // =========================================================================
    // Minimap
    // =========================================================================

    /// Minimap projection of the current scene, or `None` when hidden or empty.
    pub fn minimap(&self) -> Option<MinimapProjection> {
        if !self.show_minimap {
            return None;
        }
        let scene = self.scene.as_ref()?;
        Some(minimap::project(
            &self.minimap,
            &scene.positions,
            scene.width,
            scene.height,
            &self.view.transform(),
            self.viewport,
        ))
    }

    pub fn show_minimap(&self) -> bool {
        self.show_minimap
    }

    pub fn set_show_minimap(&mut self, show: bool) {
        self.show_minimap = show;
    }

    /// Flip minimap visibility, returning the new state.
    pub fn toggle_minimap(&mut self) -> bool {
        self.show_minimap = !self.show_minimap;
        self.show_minimap
    }

    // =========================================================================
    // Clicks
    // =========================================================================

    /// Id of the leaf under a viewport pixel. Functions and the root are inert.
    pub fn click_at(&self, screen_x: f32, screen_y: f32) -> Option<&str> {
        let scene = self.scene.as_ref()?;
        let (x, y) = self.view.transform().screen_to_scene(
            screen_x,
            screen_y,
            self.viewport,
            scene.width,
            scene.height,
        );
        self.index
            .hit(x, y)
            .filter(|node| node.depth.is_leaf())
            .map(|node| node.id.as_str())
    }

    /// `node_id` if it names a laid-out leaf.
    pub fn activate(&self, node_id: &str) -> Option<&str> {
        self.scene
            .as_ref()?
            .position(node_id)
            .filter(|node| node.is_clickable())
            .map(|node| node.id.as_str())
    }
}

impl Default for MindMapEngine {
    fn default() -> Self {
        Self::new()
    }
}
