//! Layout algorithms for the mind map.
//!
//! Each algorithm is a pure function from a tree to absolute node positions
//! plus the parent→child edge list. Layout is recomputed from scratch
//! whenever the tree or the mode changes; nothing is patched incrementally.
//!
//! - `horizontal`: tiered columns (file → functions → tests)
//! - `clustered`: horizontal tiers with functions grouped by leading character
//! - `radial`: concentric rings around the file
//! - `edge_path`: render hints for the connecting edges

pub mod clustered;
pub mod edge_path;
pub mod horizontal;
pub mod radial;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::graph::{Edge, MindMapNode, NodeDepth};

pub use edge_path::{EdgePath, Point, RoutedEdge, route_edges};

/// Which algorithm positions the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Tiered columns, left to right.
    #[default]
    Horizontal,
    /// Concentric rings around the root.
    Radial,
    /// Horizontal tiers with functions grouped by first character.
    Clustered,
}

impl LayoutMode {
    /// All modes, in toolbar order.
    pub const ALL: [LayoutMode; 3] = [Self::Horizontal, Self::Radial, Self::Clustered];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Radial => "radial",
            Self::Clustered => "clustered",
        }
    }

    /// Whether edges are drawn as curves rather than straight segments.
    pub fn uses_curved_edges(self) -> bool {
        !matches!(self, Self::Radial)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a layout mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout mode `{0}`, expected horizontal, radial or clustered")]
pub struct ParseLayoutModeError(pub String);

impl FromStr for LayoutMode {
    type Err = ParseLayoutModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        LayoutMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseLayoutModeError(s.to_string()))
    }
}

/// Geometry shared by all layout algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutMetrics {
    /// Width of a node box.
    pub node_width: f32,
    /// Height of a node box.
    pub node_height: f32,
    /// Horizontal distance between tiers.
    pub tier_spacing: f32,
    /// Vertical distance between sibling slots.
    pub sibling_spacing: f32,
    /// Outer padding around the scene.
    pub padding: f32,
    /// Smallest scene height for tiered layouts.
    pub min_height: f32,
    /// Radius of the function ring in radial mode.
    pub ring_radius: f32,
    /// Extra radius of the test ring beyond the function ring.
    pub outer_ring_offset: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 50.0,
            tier_spacing: 400.0,
            sibling_spacing: 80.0,
            padding: 50.0,
            min_height: 400.0,
            ring_radius: 250.0,
            outer_ring_offset: 220.0,
        }
    }
}

impl LayoutMetrics {
    /// Radius of the test ring in radial mode.
    pub fn outer_ring_radius(&self) -> f32 {
        self.ring_radius + self.outer_ring_offset
    }
}

/// A node placed in scene space. `x`/`y` is the centre of its box.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_label: Option<String>,
    pub x: f32,
    pub y: f32,
    pub is_root: bool,
    pub depth: NodeDepth,
}

impl PositionedNode {
    pub fn new(node: &MindMapNode, depth: NodeDepth, x: f32, y: f32) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            edge_label: node.edge_label.clone(),
            x,
            y,
            is_root: depth == NodeDepth::Root,
            depth,
        }
    }

    /// Only tests respond to clicks.
    #[inline]
    pub fn is_clickable(&self) -> bool {
        self.depth.is_leaf()
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    /// Mode that produced this result.
    pub mode: LayoutMode,
    /// Scene bounding box width.
    pub width: f32,
    /// Scene bounding box height.
    pub height: f32,
    /// Root first, then each function followed by its tests.
    pub positions: Vec<PositionedNode>,
    /// One edge per non-root node, from its parent.
    pub edges: Vec<Edge>,
}

impl LayoutResult {
    /// Look up a positioned node by id.
    pub fn position(&self, id: &str) -> Option<&PositionedNode> {
        self.positions.iter().find(|node| node.id == id)
    }

    /// The single root entry.
    pub fn root(&self) -> Option<&PositionedNode> {
        self.positions.iter().find(|node| node.is_root)
    }

    /// Number of positioned nodes.
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }
}

/// Whether any function has tests, which adds a third tier or ring.
pub(crate) fn has_grandchildren(root: &MindMapNode) -> bool {
    root.children.iter().any(|child| !child.children.is_empty())
}

/// The layout engine.
#[derive(Debug, Clone, Default)]
pub struct MindMapLayout {
    metrics: LayoutMetrics,
}

impl MindMapLayout {
    /// Create a layout engine with the given metrics.
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self { metrics }
    }

    /// Create a layout engine with the reference metrics.
    pub fn with_defaults() -> Self {
        Self::new(LayoutMetrics::default())
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Position every node of `root` using `mode`.
    ///
    /// Deterministic: the same tree and mode always give the same result.
    /// Nodes below the test level are not laid out.
    pub fn compute(&self, root: &MindMapNode, mode: LayoutMode) -> LayoutResult {
        let result = match mode {
            LayoutMode::Horizontal => horizontal::layout(root, &self.metrics),
            LayoutMode::Clustered => clustered::layout(root, &self.metrics),
            LayoutMode::Radial => radial::layout(root, &self.metrics),
        };

        tracing::debug!(
            mode = %mode,
            nodes = result.positions.len(),
            width = result.width,
            height = result.height,
            "computed mind map layout"
        );

        result
    }
}

/// Lay out `root` with the reference metrics.
pub fn compute_layout(root: &MindMapNode, mode: LayoutMode) -> LayoutResult {
    MindMapLayout::with_defaults().compute(root, mode)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use petgraph::graph::UnGraph;
    use std::collections::HashMap;

    /// A file with uneven functions: some with tests, one without.
    pub(crate) fn sample_tree() -> MindMapNode {
        MindMapNode::new("src/cache.rs", "cache.rs").with_children(vec![
            MindMapNode::new("func:src/cache.rs:get", "get").with_children(vec![
                MindMapNode::new("tests/cache.rs:get_hit", "get_hit").with_edge_label("hit"),
                MindMapNode::new("tests/cache.rs:get_miss", "get_miss"),
                MindMapNode::new("tests/cache.rs:get_expired", "get_expired"),
            ]),
            MindMapNode::new("func:src/cache.rs:put", "put").with_children(vec![
                MindMapNode::new("tests/cache.rs:put_new", "put_new"),
            ]),
            MindMapNode::new("func:src/cache.rs:evict", "evict"),
            MindMapNode::new("func:src/cache.rs:Clear", "Clear").with_children(vec![
                MindMapNode::new("tests/cache.rs:clear_all", "clear_all"),
                MindMapNode::new("tests/cache.rs:clear_empty", "clear_empty"),
            ]),
        ])
    }

    fn trees() -> Vec<MindMapNode> {
        vec![
            MindMapNode::new("empty.rs", "empty.rs"),
            MindMapNode::new("flat.rs", "flat.rs").with_children(vec![
                MindMapNode::new("f1", "alpha"),
                MindMapNode::new("f2", "beta"),
            ]),
            sample_tree(),
        ]
    }

    /// Build an undirected petgraph from the edge list, failing if an
    /// endpoint is not positioned.
    fn edge_graph(result: &LayoutResult) -> UnGraph<&str, ()> {
        let mut graph = UnGraph::new_undirected();
        let index: HashMap<&str, _> = result
            .positions
            .iter()
            .map(|node| (node.id.as_str(), graph.add_node(node.id.as_str())))
            .collect();
        for edge in &result.edges {
            let from = index[edge.from_id.as_str()];
            let to = index[edge.to_id.as_str()];
            graph.add_edge(from, to, ());
        }
        graph
    }

    #[test]
    fn test_exactly_one_root_matching_input() {
        for tree in trees() {
            for mode in LayoutMode::ALL {
                let result = compute_layout(&tree, mode);
                let roots: Vec<_> = result.positions.iter().filter(|n| n.is_root).collect();
                assert_eq!(roots.len(), 1, "{mode}: expected one root");
                assert_eq!(roots[0].id, tree.id);
                assert_eq!(roots[0].depth, NodeDepth::Root);
            }
        }
    }

    #[test]
    fn test_counts_match_tree() {
        for tree in trees() {
            let total = tree.node_count();
            for mode in LayoutMode::ALL {
                let result = compute_layout(&tree, mode);
                assert_eq!(result.node_count(), total, "{mode}: node count");
                assert_eq!(result.edges.len(), total - 1, "{mode}: edge count");
            }
        }
    }

    #[test]
    fn test_edges_form_single_tree() {
        let tree = sample_tree();
        for mode in LayoutMode::ALL {
            let result = compute_layout(&tree, mode);
            let graph = edge_graph(&result);
            assert_eq!(connected_components(&graph), 1, "{mode}: connected");
            assert!(!is_cyclic_undirected(&graph), "{mode}: acyclic");
        }
    }

    #[test]
    fn test_deterministic() {
        let tree = sample_tree();
        for mode in LayoutMode::ALL {
            assert_eq!(compute_layout(&tree, mode), compute_layout(&tree, mode));
        }
    }

    #[test]
    fn test_depths_follow_tree_levels() {
        let result = compute_layout(&sample_tree(), LayoutMode::Horizontal);
        let get = result.position("func:src/cache.rs:get").unwrap();
        let hit = result.position("tests/cache.rs:get_hit").unwrap();
        assert_eq!(get.depth, NodeDepth::Function);
        assert_eq!(hit.depth, NodeDepth::Test);
        assert!(hit.is_clickable());
        assert!(!get.is_clickable());
        assert_eq!(hit.edge_label.as_deref(), Some("hit"));
    }

    #[test]
    fn test_empty_tree_has_valid_bounds_in_every_mode() {
        let tree = MindMapNode::new("empty.rs", "empty.rs");
        for mode in LayoutMode::ALL {
            let result = compute_layout(&tree, mode);
            assert_eq!(result.positions.len(), 1);
            assert!(result.edges.is_empty());
            assert!(result.height >= 400.0, "{mode}: height {}", result.height);
            assert!(result.width > 0.0);
            let root = result.root().unwrap();
            assert!(root.x.is_finite() && root.y.is_finite());
        }
    }

    #[test]
    fn test_deeper_nodes_are_not_laid_out() {
        let tree = MindMapNode::new("r", "r").with_children(vec![
            MindMapNode::new("f", "f").with_children(vec![
                MindMapNode::new("t", "t").with_children(vec![MindMapNode::new("x", "x")]),
            ]),
        ]);
        let result = compute_layout(&tree, LayoutMode::Horizontal);
        assert_eq!(result.node_count(), 3);
        assert!(result.position("x").is_none());
    }

    #[test]
    fn test_parse_layout_mode() {
        assert_eq!("radial".parse::<LayoutMode>(), Ok(LayoutMode::Radial));
        assert_eq!(" Clustered ".parse::<LayoutMode>(), Ok(LayoutMode::Clustered));
        assert_eq!(
            "force".parse::<LayoutMode>(),
            Err(ParseLayoutModeError("force".to_string()))
        );
        assert_eq!(LayoutMode::default(), LayoutMode::Horizontal);
        assert_eq!(LayoutMode::Horizontal.to_string(), "horizontal");
    }

    #[test]
    fn test_result_serializes_for_js() {
        let result = compute_layout(&sample_tree(), LayoutMode::Radial);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "radial");
        assert_eq!(json["positions"][0]["isRoot"], true);
        assert_eq!(json["positions"][0]["depth"], 0);
        assert!(json["positions"][0].get("edgeLabel").is_none());
    }
}
