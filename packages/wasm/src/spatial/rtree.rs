//! R-tree over laid-out node boxes using the rstar crate.
//!
//! Provides O(log n) scene-space queries for:
//! - Point hit testing (which node box is under the pointer)
//! - Rectangle intersection (which nodes are inside the visible area)

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::graph::NodeDepth;
use crate::layout::LayoutResult;

/// A node box in the spatial index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedNode {
    /// Id of the positioned node.
    pub id: String,
    /// Tree level of the node.
    pub depth: NodeDepth,
    /// Top-left corner.
    pub min: [f32; 2],
    /// Bottom-right corner.
    pub max: [f32; 2],
}

impl IndexedNode {
    /// Box of `width` by `height` centred on `(x, y)`.
    pub fn centred(id: impl Into<String>, depth: NodeDepth, x: f32, y: f32, width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self {
            id: id.into(),
            depth,
            min: [x - hw, y - hh],
            max: [x + hw, y + hh],
        }
    }

    pub fn center(&self) -> [f32; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }

    fn center_distance_2(&self, point: &[f32; 2]) -> f32 {
        let [cx, cy] = self.center();
        let dx = cx - point[0];
        let dy = cy - point[1];
        dx * dx + dy * dy
    }
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for IndexedNode {
    /// Squared distance to the box; zero inside it.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = (self.min[0] - point[0]).max(point[0] - self.max[0]).max(0.0);
        let dy = (self.min[1] - point[1]).max(point[1] - self.max[1]).max(0.0);
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        point[0] >= self.min[0] && point[0] <= self.max[0] && point[1] >= self.min[1] && point[1] <= self.max[1]
    }
}

/// Spatial index for the node boxes of one layout.
///
/// Rebuilt from scratch whenever the layout changes.
pub struct SceneIndex {
    tree: RTree<IndexedNode>,
}

impl SceneIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Index every positioned node of `result` as a `node_width` by `node_height` box.
    pub fn build(result: &LayoutResult, node_width: f32, node_height: f32) -> Self {
        let boxes = result
            .positions
            .iter()
            .filter(|node| node.x.is_finite() && node.y.is_finite())
            .map(|node| IndexedNode::centred(&node.id, node.depth, node.x, node.y, node_width, node_height))
            .collect();
        Self {
            tree: RTree::bulk_load(boxes),
        }
    }

    /// The node box under a scene point.
    ///
    /// When boxes overlap, the one whose centre is closest wins.
    pub fn hit(&self, x: f32, y: f32) -> Option<&IndexedNode> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let point = [x, y];
        self.tree
            .locate_all_at_point(&point)
            .min_by(|a, b| a.center_distance_2(&point).total_cmp(&b.center_distance_2(&point)))
    }

    /// All node boxes intersecting a rectangle.
    pub fn in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<&IndexedNode> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        self.tree.locate_in_envelope_intersecting(&envelope).collect()
    }

    /// Clear all nodes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SceneIndex {
    fn default() -> Self {
        Self::new()
    }
}
