//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree over laid-out node boxes for pointer
//! hit testing and viewport culling.

mod rtree;

pub use rtree::{IndexedNode, SceneIndex};
