//! Clustered layout.
//!
//! A grouping refinement of the horizontal layout: functions are grouped by
//! the first character of their label (case-insensitive), groups are ordered
//! by key, and one empty slot separates consecutive groups. Any non-letter
//! leading character forms its own key; an empty label has the empty key.

use std::collections::BTreeMap;

use super::{LayoutMetrics, LayoutMode, LayoutResult, horizontal};
use crate::graph::MindMapNode;

/// Cluster key for a label.
pub fn cluster_key(label: &str) -> String {
    label
        .chars()
        .next()
        .map(|first| first.to_lowercase().collect())
        .unwrap_or_default()
}

/// Functions of `root` grouped by cluster key, in key order.
///
/// Members keep their input order within a cluster.
pub fn clusters(root: &MindMapNode) -> Vec<(String, Vec<&MindMapNode>)> {
    let mut by_key: BTreeMap<String, Vec<&MindMapNode>> = BTreeMap::new();
    for function in &root.children {
        by_key
            .entry(cluster_key(&function.label))
            .or_default()
            .push(function);
    }
    by_key.into_iter().collect()
}

/// Lay out `root` with functions clustered by leading character.
pub fn layout(root: &MindMapNode, metrics: &LayoutMetrics) -> LayoutResult {
    let groups: Vec<Vec<&MindMapNode>> = clusters(root)
        .into_iter()
        .map(|(_, members)| members)
        .collect();
    horizontal::layout_groups(root, &groups, metrics, LayoutMode::Clustered)
}
