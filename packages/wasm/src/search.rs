//! Incremental search and highlight.
//!
//! A query matches a node when its label or edge annotation contains the
//! query as a case-insensitive literal substring. The query is trimmed and
//! otherwise taken as-is; pattern metacharacters have no meaning.
//!
//! Highlighting only drives opacity. It never triggers a relayout.

use std::collections::HashSet;

use crate::graph::MindMapNode;

/// Opacity of matching nodes, and of every node when no query is active.
pub const MATCH_OPACITY: f32 = 1.0;

/// Opacity of nodes that do not match an active query.
pub const DIMMED_OPACITY: f32 = 0.3;

/// Ids of every node (root included) matching `query`.
///
/// An empty or whitespace-only query yields an empty set.
pub fn matching_node_ids(root: &MindMapNode, query: &str) -> HashSet<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return HashSet::new();
    }
    root.walk()
        .filter(|(_, node)| node_matches(node, &needle))
        .map(|(_, node)| node.id.clone())
        .collect()
}

fn node_matches(node: &MindMapNode, needle: &str) -> bool {
    node.label.to_lowercase().contains(needle)
        || node
            .edge_label
            .as_deref()
            .is_some_and(|edge_label| edge_label.to_lowercase().contains(needle))
}

/// Current query and its matches for one graph instance.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    matches: HashSet<String>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query and recompute matches against `root`.
    pub fn set_query(&mut self, root: Option<&MindMapNode>, query: &str) {
        self.query = query.trim().to_string();
        self.refresh(root);
    }

    /// Recompute matches after the tree changed; the query is kept.
    pub fn refresh(&mut self, root: Option<&MindMapNode>) {
        self.matches = match root {
            Some(root) => matching_node_ids(root, &self.query),
            None => HashSet::new(),
        };
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
    }

    /// The trimmed query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a non-empty query is applied.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_match(&self, node_id: &str) -> bool {
        self.matches.contains(node_id)
    }

    /// Opacity for `node_id`: full for everything when no query is active.
    pub fn opacity(&self, node_id: &str) -> f32 {
        if !self.is_active() || self.is_match(node_id) {
            MATCH_OPACITY
        } else {
            DIMMED_OPACITY
        }
    }
}
