//! Node type and related structures.
//!
//! The mind map is a rooted tree at most three levels deep. Levels are
//! implicit by depth:
//! - depth 0: the source file (root)
//! - depth 1: function groups
//! - depth 2: individual tests, the only clickable leaves

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::error::TreeError;

/// Deepest level a node may occupy.
pub const MAX_DEPTH: usize = 2;

/// Display length of the root label before it is cut short.
pub const ROOT_LABEL_CHARS: usize = 10;

/// Display length of function and test labels before they are cut short.
pub const NODE_LABEL_CHARS: usize = 8;

/// Tree level of a node.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum NodeDepth {
    /// The source file.
    Root = 0,
    /// A function grouping tests.
    Function = 1,
    /// A single test.
    Test = 2,
}

impl NodeDepth {
    /// Map a raw depth to a level, if it is within the tree bounds.
    pub fn from_level(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(Self::Root),
            1 => Some(Self::Function),
            2 => Some(Self::Test),
            _ => None,
        }
    }

    /// Get the raw depth.
    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Only tests are clickable.
    #[inline]
    pub fn is_leaf(self) -> bool {
        self == Self::Test
    }
}

impl From<NodeDepth> for u8 {
    #[inline]
    fn from(depth: NodeDepth) -> Self {
        depth.level()
    }
}

impl fmt::Display for NodeDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Function => write!(f, "function"),
            Self::Test => write!(f, "test"),
        }
    }
}

/// An element of the input tree.
///
/// Deserializes from the JavaScript shape `{ id, label, edgeLabel?, children? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapNode {
    /// Globally unique id within one tree.
    pub id: String,
    /// Display string.
    pub label: String,
    /// Annotation shown on the incoming edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_label: Option<String>,
    /// Ordered children; absent and `null` both mean none.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<MindMapNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<MindMapNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<MindMapNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl MindMapNode {
    /// Create a childless node.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            edge_label: None,
            children: Vec::new(),
        }
    }

    /// Set the incoming edge annotation.
    pub fn with_edge_label(mut self, edge_label: impl Into<String>) -> Self {
        self.edge_label = Some(edge_label.into());
        self
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<MindMapNode>) -> Self {
        self.children = children;
        self
    }

    /// Count this node and all its descendants.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Pre-order traversal yielding `(depth, node)`, starting at this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// Check id uniqueness and the three-level bound.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut seen = HashSet::new();
        for (depth, node) in self.walk() {
            if depth > MAX_DEPTH {
                return Err(TreeError::TooDeep {
                    id: node.id.clone(),
                    depth,
                });
            }
            if !seen.insert(node.id.as_str()) {
                return Err(TreeError::DuplicateId(node.id.clone()));
            }
        }
        Ok(())
    }

    /// Label shortened for drawing inside a node box.
    pub fn display_label(&self, depth: NodeDepth) -> String {
        let max_chars = match depth {
            NodeDepth::Root => ROOT_LABEL_CHARS,
            NodeDepth::Function | NodeDepth::Test => NODE_LABEL_CHARS,
        };
        truncate_label(&self.label, max_chars)
    }
}

/// Pre-order iterator over a tree.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a MindMapNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a MindMapNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Cut a label to `max_chars` characters, appending `...` when shortened.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    match label.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &label[..cut]),
        None => label.to_string(),
    }
}
