//! Edge type.
//!
//! Edges connect a node to its immediate parent only. Both endpoints are
//! node ids that must exist in the position list of the same layout pass.

use serde::Serialize;
use std::fmt;

/// A parent→child link between two positioned nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Parent node id.
    pub from_id: String,
    /// Child node id.
    pub to_id: String,
}

impl Edge {
    /// Create a new edge from parent to child.
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from_id, self.to_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_display() {
        let edge = Edge::new("src/lib.rs", "func:src/lib.rs:parse");
        assert_eq!(format!("{}", edge), "src/lib.rs -> func:src/lib.rs:parse");
    }

    #[test]
    fn test_edge_serializes_camel_case() {
        let edge = Edge::new("a", "b");
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["fromId"], "a");
        assert_eq!(json["toId"], "b");
    }
}
