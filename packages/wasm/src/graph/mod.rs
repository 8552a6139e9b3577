//! Mind map tree model and per-instance engine.
//!
//! - `node`: the input tree (file → functions → tests)
//! - `edge`: parent→child links produced by a layout pass
//! - `reference`: building the tree from flat test references
//! - `engine`: one rendered graph instance (tree, layout, view, search)

mod edge;
mod engine;
mod error;
mod node;
mod reference;

pub use edge::Edge;
pub use engine::MindMapEngine;
pub use error::TreeError;
pub use node::{MAX_DEPTH, MindMapNode, NODE_LABEL_CHARS, NodeDepth, ROOT_LABEL_CHARS, Walk, truncate_label};
pub use reference::{LineRange, TestReference, build_mind_map, function_node_id, test_node_id};
