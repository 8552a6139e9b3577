//! Tree validation errors.

use thiserror::Error;

/// Reasons a tree is refused before it reaches the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Two nodes share the same id.
    #[error("duplicate node id `{0}`")]
    DuplicateId(String),

    /// A node sits below the test level.
    #[error("node `{id}` is at depth {depth}, deeper than the test level")]
    TooDeep { id: String, depth: usize },
}
