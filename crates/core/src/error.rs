//! Graph error types.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.

use thiserror::Error;

/// Error type for every fallible graph operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("the node {0} does not exist")]
    NodeNotFound(String),

    #[error("the node {0} already exists")]
    DuplicateNode(String),

    #[error("cannot rename to {0}: a node with that name already exists")]
    NodeAlreadyExists(String),

    #[error("self-loop rejected on node {0}")]
    SelfLoop(String),

    #[error("graph is cyclical: node {node} lies on a directed cycle")]
    CyclicGraph { node: String },

    #[error("max walk depth reached: no walk length up to {depth} exhausted the graph")]
    MaxWalkDepthExceeded { depth: usize },

    #[error("graph has changed since the last evaluation")]
    NotEvaluated,

    #[error("invalid style pattern '{pattern}': {reason}")]
    InvalidStylePattern { pattern: String, reason: String },

    #[error("invalid graph config: {reason}")]
    InvalidConfig { reason: String },
}

impl GraphError {
    pub fn node_not_found(name: impl Into<String>) -> Self {
        Self::NodeNotFound(name.into())
    }

    pub fn duplicate_node(name: impl Into<String>) -> Self {
        Self::DuplicateNode(name.into())
    }

    pub fn node_already_exists(name: impl Into<String>) -> Self {
        Self::NodeAlreadyExists(name.into())
    }

    pub fn self_loop(name: impl Into<String>) -> Self {
        Self::SelfLoop(name.into())
    }

    pub fn cyclic(node: impl Into<String>) -> Self {
        Self::CyclicGraph { node: node.into() }
    }

    pub fn invalid_style_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStylePattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
