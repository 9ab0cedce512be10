//! Engine configuration.
//!
//! The only tunable is the walk-length safety cap used by evaluation. It is
//! a resource guard against runaway graphs, not a meaningful depth.

use serde::{Deserialize, Serialize};

use crate::{GraphError, GraphResult};

/// Default walk-length cap: evaluation gives up if walks of this length
/// still exist.
pub const DEFAULT_MAX_WALK_DEPTH: usize = 99;

/// Configuration for a [`Graph`](crate::Graph).
///
/// # Examples
///
/// ```
/// use levelgraph_core::GraphConfig;
///
/// let config = GraphConfig::default();
/// assert_eq!(config.max_walk_depth, 99);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Longest walk length evaluation will look for before failing with
    /// `MaxWalkDepthExceeded`.
    pub max_walk_depth: usize,
}

impl GraphConfig {
    #[must_use]
    pub const fn with_max_walk_depth(max_walk_depth: usize) -> Self {
        Self { max_walk_depth }
    }

    /// Check the config is usable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when `max_walk_depth` is zero.
    pub fn validate(&self) -> GraphResult<()> {
        if self.max_walk_depth == 0 {
            return Err(GraphError::invalid_config(
                "max_walk_depth must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_walk_depth: DEFAULT_MAX_WALK_DEPTH,
        }
    }
}
