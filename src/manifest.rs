//! Graph description files.
//!
//! A manifest lists nodes, edges, style rules and engine settings. TOML is
//! the default format; files ending in `.json` are read as JSON.
//!
//! ```toml
//! nodes = ["fetch", "build", "test"]
//!
//! [graph]
//! max_walk_depth = 50
//!
//! [[edges]]
//! from = "fetch"
//! to = "build"
//!
//! [[styles]]
//! pattern = "^test"
//! attributes = "[color=red]"
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::{Path, PathBuf};

use levelgraph_core::{Graph, GraphConfig, GraphError, StyleRules};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or applying a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read file '{path}': {reason}")]
    FileReadFailed { path: PathBuf, reason: String },

    #[error("TOML parse error: {reason}")]
    TomlParseFailed { reason: String },

    #[error("JSON parse error: {reason}")]
    JsonParseFailed { reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A directed edge in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
}

/// A style rule: node names matching `pattern` get `attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleSpec {
    pub pattern: String,
    pub attributes: String,
}

/// Parsed graph description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub graph: GraphConfig,
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeSpec>,
    pub styles: Vec<StyleSpec>,
}

impl Manifest {
    /// Read and parse a manifest, picking the format from the extension.
    ///
    /// # Errors
    ///
    /// Returns `FileReadFailed` if the file cannot be read, or a parse error
    /// for malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|err| ManifestError::FileReadFailed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), json = is_json, "loading manifest");

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// # Errors
    ///
    /// Returns `TomlParseFailed` for malformed or unknown content.
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|err| ManifestError::TomlParseFailed {
            reason: err.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `JsonParseFailed` for malformed or unknown content.
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|err| ManifestError::JsonParseFailed {
            reason: err.to_string(),
        })
    }

    /// Build the described graph. Edge endpoints must be listed in `nodes`.
    ///
    /// The graph is returned un-evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first graph error: an invalid config, a duplicate node,
    /// an unknown edge endpoint or a self-loop.
    pub fn build(&self) -> Result<Graph, ManifestError> {
        let mut graph = Graph::with_config(self.graph)?;
        for name in &self.nodes {
            graph.add(name.as_str())?;
        }
        for edge in &self.edges {
            graph.link(&edge.from, &edge.to)?;
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph from manifest"
        );
        Ok(graph)
    }

    /// Compile the style rules in file order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStylePattern` for the first bad regex.
    pub fn style_rules(&self) -> Result<StyleRules, ManifestError> {
        let rules = StyleRules::from_pairs(
            self.styles
                .iter()
                .map(|style| (style.pattern.as_str(), style.attributes.as_str())),
        )?;
        Ok(rules)
    }
}
