//! Textual export: graphviz `digraph` descriptions and plain node/edge dumps.
//!
//! Built on the graph's public read accessors only.

use regex::Regex;
use serde::Serialize;

use crate::{Graph, GraphError, GraphResult};

/// Ordered regex rules attaching attribute text to matching node names.
/// The first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct StyleRules {
    rules: Vec<(Regex, String)>,
}

impl StyleRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build rules from `(pattern, attributes)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStylePattern` for the first pattern that fails to
    /// compile.
    pub fn from_pairs<I, P, A>(pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (P, A)>,
        P: AsRef<str>,
        A: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(), |rules, (pattern, attributes)| {
                rules.with_rule(pattern.as_ref(), attributes)
            })
    }

    /// Build rules from a flat `pattern, attributes, pattern, ...` list. A
    /// dangling trailing pattern is ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStylePattern` for the first pattern that fails to
    /// compile.
    ///
    /// # Examples
    ///
    /// ```
    /// use levelgraph_core::StyleRules;
    ///
    /// let rules = StyleRules::from_flat(&["^test", "[color=red]", "dangling"])?;
    /// assert_eq!(rules.len(), 1);
    /// assert_eq!(rules.attributes_for("test_a"), Some("[color=red]"));
    /// # Ok::<(), levelgraph_core::GraphError>(())
    /// ```
    pub fn from_flat<S: AsRef<str>>(flat: &[S]) -> GraphResult<Self> {
        Self::from_pairs(
            flat.chunks_exact(2)
                .filter_map(|pair| match pair {
                    [pattern, attributes] => {
                        Some((pattern.as_ref(), attributes.as_ref().to_string()))
                    }
                    _ => None,
                }),
        )
    }

    /// Append a rule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStylePattern` if `pattern` fails to compile.
    pub fn with_rule(mut self, pattern: &str, attributes: impl Into<String>) -> GraphResult<Self> {
        let regex = Regex::new(pattern)
            .map_err(|err| GraphError::invalid_style_pattern(pattern, err.to_string()))?;
        self.rules.push((regex, attributes.into()));
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Attribute text of the first rule matching `name`.
    #[must_use]
    pub fn attributes_for(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(regex, _)| regex.is_match(name))
            .map(|(_, attributes)| attributes.as_str())
    }
}

/// Render the graph as a graphviz `digraph`.
///
/// One statement per node in slot order, followed by one statement per
/// edge.
///
/// # Examples
///
/// ```
/// use levelgraph_core::{export, Graph, StyleRules};
///
/// let mut graph = Graph::new();
/// graph.add("a")?;
/// graph.add("b")?;
/// graph.link("a", "b")?;
///
/// let rules = StyleRules::from_flat(&["^a$", "[shape=box]"])?;
/// assert_eq!(
///     export::dot(&graph, &rules),
///     "digraph {\n\t\"a\" [shape=box];\n\t\"b\";\n\t\"a\" -> \"b\";\n}"
/// );
/// # Ok::<(), levelgraph_core::GraphError>(())
/// ```
#[must_use]
pub fn dot(graph: &Graph, styles: &StyleRules) -> String {
    let mut out = String::from("digraph {\n");

    for name in graph.node_names() {
        out.push_str(&format!("\t\"{}\"", escape(name)));
        if let Some(attributes) = styles.attributes_for(name) {
            out.push(' ');
            out.push_str(attributes);
        }
        out.push_str(";\n");
    }

    for (from, to) in graph.edges() {
        out.push_str(&format!("\t\"{}\" -> \"{}\";\n", escape(from), escape(to)));
    }

    out.push('}');
    out
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Plain node and edge listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphDump {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

/// Dump node names and `(from, to)` edge pairs, both in slot order.
#[must_use]
pub fn dump(graph: &Graph) -> GraphDump {
    GraphDump {
        nodes: graph.node_names().map(str::to_string).collect(),
        edges: graph
            .edges()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect(),
    }
}
