//! Graph persistence: flat JSON snapshots.
//!
//! Format:
//! ```json
//! { "types": ["the", "cat", ...],
//!   "nodes": [ { "bigram": ["the", "cat"], "edges": ["sat on"] }, ... ] }
//! ```
//!
//! Loading is two-pass: every node is created before any edge is wired, so
//! edges may point forward. Edges naming unknown nodes are dropped.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

use super::{BigramNode, Graph};

/// Serialized form of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub bigram: [String; 2],
    pub edges: Vec<String>,
}

/// Serialized form of a whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub types: Vec<String>,
    pub nodes: Vec<NodeSnapshot>,
}

/// Location of the graph named `name` under `data_dir`.
pub fn graph_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{name}.json"))
}

impl Graph {
    /// Capture the graph as a snapshot. Fails on an empty graph.
    pub fn serialize(&self) -> GraphResult<GraphSnapshot> {
        if self.nodes.is_empty() {
            return Err(GraphError::EmptyGraph { what: "nodes" });
        }
        if self.types.is_empty() {
            return Err(GraphError::EmptyGraph { what: "types" });
        }
        Ok(GraphSnapshot {
            types: self.types.keys().cloned().collect(),
            nodes: self
                .nodes
                .values()
                .map(|node| NodeSnapshot {
                    bigram: [
                        node.first().as_str().to_string(),
                        node.second().as_str().to_string(),
                    ],
                    edges: node.edges().to_vec(),
                })
                .collect(),
        })
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// Registers types, then creates all nodes, then wires edges. A bigram
    /// naming a word missing from `types` is an [`GraphError::InvalidArgument`].
    pub fn deserialize(snapshot: &GraphSnapshot) -> GraphResult<Self> {
        let mut graph = Graph::new();
        for t in &snapshot.types {
            graph.intern(t);
        }

        for n in &snapshot.nodes {
            let lookup = |word: &str| {
                graph
                    .word_type(word)
                    .cloned()
                    .ok_or_else(|| GraphError::InvalidArgument {
                        message: format!("{word:?} is not a registered word type"),
                    })
            };
            let first = lookup(&n.bigram[0])?;
            let second = lookup(&n.bigram[1])?;
            let node = BigramNode::new(first, second);
            graph.nodes.entry(node.key().to_string()).or_insert(node);
        }

        let mut dropped = 0usize;
        for n in &snapshot.nodes {
            let key = super::bigram_key(&n.bigram[0], &n.bigram[1]);
            let known: Vec<String> = n
                .edges
                .iter()
                .filter(|e| graph.nodes.contains_key(e.as_str()))
                .cloned()
                .collect();
            dropped += n.edges.len() - known.len();
            if let Some(node) = graph.nodes.get_mut(&key) {
                for edge in known {
                    node.push_edge_key(edge);
                }
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "dropped edges to unknown nodes");
        }

        Ok(graph)
    }

    pub fn to_json(&self) -> GraphResult<String> {
        let snapshot = self.serialize()?;
        serde_json::to_string(&snapshot).map_err(|e| GraphError::Parse {
            path: "<memory>".into(),
            message: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> GraphResult<Self> {
        let snapshot: GraphSnapshot = serde_json::from_str(json).map_err(|e| GraphError::Parse {
            path: "<memory>".into(),
            message: e.to_string(),
        })?;
        Self::deserialize(&snapshot)
    }

    /// Write the graph to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> GraphResult<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| GraphError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| GraphError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), nodes = self.len(), "saved graph");
        Ok(())
    }

    /// Read a graph from `path`.
    pub fn load(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot: GraphSnapshot =
            serde_json::from_str(&content).map_err(|e| GraphError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let graph = Self::deserialize(&snapshot)?;
        tracing::info!(path = %path.display(), nodes = graph.len(), "loaded graph");
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(json: &str) -> GraphSnapshot {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_graph_refuses_to_serialize() {
        let err = Graph::new().serialize().unwrap_err();
        assert!(matches!(err, GraphError::EmptyGraph { what: "nodes" }));
    }

    #[test]
    fn round_trip_preserves_structure() {
        let g = Graph::from_tokens(&["a", "b", "c", "d", "a", "b", "c", "d", "."]);
        let back = Graph::deserialize(&g.serialize().unwrap()).unwrap();
        assert_eq!(back.len(), g.len());
        for node in g.nodes() {
            let other = back.node(node.key()).unwrap();
            assert_eq!(other.bigram(), node.bigram());
            assert_eq!(other.edges(), node.edges());
        }
        assert_eq!(back.types().count(), g.types().count());
    }

    #[test]
    fn forward_edges_are_wired() {
        let g = Graph::deserialize(&snapshot(
            r#"{"types": ["a", "b", "c"],
                "nodes": [{"bigram": ["a", "b"], "edges": ["b c"]},
                          {"bigram": ["b", "c"], "edges": []}]}"#,
        ))
        .unwrap();
        assert_eq!(g.node("a b").unwrap().edges(), ["b c"]);
    }

    #[test]
    fn unknown_edges_are_dropped() {
        let g = Graph::deserialize(&snapshot(
            r#"{"types": ["a", "b"],
                "nodes": [{"bigram": ["a", "b"], "edges": ["b a", "a b", "nope"]}]}"#,
        ))
        .unwrap();
        assert_eq!(g.node("a b").unwrap().edges(), ["a b"]);
    }

    #[test]
    fn unregistered_type_is_invalid_argument() {
        let err = Graph::deserialize(&snapshot(
            r#"{"types": ["a"], "nodes": [{"bigram": ["a", "ghost"], "edges": []}]}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            Graph::from_json("{\"types\": 3}"),
            Err(GraphError::Parse { .. })
        ));
    }

    #[test]
    fn graph_path_uses_name() {
        assert_eq!(
            graph_path(Path::new("data"), "sonnets"),
            PathBuf::from("data/sonnets.json")
        );
    }
}
