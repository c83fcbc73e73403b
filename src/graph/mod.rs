//! Bigram graph: word-pair transitions learned from a corpus.
//!
//! The [`Graph`] is an arena of [`BigramNode`]s keyed by their canonical
//! `"first second"` string, plus a registry that shares one [`WordType`] per
//! distinct token. Edges are keys into the arena, which keeps cycles cheap
//! and the persisted format flat.
//!
//! - **Building** ([`Graph::extend_from_tokens`]): bigrams are linked at
//!   stride two, so a walk emits each token exactly once
//! - **Sampling** ([`Graph::sample_neighbors`]): uniform choice over the edge
//!   multiset after the filter stages in [`filter`]
//! - **Persistence** ([`snapshot`]): two-pass JSON load, flat JSON save

pub mod filter;
pub mod node;
pub mod snapshot;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::word::WordType;

pub use filter::{EdgeFilter, MeterScope, MeterTarget, SampleQuery};
pub use node::{BigramNode, bigram_key};
pub use snapshot::{GraphSnapshot, NodeSnapshot};

/// Summary counts for a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub types: usize,
    pub edges: usize,
    pub starts: usize,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nodes: {}, types: {}, edges: {}, sentence starts: {}",
            self.nodes, self.types, self.edges, self.starts
        )
    }
}

/// The bigram transition graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<String, BigramNode>,
    types: BTreeMap<String, Arc<WordType>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a single token sequence.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut graph = Self::new();
        graph.extend_from_tokens(tokens);
        graph
    }

    pub fn node(&self, key: &str) -> Option<&BigramNode> {
        self.nodes.get(key)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &BigramNode> {
        self.nodes.values()
    }

    pub fn word_type(&self, string: &str) -> Option<&Arc<WordType>> {
        self.types.get(string)
    }

    pub fn types(&self) -> impl Iterator<Item = &Arc<WordType>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the shared type for `string`, registering it on first use.
    pub fn intern(&mut self, string: &str) -> Arc<WordType> {
        Arc::clone(
            self.types
                .entry(string.to_string())
                .or_insert_with(|| Arc::new(WordType::new(string))),
        )
    }

    /// Windows of two tokens, step one; the last window is padded with `""`.
    pub fn bigrams_from_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<(String, String)> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let next = tokens.get(i + 1).map(|n| n.as_ref()).unwrap_or("");
                (t.as_ref().to_string(), next.to_string())
            })
            .collect()
    }

    /// Add the transitions of a token sequence to the graph.
    ///
    /// Each bigram except the last two gets an edge to the bigram two
    /// positions ahead: `the cat` links to `sat on`, not to `cat sat`.
    /// Existing nodes are reused, so repeated transitions add repeated edges.
    pub fn extend_from_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let bigrams = Self::bigrams_from_tokens(tokens);
        let before = self.nodes.len();
        let mut added_edges = 0usize;

        for i in 0..bigrams.len().saturating_sub(2) {
            let current = self.ensure_node(&bigrams[i]);
            let next = self.ensure_node(&bigrams[i + 2]);
            if let Some(node) = self.nodes.get_mut(&current) {
                node.push_edge_key(next);
                added_edges += 1;
            }
        }

        tracing::info!(
            tokens = tokens.len(),
            new_nodes = self.nodes.len() - before,
            new_edges = added_edges,
            "extended bigram graph"
        );
    }

    /// Materialize (or reuse) the node for a bigram and return its key.
    fn ensure_node(&mut self, (first, second): &(String, String)) -> String {
        let key = bigram_key(first, second);
        if !self.nodes.contains_key(&key) {
            let a = self.intern(first);
            let b = self.intern(second);
            self.nodes.insert(key.clone(), BigramNode::new(a, b));
        }
        key
    }

    /// Deduplicated, sorted keys reachable in one step from any node that
    /// can end a sentence: plausible sentence-initial bigrams.
    pub fn sentence_starts(&self) -> Vec<String> {
        self.nodes
            .values()
            .filter(|node| node.can_end_sentence())
            .flat_map(|node| node.edges().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            types: self.types.len(),
            edges: self.nodes.values().map(|n| n.edges().len()).sum(),
            starts: self.sentence_starts().len(),
        }
    }

    /// Pick one outgoing edge of `node` that survives every stage of `query`.
    ///
    /// Returns `None` when the node is absent, has no edges, or a stage
    /// eliminates all candidates. Surviving keys are chosen uniformly from
    /// the multiset, so frequent transitions stay more likely.
    pub fn sample_neighbors<R: Rng + ?Sized>(
        &self,
        node: Option<&BigramNode>,
        query: &SampleQuery<'_>,
        rng: &mut R,
    ) -> Option<String> {
        let node = node?;
        let mut candidates: Vec<&String> = node.edges().iter().collect();
        if candidates.is_empty() {
            return None;
        }
        for stage in query.stages() {
            candidates.retain(|edge| stage.keep(self, edge));
            if candidates.is_empty() {
                tracing::trace!(node = %node, stage = stage.name(), "no candidate");
                return None;
            }
        }
        candidates.choose(rng).map(|edge| (*edge).clone())
    }

    /// [`sample_neighbors`](Self::sample_neighbors) starting from a key.
    pub fn sample_from<R: Rng + ?Sized>(
        &self,
        key: &str,
        query: &SampleQuery<'_>,
        rng: &mut R,
    ) -> Option<String> {
        self.sample_neighbors(self.node(key), query, rng)
    }
}
