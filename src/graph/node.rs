//! Bigram nodes: one vertex of the transition graph.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::word::WordType;

/// Canonical key of the bigram `(first, second)`.
pub fn bigram_key(first: &str, second: &str) -> String {
    format!("{first} {second}")
}

/// The rhyme-bearing word of a bigram key: the second word, or the first
/// when the second is a single punctuation character.
pub fn rhyme_word_of_key(key: &str) -> WordType {
    let (first, second) = key.split_once(' ').unwrap_or((key, ""));
    let second = WordType::new(second);
    if second.is_punctuation() {
        WordType::new(first)
    } else {
        second
    }
}

/// A graph vertex: an ordered pair of word types plus outgoing edges.
///
/// Edges are stored as bigram keys, never as node references. The same key
/// may appear several times; multiplicity is the observed transition count
/// and weights sampling accordingly.
#[derive(Debug, Clone)]
pub struct BigramNode {
    bigram: [Arc<WordType>; 2],
    key: String,
    edges: Vec<String>,
    can_end_sentence: OnceLock<bool>,
}

impl BigramNode {
    pub fn new(first: Arc<WordType>, second: Arc<WordType>) -> Self {
        let key = bigram_key(first.as_str(), second.as_str());
        Self {
            bigram: [first, second],
            key,
            edges: Vec::new(),
            can_end_sentence: OnceLock::new(),
        }
    }

    /// The canonical `"first second"` key identifying this node.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn bigram(&self) -> &[Arc<WordType>; 2] {
        &self.bigram
    }

    pub fn first(&self) -> &WordType {
        &self.bigram[0]
    }

    pub fn second(&self) -> &WordType {
        &self.bigram[1]
    }

    pub fn edges(&self) -> &[String] {
        &self.edges
    }

    /// Append an edge to `other`. Duplicates are kept.
    pub fn add_edge(&mut self, other: &BigramNode) {
        self.edges.push(other.key.clone());
    }

    pub(crate) fn push_edge_key(&mut self, key: String) {
        self.edges.push(key);
    }

    /// Whether the bigram's second word ends a sentence. Computed once.
    pub fn can_end_sentence(&self) -> bool {
        *self.can_end_sentence.get_or_init(|| self.second().is_stop())
    }

    /// The word that has to rhyme when this bigram ends a line.
    pub fn rhyme_type(&self) -> &Arc<WordType> {
        if self.bigram[1].is_punctuation() {
            &self.bigram[0]
        } else {
            &self.bigram[1]
        }
    }

    /// Sample one outgoing edge using only this node's edge list.
    ///
    /// Applies the exclusion and rhyme filters of
    /// [`Graph::sample_neighbors`](super::Graph::sample_neighbors), judging
    /// rhymes from the edge keys themselves. Returns `None` when nothing
    /// survives.
    pub fn sample_neighbors<R: Rng + ?Sized>(
        &self,
        exclude: Option<&HashSet<String>>,
        rhyme: Option<&WordType>,
        rng: &mut R,
    ) -> Option<&str> {
        let candidates: Vec<&String> = self
            .edges
            .iter()
            .filter(|edge| exclude.is_none_or(|ex| !ex.contains(edge.as_str())))
            .filter(|edge| rhyme.is_none_or(|r| rhyme_word_of_key(edge).rhymes_with(r)))
            .collect();
        candidates.choose(rng).copied().map(String::as_str)
    }
}

impl PartialEq for BigramNode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.edges == other.edges
    }
}

impl std::fmt::Display for BigramNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}
