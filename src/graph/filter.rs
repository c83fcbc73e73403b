//! Candidate filters for neighbor sampling.
//!
//! A [`SampleQuery`] describes which constraints apply to one sampling call.
//! It expands into an ordered list of [`EdgeFilter`] stages (exclusion,
//! sentence end, rhyme, then meter), each present only when its parameter is.
//! [`Graph::sample_neighbors`](super::Graph::sample_neighbors) runs them in
//! that order and gives up as soon as a stage leaves nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::meter::{METER_THRESHOLD, MeterScorer};
use crate::word::WordType;

use super::Graph;

/// When the meter stage runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeterScope {
    /// Only together with an active rhyme constraint, i.e. on line-final
    /// candidates that must rhyme.
    #[default]
    Rhymed,
    /// On every candidate whenever a meter and a path are given.
    Every,
}

/// A target stress pattern and the scorer that measures against it.
#[derive(Clone, Copy)]
pub struct MeterTarget<'a> {
    pub pattern: &'a str,
    pub scorer: &'a dyn MeterScorer,
}

/// The constraints for one sampling call.
#[derive(Clone, Copy, Default)]
pub struct SampleQuery<'a> {
    /// Edge keys already tried from this node.
    pub exclude: Option<&'a HashSet<String>>,
    /// Word the candidate's rhyme-bearing word has to rhyme with.
    pub rhyme: Option<&'a WordType>,
    /// Candidate must end a sentence or lead straight into a sentence stop.
    pub final_line: bool,
    /// Rendering of the poem so far, for meter scoring.
    pub path: Option<&'a str>,
    pub meter: Option<MeterTarget<'a>>,
    pub meter_scope: MeterScope,
}

impl<'a> SampleQuery<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, exclude: &'a HashSet<String>) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn rhyme(mut self, rhyme: Option<&'a WordType>) -> Self {
        self.rhyme = rhyme;
        self
    }

    pub fn final_line(mut self, final_line: bool) -> Self {
        self.final_line = final_line;
        self
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn meter(mut self, meter: Option<MeterTarget<'a>>, scope: MeterScope) -> Self {
        self.meter = meter;
        self.meter_scope = scope;
        self
    }

    /// Expand into filter stages, in application order.
    pub fn stages(&self) -> Vec<Box<dyn EdgeFilter + 'a>> {
        let mut stages: Vec<Box<dyn EdgeFilter + 'a>> = Vec::new();
        if let Some(exclude) = self.exclude {
            stages.push(Box::new(Exclude(exclude)));
        }
        if self.final_line {
            stages.push(Box::new(SentenceEnd));
        }
        if let Some(rhyme) = self.rhyme {
            stages.push(Box::new(Rhyme(rhyme)));
        }
        let meter_active = match self.meter_scope {
            MeterScope::Rhymed => self.rhyme.is_some(),
            MeterScope::Every => true,
        };
        if let (Some(target), Some(path), true) = (self.meter, self.path, meter_active) {
            stages.push(Box::new(Meter { path, target }));
        }
        stages
    }
}

/// One predicate stage over candidate edge keys.
pub trait EdgeFilter {
    fn name(&self) -> &'static str;
    fn keep(&self, graph: &Graph, edge: &str) -> bool;
}

struct Exclude<'a>(&'a HashSet<String>);

impl EdgeFilter for Exclude<'_> {
    fn name(&self) -> &'static str {
        "exclude"
    }

    fn keep(&self, _graph: &Graph, edge: &str) -> bool {
        !self.0.contains(edge)
    }
}

/// Keeps nodes that end a sentence, or that have an edge whose bigram starts
/// with a sentence stop (one hop of lookahead).
struct SentenceEnd;

impl EdgeFilter for SentenceEnd {
    fn name(&self) -> &'static str {
        "sentence-end"
    }

    fn keep(&self, graph: &Graph, edge: &str) -> bool {
        let Some(node) = graph.node(edge) else {
            return false;
        };
        node.second().is_stop()
            || node
                .edges()
                .iter()
                .filter_map(|next| graph.node(next))
                .any(|next| next.first().is_stop())
    }
}

struct Rhyme<'a>(&'a WordType);

impl EdgeFilter for Rhyme<'_> {
    fn name(&self) -> &'static str {
        "rhyme"
    }

    fn keep(&self, graph: &Graph, edge: &str) -> bool {
        graph
            .node(edge)
            .is_some_and(|node| node.rhyme_type().rhymes_with(self.0))
    }
}

struct Meter<'a> {
    path: &'a str,
    target: MeterTarget<'a>,
}

impl EdgeFilter for Meter<'_> {
    fn name(&self) -> &'static str {
        "meter"
    }

    fn keep(&self, _graph: &Graph, edge: &str) -> bool {
        let phrase = format!("{} {edge}", self.path);
        self.target
            .scorer
            .meter_with_distance(&phrase, self.target.pattern)
            .distance
            < METER_THRESHOLD
    }
}
