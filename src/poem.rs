//! Poem generation: a randomized depth-first walk over the bigram graph.
//!
//! The search keeps an explicit stack of [`Frame`]s. Each step samples one
//! edge from the node on top of the stack under the constraints of the
//! current line position, then either pushes the result or pops the top frame
//! (chronological backtracking). Every frame remembers the edges already
//! tried from it, so a failed branch is never re-entered from the same frame.
//! When the stack empties, the walk restarts from an unused sentence start;
//! when none remain, the run fails with [`PoemError::ExhaustedStarts`].
//!
//! Line `i` completes when the step pushes the frame that makes the path
//! length a multiple of the line length. Completing steps add the rhyme
//! constraint (the rhyme word of the first line sharing the scheme label),
//! the sentence-end constraint on the last line, and the meter constraint.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::Rng;

use crate::config::PoemConfig;
use crate::error::{PoemError, PoemResult};
use crate::graph::{Graph, MeterScope, MeterTarget, SampleQuery};
use crate::meter::{MeterScorer, StressMeter};
use crate::word::WordType;

/// One bigram on the search stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Key of the node this frame stands on.
    pub key: String,
    /// Edges already tried from this frame.
    pub excluded: HashSet<String>,
    /// Whether this bigram ends a line.
    pub line_end: bool,
    /// Rhyme class whose target this frame established, if any.
    pub anchors: Option<String>,
}

impl Frame {
    fn new(key: String, line_end: bool) -> Self {
        Self {
            key,
            excluded: HashSet::new(),
            line_end,
            anchors: None,
        }
    }
}

/// Shape and search limits for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PoemOptions {
    pub line_length: usize,
    pub scheme: Vec<String>,
    pub meter: Option<String>,
    pub meter_scope: MeterScope,
    pub max_steps: Option<u64>,
}

impl PoemOptions {
    /// Options with no meter and no step budget.
    pub fn new(line_length: usize, scheme: Vec<String>) -> Self {
        Self {
            line_length,
            scheme,
            meter: None,
            meter_scope: MeterScope::default(),
            max_steps: None,
        }
    }

    pub fn with_meter(mut self, meter: impl Into<String>, scope: MeterScope) -> Self {
        self.meter = Some(meter.into());
        self.meter_scope = scope;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

impl From<&PoemConfig> for PoemOptions {
    fn from(config: &PoemConfig) -> Self {
        Self {
            line_length: config.line_length,
            scheme: config.scheme.clone(),
            meter: config.meter.clone().filter(|m| !m.is_empty()),
            meter_scope: config.meter_scope,
            max_steps: config.max_steps,
        }
    }
}

/// A single generation run over a borrowed graph.
pub struct Poem<'g, R: Rng> {
    graph: &'g Graph,
    options: PoemOptions,
    scorer: Box<dyn MeterScorer>,
    rng: R,
    rhyme_targets: HashMap<String, Arc<WordType>>,
    path: Vec<Frame>,
    starts: Vec<String>,
    line_count: usize,
    attempts: usize,
    steps: u64,
}

impl<'g, R: Rng> Poem<'g, R> {
    /// Set up a run: collect sentence starts and stand on a random one.
    pub fn new(graph: &'g Graph, options: PoemOptions, rng: R) -> PoemResult<Self> {
        if options.line_length == 0 {
            return Err(PoemError::InvalidArgument {
                message: "line length must be at least 1".into(),
            });
        }
        if options.scheme.is_empty() {
            return Err(PoemError::InvalidArgument {
                message: "rhyme scheme is empty".into(),
            });
        }

        let mut poem = Self {
            graph,
            options,
            scorer: Box::new(StressMeter),
            rng,
            rhyme_targets: HashMap::new(),
            path: Vec::new(),
            starts: graph.sentence_starts(),
            line_count: 0,
            attempts: 0,
            steps: 0,
        };
        tracing::debug!(starts = poem.starts.len(), "collected sentence starts");
        poem.restart();
        Ok(poem)
    }

    /// Replace the meter scorer.
    pub fn with_scorer(mut self, scorer: Box<dyn MeterScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn path(&self) -> &[Frame] {
        &self.path
    }

    pub fn starts(&self) -> &[String] {
        &self.starts
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn rhyme_targets(&self) -> &HashMap<String, Arc<WordType>> {
        &self.rhyme_targets
    }

    /// Number of starting bigrams tried so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Put a fresh start frame on an empty stack. Returns `false` when the
    /// start pool is exhausted.
    fn restart(&mut self) -> bool {
        if self.starts.is_empty() {
            return false;
        }
        let index = self.rng.gen_range(0..self.starts.len());
        let key = self.starts.swap_remove(index);
        tracing::debug!(start = %key, remaining = self.starts.len(), "starting walk");
        self.rhyme_targets.clear();
        self.path = vec![Frame::new(key, false)];
        self.line_count = 0;
        self.attempts += 1;
        true
    }

    /// Render the path: bigrams separated by spaces, one line per line end.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for frame in &self.path {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push(' ');
            }
            out.push_str(frame.key.trim_end());
            if frame.line_end {
                out.push('\n');
            }
        }
        out.trim_end().to_string()
    }

    /// The word the line being completed has to rhyme with.
    ///
    /// Looks up the first line carrying the same scheme label; if that line
    /// is already on the path, its final bigram's rhyme word is the target.
    /// `None` when this is the first line of its class.
    pub fn get_rhyme(&self) -> Option<Arc<WordType>> {
        let label = self.options.scheme.get(self.line_count)?;
        let first = self.options.scheme.iter().position(|l| l == label)?;
        if first >= self.line_count {
            return None;
        }
        let frame = self.path.iter().filter(|f| f.line_end).nth(first)?;
        let node = self.graph.node(&frame.key)?;
        Some(Arc::clone(node.rhyme_type()))
    }

    /// Run the search to completion.
    pub fn generate(&mut self) -> PoemResult<String> {
        self.generate_traced(|_| {})
    }

    /// Run the search, handing every intermediate rendering to `observer`.
    pub fn generate_traced(&mut self, mut observer: impl FnMut(&str)) -> PoemResult<String> {
        while self.line_count < self.options.scheme.len() {
            if let Some(max) = self.options.max_steps {
                if self.steps >= max {
                    return Err(PoemError::StepBudgetExhausted { steps: max });
                }
            }
            self.steps += 1;

            if self.path.is_empty() && !self.restart() {
                tracing::info!(attempts = self.attempts, "no valid poem found");
                return Err(PoemError::ExhaustedStarts {
                    attempts: self.attempts,
                });
            }

            self.step();
            self.line_count = self.path.iter().filter(|f| f.line_end).count();

            let rendered = self.render();
            tracing::trace!(depth = self.path.len(), lines = self.line_count, "step");
            observer(&rendered);
        }

        tracing::info!(
            steps = self.steps,
            attempts = self.attempts,
            lines = self.line_count,
            "poem complete"
        );
        Ok(self.render())
    }

    /// Extend the path by one bigram, or backtrack one.
    fn step(&mut self) {
        let Some(top) = self.path.last() else {
            return;
        };
        let completes_line = (self.path.len() + 1) % self.options.line_length == 0;
        let final_line = self.line_count + 1 == self.options.scheme.len();
        let label = self.options.scheme[self.line_count].clone();

        let rendered = self.render();
        let rhyme = if completes_line { self.get_rhyme() } else { None };
        let meter = self.options.meter.as_deref().map(|pattern| MeterTarget {
            pattern,
            scorer: self.scorer.as_ref(),
        });

        let mut query = SampleQuery::new()
            .exclude(&top.excluded)
            .path(&rendered)
            .meter(meter, self.options.meter_scope);
        if completes_line {
            query = query.rhyme(rhyme.as_deref()).final_line(final_line);
        }
        let next = self.graph.sample_from(&top.key, &query, &mut self.rng);

        match next {
            Some(key) => {
                let mut frame = Frame::new(key.clone(), completes_line);
                if completes_line && !self.rhyme_targets.contains_key(&label) {
                    if let Some(node) = self.graph.node(&key) {
                        self.rhyme_targets
                            .insert(label.clone(), Arc::clone(node.rhyme_type()));
                        frame.anchors = Some(label);
                    }
                }
                if let Some(top) = self.path.last_mut() {
                    top.excluded.insert(key);
                }
                self.path.push(frame);
            }
            None => {
                if completes_line {
                    let anchored = self
                        .path
                        .iter()
                        .any(|f| f.anchors.as_deref() == Some(label.as_str()));
                    if !anchored {
                        self.rhyme_targets.remove(&label);
                    }
                }
                if let Some(popped) = self.path.pop() {
                    tracing::trace!(dead_end = %popped.key, "backtracking");
                    if let Some(anchor) = popped.anchors {
                        self.rhyme_targets.remove(&anchor);
                    }
                }
            }
        }
    }
}
