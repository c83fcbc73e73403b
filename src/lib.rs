//! # prosody
//!
//! Poem generation by constrained random walks over a bigram graph.
//!
//! ## Architecture
//!
//! - **Tokenizer** (`tokenize`): corpus text to word and punctuation tokens
//! - **Word types** (`word`, `phonetics`): stop words, rhyme tails, syllable stress
//! - **Meter** (`meter`): scansion of a phrase against a `0`/`1` stress pattern
//! - **Bigram graph** (`graph`): stride-two transitions, filtered sampling, JSON snapshots
//! - **Poem search** (`poem`): backtracking walk under line, rhyme, meter and sentence constraints
//! - **Configuration** (`config`): TOML settings shared by the CLI
//!
//! ## Library usage
//!
//! ```no_run
//! use prosody::graph::Graph;
//! use prosody::poem::{Poem, PoemOptions};
//! use prosody::tokenize::tokenize;
//! use rand::SeedableRng;
//!
//! let tokens = tokenize("The cat sat on the mat. The bat flew by the hat.");
//! let graph = Graph::from_tokens(&tokens);
//! let options = PoemOptions::new(2, vec!["A".into(), "A".into()]);
//! let rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut poem = Poem::new(&graph, options, rng).unwrap();
//! match poem.generate() {
//!     Ok(text) => println!("{text}"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod meter;
pub mod phonetics;
pub mod poem;
pub mod tokenize;
pub mod word;
