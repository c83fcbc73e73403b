//! Rich diagnostic error types for prosody.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Search exhaustion during generation is
//! not an error inside the search loop (sampling returns `None`); it only
//! surfaces here once a whole run has failed.

use miette::Diagnostic;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("invalid argument: {message}")]
    #[diagnostic(
        code(prosody::graph::invalid_argument),
        help(
            "Every bigram must reference two registered word types. \
             A snapshot whose nodes name words missing from its `types` list \
             was probably edited by hand or truncated; rebuild it from the corpus."
        )
    )]
    InvalidArgument { message: String },

    #[error("cannot serialize an empty graph: no {what}")]
    #[diagnostic(
        code(prosody::graph::empty),
        help(
            "Build the graph from a corpus first (`prosody build --corpus <file>`). \
             A corpus needs at least three tokens to produce a transition."
        )
    )]
    EmptyGraph { what: &'static str },

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(prosody::graph::io),
        help("Check that the file exists and that the data directory is readable and writable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed graph file {path}: {message}")]
    #[diagnostic(
        code(prosody::graph::parse),
        help(
            "The file is not a valid graph snapshot. Expected a JSON object with \
             `types` and `nodes` arrays. Rebuild it with `prosody build`."
        )
    )]
    Parse { path: String, message: String },
}

/// Convenience alias for graph operation results.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

// ---------------------------------------------------------------------------
// Poem errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PoemError {
    #[error("invalid argument: {message}")]
    #[diagnostic(
        code(prosody::poem::invalid_argument),
        help("Line length must be at least 1 and the rhyme scheme must name at least one line.")
    )]
    InvalidArgument { message: String },

    #[error("no valid poem found after trying {attempts} starting bigrams")]
    #[diagnostic(
        code(prosody::poem::exhausted_starts),
        help(
            "Every sentence-initial bigram led to a dead end. Try a larger corpus, \
             a shorter line length, a looser rhyme scheme, or drop the meter."
        )
    )]
    ExhaustedStarts { attempts: usize },

    #[error("search step budget of {steps} exhausted")]
    #[diagnostic(
        code(prosody::poem::step_budget),
        help("Raise `max_steps` in the config (or pass `--max-steps`), or remove it for an unbounded search.")
    )]
    StepBudgetExhausted { steps: u64 },
}

/// Convenience alias for poem generation results.
pub type PoemResult<T> = std::result::Result<T, PoemError>;

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(prosody::config::read),
        help("Ensure the config file exists, or create one with `prosody config init`.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(prosody::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(prosody::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_error_carries_code() {
        let err = GraphError::EmptyGraph { what: "nodes" };
        assert_eq!(err.to_string(), "cannot serialize an empty graph: no nodes");
        assert_eq!(err.code().unwrap().to_string(), "prosody::graph::empty");
    }

    #[test]
    fn poem_error_message_names_attempts() {
        let err = PoemError::ExhaustedStarts { attempts: 3 };
        assert!(err.to_string().contains("3 starting bigrams"));
    }
}
