//! Corpus tokenization.
//!
//! Turns raw text into the ordered token sequence the graph builder windows
//! into bigrams. Words keep their case; every punctuation character becomes
//! its own token so that sentence stops can be recognized as word types.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{GraphError, GraphResult};

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]").unwrap()
});

/// Replace line breaks with spaces and collapse runs of whitespace.
pub fn remove_linebreaks(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = remove_linebreaks(text).nfc().collect();
    RE_TOKEN
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Read a corpus file and tokenize its contents.
pub fn load_tokens_from_file(path: &Path) -> GraphResult<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let tokens = tokenize(&text);
    tracing::debug!(path = %path.display(), tokens = tokens.len(), "tokenized corpus");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linebreaks_collapse() {
        assert_eq!(remove_linebreaks("a\nb\r\n  c\t d"), "a b c d");
        assert_eq!(remove_linebreaks("   "), "");
    }

    #[test]
    fn punctuation_split_off() {
        assert_eq!(
            tokenize("The cat sat on the mat."),
            vec!["The", "cat", "sat", "on", "the", "mat", "."]
        );
    }

    #[test]
    fn inner_apostrophes_and_hyphens_kept() {
        assert_eq!(
            tokenize("don't stop, well-known!"),
            vec!["don't", "stop", ",", "well-known", "!"]
        );
    }

    #[test]
    fn ellipsis_is_one_token_per_char() {
        assert_eq!(tokenize("wait..."), vec!["wait", ".", ".", "."]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_tokens_from_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }
}
