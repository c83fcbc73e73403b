//! Word types: the unit stored inside a bigram.
//!
//! A [`WordType`] wraps one token string and answers the linguistic questions
//! the generator asks of it: can it end a sentence, is it punctuation, does it
//! rhyme with another word, and how is it stressed. All of it is derived once
//! at construction; equality and hashing only look at the string.

use std::sync::LazyLock;

use regex::Regex;

use crate::phonetics::{self, Stress};

static RE_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[[:punct:]]$").unwrap());

/// An immutable word form with cached rhyme and stress information.
#[derive(Debug, Clone)]
pub struct WordType {
    string: String,
    stop: bool,
    punctuation: bool,
    rhyme: String,
    stress: Vec<Stress>,
}

impl WordType {
    /// Wrap a token string.
    pub fn new(string: impl Into<String>) -> Self {
        let string = string.into();
        let stop = !string.is_empty() && string.chars().all(|c| matches!(c, '.' | '!' | '?' | '…'));
        let punctuation = RE_PUNCT.is_match(&string);
        let (rhyme, stress) = if punctuation {
            (String::new(), Vec::new())
        } else {
            (
                phonetics::rhyme_tail(&string),
                phonetics::stress_pattern(&string),
            )
        };
        Self {
            string,
            stop,
            punctuation,
            rhyme,
            stress,
        }
    }

    /// The raw word form.
    pub fn as_str(&self) -> &str {
        &self.string
    }

    /// Whether this word can end a sentence.
    pub fn is_stop(&self) -> bool {
        self.stop
    }

    /// Whether this word is a single punctuation character.
    pub fn is_punctuation(&self) -> bool {
        self.punctuation
    }

    /// Whether this word rhymes with `other`.
    ///
    /// Punctuation and words without letters never rhyme.
    pub fn rhymes_with(&self, other: &WordType) -> bool {
        !self.punctuation
            && !other.punctuation
            && !self.rhyme.is_empty()
            && self.rhyme == other.rhyme
    }

    /// The spelling tail compared by [`rhymes_with`](Self::rhymes_with).
    pub fn rhyme_tail(&self) -> &str {
        &self.rhyme
    }

    /// Per-syllable stress. Empty for punctuation.
    pub fn stress(&self) -> &[Stress] {
        &self.stress
    }

    /// Number of syllables.
    pub fn syllables(&self) -> usize {
        self.stress.len()
    }
}

impl PartialEq for WordType {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for WordType {}

impl std::hash::Hash for WordType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl std::fmt::Display for WordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.string)
    }
}
