//! Meter scoring: how far a phrase's stress deviates from a target pattern.
//!
//! The generator only consults [`Scansion::distance`], comparing it against
//! [`METER_THRESHOLD`]. Scorers sit behind the [`MeterScorer`] trait so a
//! dictionary-backed implementation can replace the spelling heuristics.

use crate::phonetics::Stress;
use crate::word::WordType;

/// Candidates whose distance is not strictly below this are rejected.
pub const METER_THRESHOLD: f64 = 1.0;

/// Default target pattern: iambic (unstressed, stressed).
pub const DEFAULT_METER: &str = "01";

/// Result of scanning a phrase against a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Scansion {
    /// The phrase's syllables grouped into feet of the pattern's length,
    /// rendered as `1` (stressed), `0` (unstressed) or `x` (either).
    pub feet: Vec<String>,
    /// Mismatched syllables per foot.
    pub distance: f64,
}

/// Scores a phrase against a stress pattern of `0`s and `1`s.
pub trait MeterScorer {
    fn meter_with_distance(&self, phrase: &str, pattern: &str) -> Scansion;
}

/// Spelling-based scorer built on [`WordType::stress`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StressMeter;

impl MeterScorer for StressMeter {
    fn meter_with_distance(&self, phrase: &str, pattern: &str) -> Scansion {
        let target: Vec<bool> = pattern
            .chars()
            .filter_map(|c| match c {
                '1' => Some(true),
                '0' => Some(false),
                _ => None,
            })
            .collect();
        let syllables: Vec<Stress> = phrase
            .split_whitespace()
            .flat_map(|token| WordType::new(token).stress().to_vec())
            .collect();

        if target.is_empty() || syllables.is_empty() {
            return Scansion {
                feet: Vec::new(),
                distance: 0.0,
            };
        }

        let mismatches = syllables
            .iter()
            .enumerate()
            .filter(|(i, s)| !s.fits(target[i % target.len()]))
            .count();
        let feet: Vec<String> = syllables
            .chunks(target.len())
            .map(|foot| foot.iter().map(|s| s.symbol()).collect())
            .collect();

        Scansion {
            distance: mismatches as f64 / feet.len() as f64,
            feet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monosyllables_always_scan() {
        let scan = StressMeter.meter_with_distance("the cat sat on the mat .", "01");
        assert_eq!(scan.feet, vec!["xx", "xx", "xx"]);
        assert_eq!(scan.distance, 0.0);
    }

    #[test]
    fn trochees_against_iambic_pattern() {
        // garden = 10, window = 10: every syllable is off.
        let scan = StressMeter.meter_with_distance("garden window", "01");
        assert_eq!(scan.feet, vec!["10", "10"]);
        assert_eq!(scan.distance, 2.0);
        assert!(scan.distance >= METER_THRESHOLD);
    }

    #[test]
    fn iambs_fit_iambic_pattern() {
        let scan = StressMeter.meter_with_distance("return again", "01");
        assert_eq!(scan.distance, 0.0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(StressMeter.meter_with_distance("", "01").distance, 0.0);
        assert_eq!(StressMeter.meter_with_distance("garden", "").distance, 0.0);
    }
}
