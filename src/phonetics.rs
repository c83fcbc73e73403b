//! English spelling-based phonetics for rhyme and meter.
//!
//! These are lightweight, rule-based approximations, not a pronouncing
//! dictionary. They cover the common cases needed to pick rhyming line ends
//! and to scan a line against a stress pattern.

/// Stress carried by one syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stress {
    /// Carries the word's primary stress.
    Stressed,
    /// Unstressed.
    Unstressed,
    /// Monosyllables: scans either way depending on context.
    Either,
}

impl Stress {
    /// Single-character rendering used in scansions (`1`, `0`, `x`).
    pub fn symbol(self) -> char {
        match self {
            Stress::Stressed => '1',
            Stress::Unstressed => '0',
            Stress::Either => 'x',
        }
    }

    /// Whether this syllable may stand in a position that wants `stressed`.
    pub fn fits(self, stressed: bool) -> bool {
        match self {
            Stress::Either => true,
            Stress::Stressed => stressed,
            Stress::Unstressed => !stressed,
        }
    }
}

/// Two-syllable words starting with these prefixes usually stress the root.
const UNSTRESSED_PREFIXES: &[&str] = &["be", "de", "re", "un", "for", "ex", "pre", "a"];

/// Suffixes that pull stress onto the syllable right before them.
const PENULTIMATE_SUFFIXES: &[&str] = &["tion", "sion", "ic", "ics"];

/// Vowel flag per letter. `y` is a vowel when it follows a consonant.
fn vowel_flags(chars: &[char]) -> Vec<bool> {
    let mut prev_vowel = true;
    chars
        .iter()
        .map(|&c| {
            let vowel = match c {
                'a' | 'e' | 'i' | 'o' | 'u' => true,
                'y' => !prev_vowel,
                _ => false,
            };
            prev_vowel = vowel;
            vowel
        })
        .collect()
}

/// Lowercased letters of `word`, apostrophes and other marks removed.
fn letters(word: &str) -> Vec<char> {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Length of the prefix of `chars` that should be scanned for vowels.
///
/// Drops a silent final `e` ("mate", "stone") but keeps the `-le` syllable
/// ("table") and words whose only vowel is the final `e` ("the", "be").
fn scan_len(chars: &[char], vowels: &[bool]) -> usize {
    let n = chars.len();
    if n > 2 && chars[n - 1] == 'e' && !vowels[n - 2] {
        let is_syllabic_le = chars[n - 2] == 'l' && n > 3 && !vowels[n - 3];
        let has_other_vowel = vowels[..n - 1].iter().any(|&v| v);
        if !is_syllabic_le && has_other_vowel {
            return n - 1;
        }
    }
    n
}

/// The part of a word that has to match for two words to rhyme.
///
/// Runs from the start of the last vowel group to the end of the word, so
/// "cat"/"mat" share `at` and "day"/"say" share `ay`. Returns an empty string
/// for words without letters.
pub fn rhyme_tail(word: &str) -> String {
    let chars = letters(word);
    let vowels = vowel_flags(&chars);
    let end = scan_len(&chars, &vowels);
    let Some(last) = (0..end).rev().find(|&i| vowels[i]) else {
        return chars.iter().collect();
    };
    let mut start = last;
    while start > 0 && vowels[start - 1] {
        start -= 1;
    }
    chars[start..].iter().collect()
}

/// Approximate syllable count: the number of vowel groups, at least one for
/// any word with letters.
pub fn syllable_count(word: &str) -> usize {
    let chars = letters(word);
    if chars.is_empty() {
        return 0;
    }
    let vowels = vowel_flags(&chars);
    let end = scan_len(&chars, &vowels);
    let mut groups = 0;
    let mut in_group = false;
    for &vowel in &vowels[..end] {
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    groups.max(1)
}

/// Per-syllable stress pattern of a word.
pub fn stress_pattern(word: &str) -> Vec<Stress> {
    let count = syllable_count(word);
    match count {
        0 => Vec::new(),
        1 => vec![Stress::Either],
        _ => {
            let lower: String = letters(word).into_iter().collect();
            let stressed = if PENULTIMATE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
                count - 2
            } else if count == 2 && UNSTRESSED_PREFIXES.iter().any(|p| lower.starts_with(p)) {
                1
            } else {
                0
            };
            (0..count)
                .map(|i| {
                    if i == stressed {
                        Stress::Stressed
                    } else {
                        Stress::Unstressed
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rhyme_tails() {
        assert_eq!(rhyme_tail("cat"), "at");
        assert_eq!(rhyme_tail("Mat"), "at");
        assert_eq!(rhyme_tail("mate"), "ate");
        assert_eq!(rhyme_tail("day"), "ay");
        assert_eq!(rhyme_tail("upon"), "on");
        assert_eq!(rhyme_tail("the"), "e");
        assert_eq!(rhyme_tail("night"), "ight");
        assert_eq!(rhyme_tail(""), "");
        assert_eq!(rhyme_tail("."), "");
    }

    #[test]
    fn syllables() {
        assert_eq!(syllable_count("cat"), 1);
        assert_eq!(syllable_count("stone"), 1);
        assert_eq!(syllable_count("table"), 2);
        assert_eq!(syllable_count("upon"), 2);
        assert_eq!(syllable_count("beautiful"), 3);
        assert_eq!(syllable_count("rhythm"), 1);
        assert_eq!(syllable_count("!"), 0);
    }

    #[test]
    fn stress_defaults_to_first_syllable() {
        assert_eq!(stress_pattern("garden"), vec![Stress::Stressed, Stress::Unstressed]);
        assert_eq!(stress_pattern("cat"), vec![Stress::Either]);
        assert!(stress_pattern(",").is_empty());
    }

    #[test]
    fn stress_prefix_and_suffix_rules() {
        assert_eq!(stress_pattern("return"), vec![Stress::Unstressed, Stress::Stressed]);
        assert_eq!(
            stress_pattern("nation"),
            vec![Stress::Stressed, Stress::Unstressed]
        );
        assert_eq!(
            stress_pattern("romantic"),
            vec![Stress::Unstressed, Stress::Stressed, Stress::Unstressed]
        );
    }

    #[test]
    fn y_follows_consonants() {
        assert_eq!(vowel_flags(&['y', 'e', 's']), [false, true, false]);
        assert_eq!(vowel_flags(&['s', 'k', 'y']), [false, false, true]);
        assert_eq!(vowel_flags(&['y', 'y', 'y']), [false, true, false]);
        assert_eq!(rhyme_tail("sky"), "y");
        assert_eq!(syllable_count("yes"), 1);
    }

    #[test]
    fn long_y_runs_scan_in_linear_time() {
        let word = "y".repeat(100_000);
        assert_eq!(syllable_count(&word), 50_000);
        assert_eq!(rhyme_tail(&word), "y");
        assert_eq!(stress_pattern(&word).len(), 50_000);
    }

    #[test]
    fn either_fits_both() {
        assert!(Stress::Either.fits(true));
        assert!(Stress::Either.fits(false));
        assert!(!Stress::Stressed.fits(false));
        assert!(Stress::Unstressed.fits(false));
    }
}
