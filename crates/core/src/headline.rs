//! Headline quality scoring.
//!
//! The categorized word counts come from the oracle; everything else here
//! is deterministic arithmetic over the headline string. The caller is
//! responsible for the degraded path: when the oracle call fails, the
//! headline score is 0 (see the analyzer).

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Points per counted word in any category.
const POINTS_PER_WORD: i64 = 10;
/// Bonus when the headline opens with a digit or uses "how".
const HOOK_BONUS: i64 = 10;
/// Penalty when the headline runs past this many characters.
const LENGTH_PENALTY_THRESHOLD: usize = 70;
const LENGTH_PENALTY: i64 = 10;

/// Categorized word counts returned by the oracle.
///
/// Categories may overlap on the same word; all fields default to zero so
/// a partial oracle reply still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlineWordCounts {
    pub power_words: u32,
    pub action_words: u32,
    pub descriptive_words: u32,
    pub number_words: u32,
    pub question_words: u32,
    pub adjective_words: u32,
    pub emotional_words: u32,
}

impl HeadlineWordCounts {
    /// Total counted words across all seven categories.
    pub fn total(&self) -> u32 {
        self.power_words
            + self.action_words
            + self.descriptive_words
            + self.number_words
            + self.question_words
            + self.adjective_words
            + self.emotional_words
    }
}

/// Scores a headline from its text and categorized word counts.
///
/// - +10 per counted word in each category.
/// - Word-count bucket: 5–10 words → +30, more than 10 → +20, otherwise +10.
/// - +10 once when the headline starts with a digit or uses the word
///   "how" (case-insensitive).
/// - −10 when longer than 70 characters.
///
/// The result is clamped to `[0, 100]`.
pub fn score_headline(headline: &str, counts: &HeadlineWordCounts) -> u32 {
    let mut score = i64::from(counts.total()) * POINTS_PER_WORD;

    let words = headline.split_whitespace().count();
    score += match words {
        5..=10 => 30,
        w if w > 10 => 20,
        _ => 10,
    };

    if has_opening_hook(headline) {
        score += HOOK_BONUS;
    }

    if headline.chars().count() > LENGTH_PENALTY_THRESHOLD {
        score -= LENGTH_PENALTY;
    }

    score.clamp(0, 100) as u32
}

/// A single bonus applies whether the headline starts with a digit, uses
/// "how", or both.
fn has_opening_hook(headline: &str) -> bool {
    if headline.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    let how = Regex::new(r"(?i)\bhow\b").unwrap();
    how.is_match(headline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn no_counts() -> HeadlineWordCounts {
        HeadlineWordCounts::default()
    }

    #[test]
    fn test_category_points() {
        let counts = HeadlineWordCounts {
            power_words: 2,
            action_words: 1,
            emotional_words: 1,
            ..Default::default()
        };
        // 4 words * 10 + short-headline bonus 10.
        assert_eq!(score_headline("Quick tips", &counts), 50);
    }

    #[rstest]
    #[case("Two words", 10)]
    #[case("Five words make this headline", 30)]
    #[case("These ten words are exactly enough for the middle bucket", 30)]
    #[case("This headline has somewhat more than ten words in it overall today", 20)]
    fn test_word_count_bucket(#[case] headline: &str, #[case] expected: u32) {
        assert_eq!(score_headline(headline, &no_counts()), expected);
    }

    #[test]
    fn test_digit_opening_bonus() {
        // 6 words -> +30, digit opening -> +10.
        assert_eq!(score_headline("7 Habits of Productive Rust Developers", &no_counts()), 40);
    }

    #[test]
    fn test_how_bonus() {
        assert_eq!(score_headline("How to Write Faster Parsers", &no_counts()), 40);
    }

    #[test]
    fn test_hook_bonus_not_double_applied() {
        // Starts with a digit and contains "how"; the bonus lands once.
        let headline = "5 Ways How to Improve SEO Today";
        assert_eq!(score_headline(headline, &no_counts()), 40);
    }

    #[test]
    fn test_how_requires_word_boundary() {
        // "Shower" must not trigger the "how" bonus.
        assert_eq!(score_headline("Shower thoughts on testing code", &no_counts()), 30);
    }

    #[test]
    fn test_length_penalty() {
        let long = "This extremely long headline keeps going well past the seventy character mark";
        assert!(long.chars().count() > 70);
        // 13 words -> +20, penalty -10.
        assert_eq!(score_headline(long, &no_counts()), 10);
    }

    #[test]
    fn test_score_clamped_to_hundred() {
        let counts = HeadlineWordCounts {
            power_words: 5,
            action_words: 5,
            descriptive_words: 5,
            number_words: 5,
            question_words: 5,
            adjective_words: 5,
            emotional_words: 5,
        };
        assert_eq!(score_headline("Great big wonderful headline here", &counts), 100);
    }

    #[test]
    fn test_score_floor_is_zero() {
        // Short-headline bucket +10 and length penalty -10 meet exactly at
        // the floor: nothing can take the score below it.
        let long_words = "Antidisestablishmentarianism Floccinaucinihilipilification \
                          Pneumonoultramicroscopicsilicovolcanoconiosis Supercalifragilistic";
        assert!(long_words.chars().count() > 70);
        assert_eq!(score_headline(long_words, &no_counts()), 0);
    }

    #[test]
    fn test_counts_deserialize_with_missing_fields() {
        let counts: HeadlineWordCounts =
            serde_json::from_str(r#"{"power_words": 2, "action_words": 1}"#).unwrap();
        assert_eq!(counts.total(), 3);
    }
}
