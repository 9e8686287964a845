//! Lexical analysis of extracted plain text.
//!
//! Tokenization, stopword removal, term frequency, keyword density, and
//! read time. Two word counts exist on purpose: [`count_words`] excludes
//! URL tokens and feeds the content scorer, while density uses the plain
//! word-boundary token count of the lowercased text. The upstream system
//! computed them differently and the scores depend on it, so the
//! discrepancy is kept.

use std::collections::BTreeMap;
use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Term-frequency list cap.
pub const TOP_TERM_LIMIT: usize = 15;

/// Number of top terms that get a density figure.
pub const DENSITY_TERM_LIMIT: usize = 5;

/// Default reading speed for the read-time heuristic.
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// English stopwords removed from keyword candidates.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from",
    "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he",
    "he'd", "he'll", "he's", "her", "here", "here's", "hers", "herself", "him", "himself",
    "his", "how", "how's", "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is",
    "isn't", "it", "it's", "its", "itself", "just", "let's", "like", "me", "more", "most",
    "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "shan't",
    "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such", "than",
    "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there",
    "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "will", "with",
    "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your",
    "yours", "yourself", "yourselves",
];

/// One (term, count) entry of the frequency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// Human-readable read time plus the raw minutes backing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadTime {
    /// Fractional minutes at the configured reading speed.
    pub minutes: f64,
    /// Display string, e.g. `"3 min read"`. Never below `"1 min read"`.
    pub display: String,
}

/// Everything the lexical pass derives from one plain-text body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalStats {
    /// URL-excluding word count.
    pub word_count: usize,
    /// Top terms by frequency, descending, at most [`TOP_TERM_LIMIT`].
    pub term_frequency: Vec<TermCount>,
    /// Density percentage for the top [`DENSITY_TERM_LIMIT`] terms.
    pub keyword_density: BTreeMap<String, f64>,
    pub read_time: ReadTime,
}

/// Runs the full lexical pass over one plain-text body.
///
/// Empty content yields zero counts, empty maps, and the minimum read
/// time; it never errors.
pub fn analyze(text: &str, words_per_minute: f64) -> LexicalStats {
    let word_count = count_words(text);
    let terms = extract_terms(text);
    let term_frequency = term_frequency(&terms);
    let keyword_density = keyword_density(text, &term_frequency);
    let read_time = read_time(word_count, words_per_minute);

    LexicalStats { word_count, term_frequency, keyword_density, read_time }
}

/// Counts words, skipping tokens that are URLs.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| !is_url(token))
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

fn is_url(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
}

/// Extracts keyword candidates: case-normalized, digits stripped,
/// stopwords removed, duplicates retained in document order.
pub fn extract_terms(text: &str) -> Vec<String> {
    let lowered: String = text.to_lowercase().chars().filter(|c| !c.is_ascii_digit()).collect();
    let word_re = Regex::new(r"[a-z]+(?:'[a-z]+)*").unwrap();

    word_re
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Aggregates terms into a frequency list.
///
/// Sorted by count descending; ties keep first-occurrence order; capped at
/// [`TOP_TERM_LIMIT`] entries.
pub fn term_frequency(terms: &[String]) -> Vec<TermCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for term in terms {
        let entry = counts.entry(term.as_str()).or_insert(0);
        if *entry == 0 {
            order.push(term.as_str());
        }
        *entry += 1;
    }

    let mut frequency: Vec<TermCount> = order
        .into_iter()
        .map(|term| TermCount { term: term.to_string(), count: counts[term] })
        .collect();

    // Stable sort keeps first-occurrence order on equal counts.
    frequency.sort_by(|a, b| b.count.cmp(&a.count));
    frequency.truncate(TOP_TERM_LIMIT);
    frequency
}

/// Computes keyword density for the top terms.
///
/// Each value is `occurrences / simple_token_count * 100`, rounded to two
/// decimals, where both figures come from a word-boundary tokenization of
/// the lowercased full text.
pub fn keyword_density(text: &str, frequency: &[TermCount]) -> BTreeMap<String, f64> {
    let tokens = simple_tokens(text);
    let total = tokens.len();

    let mut density = BTreeMap::new();
    if total == 0 {
        return density;
    }

    for entry in frequency.iter().take(DENSITY_TERM_LIMIT) {
        let occurrences = tokens.iter().filter(|token| *token == &entry.term).count();
        let pct = (occurrences as f64 / total as f64) * 100.0;
        density.insert(entry.term.clone(), round2(pct));
    }

    density
}

/// Word-boundary tokens of the lowercased text, URLs included.
fn simple_tokens(text: &str) -> Vec<String> {
    let word_re = Regex::new(r"\b[\w'-]+\b").unwrap();
    word_re.find_iter(&text.to_lowercase()).map(|m| m.as_str().to_string()).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes read time from a word count.
///
/// The display string reports whole minutes, rounded up, never below one.
pub fn read_time(word_count: usize, words_per_minute: f64) -> ReadTime {
    let minutes = word_count as f64 / words_per_minute;
    let display_minutes = (minutes.ceil() as u64).max(1);

    ReadTime { minutes, display: format!("{display_minutes} min read") }
}
