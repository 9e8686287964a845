//! Weighted content scoring.
//!
//! Combines structural counts and lexical stats into a 0–100 score with a
//! per-factor breakdown. Every factor is clamped to its own maximum
//! independently; the maxima sum to 100. The total is additionally clamped
//! to [0, 100] so a future formula change cannot push it past the scale.

use serde::{Deserialize, Serialize};

const MAX_WORD_COUNT: f64 = 20.0;
const MAX_HEADINGS: f64 = 15.0;
const MAX_IMAGES: f64 = 10.0;
const MAX_PARAGRAPHS: f64 = 10.0;
const MAX_READ_TIME: f64 = 10.0;
const MAX_KEYWORD_USAGE: f64 = 15.0;
const MAX_META_DESCRIPTION: f64 = 10.0;
const MAX_TITLE_LENGTH: f64 = 10.0;

/// Ideal character range for a meta description.
const META_DESCRIPTION_RANGE: std::ops::RangeInclusive<usize> = 120..=155;
/// Ideal character range for an SEO title.
const TITLE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 50..=60;

/// Inputs to one scoring pass, all derived upstream.
#[derive(Debug, Clone, Default)]
pub struct ScoreInputs {
    /// URL-excluding word count of the body text.
    pub word_count: usize,
    pub heading_count: usize,
    pub image_count: usize,
    pub paragraph_count: usize,
    /// Fractional read-time minutes.
    pub read_time_minutes: f64,
    /// Number of entries in the term-frequency list.
    pub term_count: usize,
    /// Character length of the SEO title, 0 when absent.
    pub seo_title_len: usize,
    /// Character length of the meta description, 0 when absent.
    pub seo_description_len: usize,
}

/// Per-factor contributions plus the rounded total.
///
/// Each factor lies in `[0, max]` for its declared maximum; `total` is the
/// rounded sum clamped to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub word_count: f64,
    pub headings: f64,
    pub images: f64,
    pub paragraphs: f64,
    pub read_time: f64,
    pub keyword_usage: f64,
    pub meta_description: f64,
    pub title_length: f64,
    pub total: u32,
}

impl ScoreBreakdown {
    /// Sum of the individual factors, before rounding.
    pub fn factor_sum(&self) -> f64 {
        self.word_count
            + self.headings
            + self.images
            + self.paragraphs
            + self.read_time
            + self.keyword_usage
            + self.meta_description
            + self.title_length
    }
}

/// Scores one post from its derived inputs. Deterministic.
pub fn score_content(inputs: &ScoreInputs) -> ScoreBreakdown {
    let word_count = capped(inputs.word_count as f64 / 25.0, MAX_WORD_COUNT);
    let headings = capped(inputs.heading_count as f64 * 3.0, MAX_HEADINGS);
    let images = capped(inputs.image_count as f64 * 2.0, MAX_IMAGES);
    let paragraphs = capped(inputs.paragraph_count as f64 / 2.0, MAX_PARAGRAPHS);
    let read_time = capped(inputs.read_time_minutes.floor(), MAX_READ_TIME);
    let keyword_usage = capped(inputs.term_count as f64, MAX_KEYWORD_USAGE);
    let meta_description =
        length_band(inputs.seo_description_len, META_DESCRIPTION_RANGE, MAX_META_DESCRIPTION);
    let title_length = length_band(inputs.seo_title_len, TITLE_LENGTH_RANGE, MAX_TITLE_LENGTH);

    let mut breakdown = ScoreBreakdown {
        word_count,
        headings,
        images,
        paragraphs,
        read_time,
        keyword_usage,
        meta_description,
        title_length,
        total: 0,
    };
    breakdown.total = breakdown.factor_sum().round().clamp(0.0, 100.0) as u32;
    breakdown
}

fn capped(value: f64, max: f64) -> f64 {
    value.clamp(0.0, max)
}

/// Full points inside the ideal range, half points for any non-empty
/// value, zero when absent.
fn length_band(len: usize, ideal: std::ops::RangeInclusive<usize>, max: f64) -> f64 {
    if ideal.contains(&len) {
        max
    } else if len > 0 {
        max / 2.0
    } else {
        0.0
    }
}
