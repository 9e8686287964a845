//! Pipeline orchestration.
//!
//! One [`Analyzer`] per process: it holds the read-only configuration and
//! the shared oracle handle, and every call to [`Analyzer::analyze`] is an
//! independent, stateless run. The deterministic stages run in sequence
//! (each consumes the previous stage's output); the two oracle calls are
//! independent of them and of each other, and run concurrently.

use std::sync::Arc;

use serde::Serialize;

use crate::document::{Post, Taxonomy};
use crate::extract::{self, Extraction};
use crate::fetch::{FetchConfig, fetch_post};
use crate::headline::score_headline;
use crate::lexical::{self, LexicalStats, TermCount, WORDS_PER_MINUTE};
use crate::oracle::Oracle;
use crate::score::{ScoreBreakdown, ScoreInputs, score_content};
use crate::Result;

/// Configuration for the analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// CMS fetch settings.
    pub fetch: FetchConfig,
    /// Reading speed for the read-time heuristic.
    pub words_per_minute: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { fetch: FetchConfig::default(), words_per_minute: WORDS_PER_MINUTE }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for [`AnalyzerConfig`].
///
/// # Example
///
/// ```rust
/// use seoscope_core::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .timeout(10)
///     .words_per_minute(225.0)
///     .build();
/// ```
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the CMS request timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the User-Agent for CMS requests.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the reading speed for the read-time heuristic.
    pub fn words_per_minute(mut self, value: f64) -> Self {
        self.config.words_per_minute = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The aggregate result of one analysis run.
///
/// Deterministic fields reproduce exactly for identical input;
/// `headline_score` and `narrative` depend on the oracle and carry no such
/// guarantee.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub title: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Vec<Taxonomy>,
    pub categories: Vec<Taxonomy>,

    pub word_count: usize,
    pub heading_count: usize,
    pub paragraph_count: usize,
    pub image_count: usize,
    pub read_time: String,

    pub term_frequency: Vec<TermCount>,
    pub keyword_density: std::collections::BTreeMap<String, f64>,

    pub score: ScoreBreakdown,
    /// 0 when the oracle is unavailable or failed.
    pub headline_score: u32,
    /// Opaque narrative analysis; absent when the oracle call failed.
    pub narrative: Option<String>,
}

/// Main entry point for post analysis.
///
/// # Example
///
/// ```rust
/// use seoscope_core::{Analyzer, Post};
///
/// # async fn example() -> seoscope_core::Result<()> {
/// let analyzer = Analyzer::new();
/// let post: Post = serde_json::from_value(serde_json::json!({
///     "title": "How to Profile Rust Services",
///     "body": "<h2>Intro</h2><p>Measure before you optimize.</p>",
/// }))?;
/// let result = analyzer.analyze(&post).await?;
/// assert_eq!(result.paragraph_count, 1);
/// # Ok(())
/// # }
/// ```
pub struct Analyzer {
    config: AnalyzerConfig,
    oracle: Option<Arc<dyn Oracle>>,
}

impl Analyzer {
    /// Creates an analyzer with default settings and no oracle.
    ///
    /// Without an oracle the deterministic pipeline still runs; the
    /// headline score is 0 and the narrative is absent.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default(), oracle: None }
    }

    /// Creates an analyzer with a custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config, oracle: None }
    }

    /// Attaches an oracle for headline scoring and narrative analysis.
    pub fn with_oracle(mut self, oracle: Arc<dyn Oracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Fetches a document from the CMS and analyzes it.
    ///
    /// Fetch failures are terminal; everything downstream degrades rather
    /// than fails.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult> {
        let post = fetch_post(url, &self.config.fetch).await?;
        self.analyze(&post).await
    }

    /// Analyzes one document.
    pub async fn analyze(&self, post: &Post) -> Result<AnalysisResult> {
        let extraction = extract::extract(&post.body);
        let stats = lexical::analyze(&extraction.text, self.config.words_per_minute);
        let score = score_content(&score_inputs(post, &extraction, &stats));

        let (headline_score, narrative) = match &self.oracle {
            Some(oracle) => tokio::join!(
                headline_score_for(oracle.as_ref(), &post.title),
                narrative_for(oracle.as_ref(), post, &extraction.text),
            ),
            None => (0, None),
        };

        Ok(AnalysisResult {
            title: post.title.clone(),
            seo_title: post.seo_title.clone(),
            seo_description: post.seo_description.clone(),
            author: post.author.clone(),
            published_at: post.published_at.clone(),
            featured_image: post.featured_image.clone(),
            tags: post.tags.clone(),
            categories: post.categories.clone(),
            word_count: stats.word_count,
            heading_count: extraction.heading_count,
            paragraph_count: extraction.paragraph_count,
            image_count: extraction.image_count,
            read_time: stats.read_time.display.clone(),
            term_frequency: stats.term_frequency,
            keyword_density: stats.keyword_density,
            score,
            headline_score,
            narrative,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn score_inputs(post: &Post, extraction: &Extraction, stats: &LexicalStats) -> ScoreInputs {
    ScoreInputs {
        word_count: stats.word_count,
        heading_count: extraction.heading_count,
        image_count: extraction.image_count,
        paragraph_count: extraction.paragraph_count,
        read_time_minutes: stats.read_time.minutes,
        term_count: stats.term_frequency.len(),
        seo_title_len: post.seo_title.as_deref().map_or(0, |s| s.chars().count()),
        seo_description_len: post.seo_description.as_deref().map_or(0, |s| s.chars().count()),
    }
}

/// Degraded-but-available: any oracle failure scores the headline 0.
async fn headline_score_for(oracle: &dyn Oracle, headline: &str) -> u32 {
    match oracle.headline_word_counts(headline).await {
        Ok(counts) => score_headline(headline, &counts),
        Err(e) => {
            tracing::warn!(error = %e, "headline oracle call failed, scoring 0");
            0
        }
    }
}

/// Degraded-but-available: a failed narrative call leaves the field absent.
async fn narrative_for(oracle: &dyn Oracle, post: &Post, text: &str) -> Option<String> {
    match oracle.narrative_analysis(post, text).await {
        Ok(narrative) => Some(narrative),
        Err(e) => {
            tracing::warn!(error = %e, "narrative oracle call failed");
            None
        }
    }
}
