//! Library API integration tests
use std::sync::Arc;

use async_trait::async_trait;
use seoscope_core::*;

/// Oracle that replies with canned text: valid JSON for count prompts,
/// a sectioned review for everything else.
struct CannedOracle;

#[async_trait]
impl Oracle for CannedOracle {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.contains("power_words") {
            Ok(r#"{"power_words": 1, "action_words": 1, "emotional_words": 1}"#.to_string())
        } else {
            Ok("Suggestions: tighten the intro.\n\nMeta description: A rewritten one.\n\nAlternative headlines: Three of them.".to_string())
        }
    }
}

/// Oracle whose every call fails.
struct DownOracle;

#[async_trait]
impl Oracle for DownOracle {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(SeoscopeError::OracleError("connection refused".to_string()))
    }
}

/// Oracle that answers count prompts with prose instead of JSON.
struct BabblingOracle;

#[async_trait]
impl Oracle for BabblingOracle {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok("I would rather talk about the weather.".to_string())
    }
}

fn sample_post() -> Post {
    serde_json::from_value(serde_json::json!({
        "title": "7 Ways to Speed Up Incremental Builds",
        "body": "<h2>Why builds slow down</h2>\
                 <p>Incremental builds slow down as dependency graphs grow, and \
                 most teams only notice once the feedback loop hurts.</p>\
                 <p>Caching helps, but caching without measurement hides the \
                 real dependency problems.</p>\
                 <h2>What to measure</h2>\
                 <p>Measure the critical path first. The critical path decides \
                 the floor of every build, cached or not.</p>\
                 <img src=\"graph.png\" alt=\"dependency graph\">",
        "seoTitle": "Speed Up Incremental Builds: 7 Practical Techniques",
        "seoDescription": "Seven practical techniques for speeding up incremental \
                           builds, from dependency graph hygiene to critical path \
                           measurement and cache tuning.",
        "author": "Dev Rel",
        "publishedAt": "2024-06-12",
        "tags": [{"name": "Build Systems", "slug": "build-systems"}]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_full_pipeline_with_oracle() {
    let analyzer = Analyzer::new().with_oracle(Arc::new(CannedOracle));
    let result = analyzer.analyze(&sample_post()).await.unwrap();

    assert_eq!(result.heading_count, 2);
    assert_eq!(result.paragraph_count, 3);
    assert_eq!(result.image_count, 1);

    // 3 counted words * 10 + mid-length bonus 30 + digit opening 10.
    assert_eq!(result.headline_score, 70);
    assert!(result.narrative.as_deref().unwrap().contains("Suggestions:"));

    assert_eq!(result.author.as_deref(), Some("Dev Rel"));
    assert_eq!(result.tags[0].slug, "build-systems");
}

#[tokio::test]
async fn test_oracle_failure_degrades_headline_only() {
    let analyzer = Analyzer::new().with_oracle(Arc::new(DownOracle));
    let result = analyzer.analyze(&sample_post()).await.unwrap();

    assert_eq!(result.headline_score, 0);
    assert!(result.narrative.is_none());

    // Deterministic metrics are unaffected by the outage.
    assert_eq!(result.heading_count, 2);
    assert!(result.word_count > 0);
    assert!(result.score.total > 0);
}

#[tokio::test]
async fn test_unparseable_oracle_output_scores_zero() {
    let analyzer = Analyzer::new().with_oracle(Arc::new(BabblingOracle));
    let result = analyzer.analyze(&sample_post()).await.unwrap();

    assert_eq!(result.headline_score, 0);
    // Narrative is opaque text, so prose is still a valid narrative.
    assert!(result.narrative.is_some());
}

#[tokio::test]
async fn test_headline_score_bounds() {
    let analyzer = Analyzer::new().with_oracle(Arc::new(CannedOracle));
    let result = analyzer.analyze(&sample_post()).await.unwrap();
    assert!(result.headline_score <= 100);
}

#[tokio::test]
async fn test_breakdown_bounds_and_total() {
    let result = Analyzer::new().analyze(&sample_post()).await.unwrap();
    let score = &result.score;

    assert!(score.word_count >= 0.0 && score.word_count <= 20.0);
    assert!(score.headings >= 0.0 && score.headings <= 15.0);
    assert!(score.images >= 0.0 && score.images <= 10.0);
    assert!(score.paragraphs >= 0.0 && score.paragraphs <= 10.0);
    assert!(score.read_time >= 0.0 && score.read_time <= 10.0);
    assert!(score.keyword_usage >= 0.0 && score.keyword_usage <= 15.0);
    assert!(score.meta_description >= 0.0 && score.meta_description <= 10.0);
    assert!(score.title_length >= 0.0 && score.title_length <= 10.0);

    assert_eq!(score.total, score.factor_sum().round().clamp(0.0, 100.0) as u32);
    assert!(score.total <= 100);
}

#[tokio::test]
async fn test_term_frequency_properties() {
    let result = Analyzer::new().analyze(&sample_post()).await.unwrap();

    assert!(result.term_frequency.len() <= TOP_TERM_LIMIT);
    for pair in result.term_frequency.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }

    let top_terms: Vec<&str> = result
        .term_frequency
        .iter()
        .take(DENSITY_TERM_LIMIT)
        .map(|t| t.term.as_str())
        .collect();
    assert_eq!(result.keyword_density.len(), top_terms.len().min(DENSITY_TERM_LIMIT));
    for term in result.keyword_density.keys() {
        assert!(top_terms.contains(&term.as_str()));
    }
    for value in result.keyword_density.values() {
        assert!(*value >= 0.0 && *value <= 100.0);
    }
}

#[tokio::test]
async fn test_block_body_pipeline() {
    let post: Post = serde_json::from_value(serde_json::json!({
        "title": "Block bodies work too",
        "body": [
            {"type": "heading", "level": 2, "children": [{"type": "text", "text": "Section"}]},
            {"type": "paragraph", "children": [{"type": "text", "text": "Structured content from the newer editor."}]},
            {"type": "image", "image": {"url": "https://cdn.example.com/pic.png"}}
        ]
    }))
    .unwrap();

    let result = Analyzer::new().analyze(&post).await.unwrap();
    assert_eq!(result.heading_count, 1);
    assert_eq!(result.paragraph_count, 1);
    assert_eq!(result.image_count, 1);
    assert!(result.word_count > 0);
}

#[tokio::test]
async fn test_analyze_url_invalid_url_is_fatal() {
    let analyzer = Analyzer::new();
    let result = analyzer.analyze_url("definitely not a url").await;
    assert!(matches!(result, Err(SeoscopeError::InvalidUrl(_))));
}
