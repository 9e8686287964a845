//! External language-model collaborator.
//!
//! The oracle supplies the two non-deterministic enrichments: categorized
//! word counts for the headline scorer and a free-form narrative analysis.
//! Both run through one completion call. Failures here are never fatal to
//! a request; the analyzer substitutes defaults.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::Post;
use crate::headline::HeadlineWordCounts;
use crate::{Result, SeoscopeError};

/// Process-wide oracle configuration, read-only after construction.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL of the chat-completions API.
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout: 30,
        }
    }
}

impl OracleConfig {
    /// Builds a config from the environment.
    ///
    /// Returns `None` when no API key is set; `SEOSCOPE_MODEL` and
    /// `SEOSCOPE_API_BASE` override the defaults when present.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|key| !key.is_empty())?;
        let mut config = Self { api_key, ..Self::default() };

        if let Ok(model) = std::env::var("SEOSCOPE_MODEL") {
            config.model = model;
        }
        if let Ok(base) = std::env::var("SEOSCOPE_API_BASE") {
            config.api_base = base;
        }

        Some(config)
    }
}

/// A completion service that turns prompts into text.
///
/// The typed default methods wrap [`Oracle::complete`] with prompt
/// construction and reply parsing, so implementations only provide the
/// transport.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Sends one prompt and returns the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Asks for categorized word counts over one headline.
    async fn headline_word_counts(&self, headline: &str) -> Result<HeadlineWordCounts> {
        let prompt = headline_counts_prompt(headline);
        let raw = self.complete(&prompt).await?;
        tracing::debug!(reply = %raw, "headline count reply");
        parse_word_counts(&raw)
    }

    /// Asks for a free-form narrative analysis of one post.
    ///
    /// The reply is opaque to the pipeline; presentation layers may split
    /// it into sections.
    async fn narrative_analysis(&self, post: &Post, text: &str) -> Result<String> {
        let prompt = narrative_prompt(post, text);
        self.complete(&prompt).await
    }
}

fn headline_counts_prompt(headline: &str) -> String {
    format!(
        "Count the words in this blog headline by category. A word may fall \
         into several categories.\n\nHeadline: \"{headline}\"\n\n\
         Reply with only a JSON object with these integer fields: \
         power_words, action_words, descriptive_words, number_words, \
         question_words, adjective_words, emotional_words."
    )
}

fn narrative_prompt(post: &Post, text: &str) -> String {
    let meta = post.seo_description.as_deref().unwrap_or("(none)");
    format!(
        "You are an SEO editor reviewing a blog post.\n\n\
         Title: {title}\nMeta description: {meta}\n\nBody:\n{text}\n\n\
         Write your review in plain text with these labeled sections, each \
         introduced by its name followed by a colon and separated by blank \
         lines:\n\
         Suggestions: three concrete improvements to the content.\n\
         Meta description: a rewritten meta description of 120-155 characters.\n\
         Alternative headlines: three alternative headlines.",
        title = post.title,
    )
}

/// Parses a completion reply into word counts.
///
/// Tolerates code fences and prose around the JSON object; anything
/// without a parseable object is an [`SeoscopeError::OracleParseError`].
pub fn parse_word_counts(raw: &str) -> Result<HeadlineWordCounts> {
    let start = raw.find('{');
    let end = raw.rfind('}');

    let (Some(start), Some(end)) = (start, end) else {
        return Err(SeoscopeError::OracleParseError(raw.trim().to_string()));
    };
    if end < start {
        return Err(SeoscopeError::OracleParseError(raw.trim().to_string()));
    }

    serde_json::from_str(&raw[start..=end])
        .map_err(|e| SeoscopeError::OracleParseError(e.to_string()))
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: String,
}

/// Oracle backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl OpenAiOracle {
    /// Creates a client for the configured endpoint.
    pub fn new(config: OracleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .map_err(SeoscopeError::HttpError)?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage { role: "user", content: prompt.to_string() }],
        };

        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SeoscopeError::OracleError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SeoscopeError::OracleError(format!(
                "completion endpoint returned {}",
                response.status()
            )));
        }

        let reply: ChatResponse =
            response.json().await.map_err(|e| SeoscopeError::OracleError(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SeoscopeError::OracleParseError("empty choices array".to_string()))
    }
}
