//! Document fetching from the headless CMS.
//!
//! One retrieval call per request: GET the document URL, peel the envelope
//! layers CMS APIs wrap around their payloads, and deserialize into
//! [`Post`]. A fetch failure is the only failure that is fatal to a
//! request; there is no retry.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::document::Post;
use crate::{Result, SeoscopeError};

/// HTTP client configuration for CMS requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Seoscope/0.1; +https://github.com/stormlightlabs/seoscope)"
                .to_string(),
        }
    }
}

/// Fetches one document from the CMS by URL.
pub async fn fetch_post(url: &str, config: &FetchConfig) -> Result<Post> {
    let parsed_url = Url::parse(url).map_err(|e| SeoscopeError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(SeoscopeError::InvalidUrl(
            "URL must use http:// or https://".to_string(),
        ));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(SeoscopeError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                SeoscopeError::Timeout { timeout: config.timeout }
            } else {
                SeoscopeError::HttpError(e)
            }
        })?
        .error_for_status()?;

    let payload: Value = response.json().await?;
    post_from_payload(payload)
}

/// Deserializes a CMS payload into a [`Post`], unwrapping envelopes first.
pub fn post_from_payload(payload: Value) -> Result<Post> {
    let inner = unwrap_envelope(payload);
    serde_json::from_value(inner).map_err(|e| SeoscopeError::MalformedDocument(e.to_string()))
}

/// Peels `data` / `attributes` wrapper layers and single-element arrays.
///
/// CMS list endpoints return `{"data": [{"attributes": {...}}]}`; detail
/// endpoints return `{"data": {"attributes": {...}}}` or the bare object.
/// An object that already carries a `title` is the document itself, even
/// when it happens to have a field named `data`.
fn unwrap_envelope(mut value: Value) -> Value {
    loop {
        match value {
            Value::Object(map) if map.contains_key("title") => {
                return Value::Object(map);
            }
            Value::Object(mut map) if map.contains_key("data") => {
                value = map.remove("data").unwrap_or(Value::Null);
            }
            Value::Object(mut map) if map.contains_key("attributes") => {
                value = map.remove("attributes").unwrap_or(Value::Null);
            }
            Value::Array(mut items) if !items.is_empty() => {
                value = items.remove(0);
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Seoscope"));
    }

    #[test]
    fn test_fetch_post_invalid_url() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_post("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(SeoscopeError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_post_rejects_non_http_scheme() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_post("file:///etc/passwd", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(SeoscopeError::InvalidUrl(_))));
    }

    #[test]
    fn test_post_from_bare_payload() {
        let payload = json!({"title": "Plain post", "body": "<p>hi</p>"});
        let post = post_from_payload(payload).unwrap();
        assert_eq!(post.title, "Plain post");
    }

    #[test]
    fn test_post_from_detail_envelope() {
        let payload = json!({
            "data": {
                "id": 7,
                "attributes": {"title": "Wrapped post", "body": "<p>hi</p>"}
            }
        });
        let post = post_from_payload(payload).unwrap();
        assert_eq!(post.title, "Wrapped post");
    }

    #[test]
    fn test_post_from_list_envelope() {
        let payload = json!({
            "data": [
                {"attributes": {"title": "First match", "body": "<p>hi</p>"}},
                {"attributes": {"title": "Second match", "body": "<p>no</p>"}}
            ]
        });
        let post = post_from_payload(payload).unwrap();
        assert_eq!(post.title, "First match");
    }

    #[test]
    fn test_post_with_data_field_is_not_peeled() {
        let payload = json!({
            "title": "Post with a data field",
            "body": "<p>hi</p>",
            "data": {"views": 12}
        });
        let post = post_from_payload(payload).unwrap();
        assert_eq!(post.title, "Post with a data field");
    }

    #[test]
    fn test_post_from_malformed_payload() {
        let payload = json!({"data": {"attributes": {"headline": "no title field"}}});
        let result = post_from_payload(payload);
        assert!(matches!(result, Err(SeoscopeError::MalformedDocument(_))));
    }
}
