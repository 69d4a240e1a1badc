use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::lang::TranslationRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Malformed(String),

    #[error("translator unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for TranslationFailure {
    fn from(e: reqwest::Error) -> Self {
        TranslationFailure::Network(e.to_string())
    }
}

/// An external translation provider.
#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationFailure>;
}

/// Keyless client for the public `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationFailure> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header("User-Agent", "Mozilla/5.0")
            .query(&[
                ("client", "gtx"),
                ("sl", request.source.code()),
                ("tl", request.target.code()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TranslationFailure::Status { status, body });
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| TranslationFailure::Malformed(e.to_string()))?;
        parse_response(&json)
    }
}

/// The body is nested arrays; `json[0]` holds one `[translated, original, ...]`
/// entry per sentence.
pub fn parse_response(json: &serde_json::Value) -> Result<String, TranslationFailure> {
    let sentences = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslationFailure::Malformed("missing sentence list".into()))?;

    let out: String = sentences
        .iter()
        .filter_map(|s| s.get(0).and_then(|t| t.as_str()))
        .collect();

    if out.is_empty() {
        return Err(TranslationFailure::Malformed("empty translation".into()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_sentence_fragments() {
        let body = json!([
            [["こんにちは。", "Hello.", null, null, 10], ["元気ですか？", "How are you?", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_response(&body).unwrap(), "こんにちは。元気ですか？");
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(matches!(parse_response(&json!({"error": "x"})), Err(TranslationFailure::Malformed(_))));
        assert!(matches!(parse_response(&json!([[], null, "en"])), Err(TranslationFailure::Malformed(_))));
    }

    #[test]
    fn failure_messages_carry_detail() {
        let e = TranslationFailure::Status { status: 429, body: "Too Many Requests".into() };
        assert_eq!(e.to_string(), "service returned 429: Too Many Requests");
        assert!(TranslationFailure::Network("dns".into()).to_string().contains("dns"));
    }
}
