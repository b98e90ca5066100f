use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{Result, JamakError};
use super::Translator;
use super::common::build_client;

/// Translator backed by the public Google Translate web endpoint
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslateConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.endpoint().to_string(),
        })
    }
}

/// Join the translated sentence chunks of a `translate_a/single` response
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` chunks.
pub fn parse_response(body: &Value) -> Result<String> {
    let chunks = body.get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| JamakError::Translation("Unexpected response layout".to_string()))?;

    let translated: String = chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect();

    let translated = translated.trim();
    if translated.is_empty() {
        return Err(JamakError::Translation("Empty translation received".to_string()));
    }

    Ok(translated.to_string())
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String> {
        let url = format!("{}/translate_a/single", self.endpoint);
        debug!("Sending translation request to: {} ({} -> {})", url, source_language, target_language);

        let response = self.client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| JamakError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(JamakError::Translation(format!(
                "Translation service error {}: {}", status, error_text
            )));
        }

        let body: Value = response.json().await
            .map_err(|e| JamakError::Translation(format!("Failed to parse response: {}", e)))?;

        parse_response(&body)
    }
}
