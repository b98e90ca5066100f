use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, debug};

use crate::config::TranslateConfig;
use crate::error::{Result, JamakError};
use super::Translator;
use super::common::{build_client, clean_translation_response, language_code_to_name};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub response: String,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
}

/// Translator backed by a local Ollama LLM
pub struct OllamaTranslator {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaTranslator {
    pub fn new(config: &TranslateConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.endpoint().to_string(),
            model: config.model.clone(),
        })
    }
}

/// Build translation prompt, asking for JSON output
pub fn build_translation_prompt(text: &str, source_language: &str, target_language: &str) -> String {
    let source_name = language_code_to_name(source_language);
    let target_name = language_code_to_name(target_language);

    format!(
        "You are a professional subtitle translator.\n\
         \n\
         Translate the following {} subtitle line to {} ONLY (language code: {}).\n\
         \n\
         Return ONLY the translation in JSON format as {{\"text\":\"your {} translation here\"}}.\n\
         Do not include any explanations, alternatives, or text in other languages.\n\
         \n\
         Text to translate: \"{}\"\n",
        source_name, target_name, target_language, target_name, text
    )
}

/// Extract the translation from the raw model output
pub fn extract_translation(raw_response: &str) -> Result<String> {
    let raw_response = raw_response.trim();
    if raw_response.is_empty() {
        return Err(JamakError::Translation("Empty translation received".to_string()));
    }

    let translation = match serde_json::from_str::<TranslationResult>(raw_response) {
        Ok(result) => result.text.trim().to_string(),
        Err(_) => clean_translation_response(raw_response),
    };

    if translation.is_empty() {
        return Err(JamakError::Translation("Empty translation received".to_string()));
    }
    Ok(translation)
}

#[async_trait]
impl Translator for OllamaTranslator {
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String> {
        let request = TranslationRequest {
            model: self.model.clone(),
            prompt: build_translation_prompt(text, source_language, target_language),
            stream: false,
            format: "json".to_string(),
        };

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Sending translation request to: {}", url);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| JamakError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(JamakError::Translation(format!(
                "Ollama API error {}: {}", status, error_text
            )));
        }

        let translation_response: TranslationResponse = response.json().await
            .map_err(|e| JamakError::Translation(format!("Failed to parse response: {}", e)))?;

        debug!("Raw Ollama response: {}", translation_response.response);
        extract_translation(&translation_response.response)
    }

    /// Check the model is pulled on the Ollama server
    async fn check_availability(&self) -> Result<()> {
        let url = format!("{}/api/show", self.endpoint);

        let response = self.client
            .post(&url)
            .json(&json!({ "name": self.model }))
            .send()
            .await
            .map_err(|e| JamakError::Translation(format!("Failed to connect to Ollama: {}", e)))?;

        if response.status().is_success() {
            info!("Ollama model '{}' is available", self.model);
            Ok(())
        } else {
            Err(JamakError::Translation(format!(
                "Ollama model '{}' not found. Please pull the model first: ollama pull {}",
                self.model, self.model
            )))
        }
    }
}
