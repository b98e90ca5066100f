// Machine translation backends
//
// - Google: public Google Translate web endpoint
// - Ollama: local LLM with a JSON-format translation prompt

pub mod common;
pub mod google;
pub mod ollama;

use async_trait::async_trait;

pub use common::language_code_to_name;
use crate::config::{TranslateConfig, TranslatorBackend};
use crate::error::Result;

/// Main trait for translation operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one subtitle line from `source_language` to `target_language`
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String>;

    /// Check the backing service is reachable before a run
    async fn check_availability(&self) -> Result<()> {
        Ok(())
    }
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn create_translator(config: &TranslateConfig) -> Result<Box<dyn Translator>> {
        Ok(match config.backend {
            TranslatorBackend::Google => Box::new(google::GoogleTranslator::new(config)?),
            TranslatorBackend::Ollama => Box::new(ollama::OllamaTranslator::new(config)?),
        })
    }
}
