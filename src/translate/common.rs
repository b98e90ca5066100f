use std::time::Duration;
use reqwest::Client;

use crate::config::TranslateConfig;
use crate::error::Result;

/// HTTP client shared by the translation backends
pub fn build_client(config: &TranslateConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("jamak/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Convert language code to full language name for clearer prompts
pub fn language_code_to_name(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "ko" => "Korean".to_string(),
        "en" => "English".to_string(),
        "ru" => "Russian".to_string(),
        "ja" => "Japanese".to_string(),
        "zh" => "Chinese".to_string(),
        "fr" => "French".to_string(),
        "de" => "German".to_string(),
        "es" => "Spanish".to_string(),
        "it" => "Italian".to_string(),
        "pt" => "Portuguese".to_string(),
        "uk" => "Ukrainian".to_string(),
        "vi" => "Vietnamese".to_string(),
        "th" => "Thai".to_string(),
        _ => code.to_string(),
    }
}

/// Clean up an LLM response to extract just the translation
pub fn clean_translation_response(response: &str) -> String {
    let lines: Vec<&str> = response.lines().collect();

    for &line in &lines {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with("Here is") ||
           trimmed.starts_with("Here are") ||
           trimmed.starts_with("Translation:") ||
           trimmed.starts_with("- ") ||
           trimmed.starts_with("* ") {
            continue;
        }

        if trimmed.starts_with("**") && trimmed.ends_with("**") {
            continue;
        }

        return trimmed.trim_matches('"').to_string();
    }

    response.trim().to_string()
}
