use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use crate::error::{Result, JamakError};
use crate::transcribe::ModelSize;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transcriber: TranscriberConfig,
    pub translate: TranslateConfig,
    pub media: MediaConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriberConfig {
    /// Speech recognition backend
    pub backend: TranscriberBackend,
    /// Path to the recognizer binary; backend default when unset
    pub binary_path: Option<String>,
    /// Model size used when the command line does not name one
    pub model: ModelSize,
    /// Directory holding ggml models for whisper.cpp
    pub model_dir: String,
    /// Spoken language of the source video
    pub source_language: String,
    /// Request word-level timing from the recognizer
    pub word_timestamps: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranscriberBackend {
    /// OpenAI Whisper command-line tool (`whisper`)
    OpenaiWhisper,
    /// whisper.cpp command-line tool (`whisper-cli`) with ggml models
    WhisperCpp,
}

impl TranscriberConfig {
    pub fn binary(&self) -> &str {
        match (&self.binary_path, self.backend) {
            (Some(path), _) => path,
            (None, TranscriberBackend::OpenaiWhisper) => "whisper",
            (None, TranscriberBackend::WhisperCpp) => "whisper-cli",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Machine translation backend
    pub backend: TranslatorBackend,
    /// Service base URL; backend default when unset
    pub endpoint: Option<String>,
    /// LLM model, only used by the ollama backend
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Languages to emit subtitle files for, in output order
    pub target_languages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslatorBackend {
    Google,
    Ollama,
}

impl TranslateConfig {
    pub fn endpoint(&self) -> &str {
        match (&self.endpoint, self.backend) {
            (Some(url), _) => url.trim_end_matches('/'),
            (None, TranslatorBackend::Google) => "https://translate.googleapis.com",
            (None, TranslatorBackend::Ollama) => "http://localhost:11434",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Sample rate of the extracted waveform
    pub sample_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Suffix appended to the video basename for the temporary waveform
    pub temp_audio_suffix: String,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            backend: TranscriberBackend::OpenaiWhisper,
            binary_path: None,
            model: ModelSize::Base,
            model_dir: ".jamak/models".to_string(),
            source_language: "ko".to_string(),
            word_timestamps: true,
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            backend: TranslatorBackend::Google,
            endpoint: None,
            model: "llama3.2:3b".to_string(),
            timeout_secs: 60,
            target_languages: vec!["en".to_string(), "ru".to_string()],
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            binary_path: "ffmpeg".to_string(),
            sample_rate: 16000,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            temp_audio_suffix: "_temp_audio.wav".to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| JamakError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| JamakError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.translate.target_languages.is_empty() {
            return Err(JamakError::Config("At least one target language is required".to_string()));
        }
        let mut seen = HashSet::new();
        for lang in &self.translate.target_languages {
            if lang.trim().is_empty() {
                return Err(JamakError::Config("Target language codes must not be empty".to_string()));
            }
            // The code becomes part of the output file name
            if lang.contains(['/', '\\']) || lang.contains("..") {
                return Err(JamakError::Config(format!("Invalid target language code: {}", lang)));
            }
            if !seen.insert(lang.as_str()) {
                return Err(JamakError::Config(format!("Duplicate target language: {}", lang)));
            }
        }
        if self.transcriber.source_language.trim().is_empty() {
            return Err(JamakError::Config("Source language must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.transcriber.source_language, "ko");
        assert_eq!(config.transcriber.model, ModelSize::Base);
        assert_eq!(config.transcriber.binary(), "whisper");
        assert_eq!(config.translate.target_languages, vec!["en", "ru"]);
        assert_eq!(config.translate.endpoint(), "https://translate.googleapis.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [transcriber]
            backend = "whisper-cpp"
            model = "small"

            [translate]
            backend = "ollama"
            endpoint = "http://gpu-box:11434/"
            "#,
        )
        .unwrap();

        assert_eq!(config.transcriber.backend, TranscriberBackend::WhisperCpp);
        assert_eq!(config.transcriber.binary(), "whisper-cli");
        assert_eq!(config.transcriber.model, ModelSize::Small);
        assert_eq!(config.translate.endpoint(), "http://gpu-box:11434");
        assert_eq!(config.media.binary_path, "ffmpeg");
        assert_eq!(config.pipeline.temp_audio_suffix, "_temp_audio.wav");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[translate]\ntarget_languages = [\"en\"]\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.translate.target_languages, vec!["en"]);

        std::fs::write(&path, "[translate]\ntarget_languages = [\"en\", \"en\"]\n").unwrap();
        assert!(matches!(Config::from_file(&path), Err(JamakError::Config(_))));
    }

    #[test]
    fn test_duplicate_or_path_like_targets_rejected() {
        for targets in [vec!["en", "ru", "en"], vec!["../en"], vec!["en/ru"], vec!["ru\\en"]] {
            let mut config = Config::default();
            config.translate.target_languages = targets.iter().map(|t| t.to_string()).collect();
            assert!(matches!(config.validate(), Err(JamakError::Config(_))), "{:?} accepted", targets);
        }

        let mut config = Config::default();
        config.translate.target_languages = vec!["en".to_string(), "zh-CN".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../config.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.transcriber.backend, TranscriberBackend::OpenaiWhisper);
        assert_eq!(config.translate.backend, TranslatorBackend::Google);
    }

    #[test]
    fn test_empty_targets_rejected() {
        let mut config = Config::default();
        config.translate.target_languages.clear();
        assert!(matches!(config.validate(), Err(JamakError::Config(_))));
    }
}
