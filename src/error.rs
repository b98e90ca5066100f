use thiserror::Error;

#[derive(Error, Debug)]
pub enum JamakError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Video file not found: {0}")]
    NotFound(String),

    #[error("Audio extraction error: {0}")]
    Extraction(String),

    #[error("Failed to load speech recognition model: {0}")]
    ModelLoad(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Failed to write subtitle file: {0}")]
    Write(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JamakError {
    /// Name of the pipeline stage the error belongs to
    pub fn stage(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "input validation",
            Self::Extraction(_) => "audio extraction",
            Self::ModelLoad(_) => "model loading",
            Self::Transcription(_) => "transcription",
            Self::Translation(_) => "translation",
            Self::Write(_) => "subtitle writing",
            Self::Config(_) | Self::Toml(_) => "configuration",
            Self::Io(_) | Self::Json(_) | Self::Http(_) => "runtime",
        }
    }

    fn is_stage_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::Extraction(_)
                | Self::ModelLoad(_)
                | Self::Transcription(_)
                | Self::Translation(_)
                | Self::Write(_)
        )
    }

    /// Attribute a generic error to the stage it surfaced in
    pub fn within(self, stage: fn(String) -> JamakError) -> JamakError {
        if self.is_stage_error() {
            self
        } else {
            stage(self.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, JamakError>;
