use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, JamakError};
use crate::transcription::Transcription;
use super::ModelSize;

/// Options forwarded to the recognizer for one transcription
#[derive(Debug, Clone, PartialEq)]
pub struct TranscribeOptions {
    /// Forced source language code
    pub language: String,
    /// Request word-level timing; only segment timing is consumed downstream
    pub word_timestamps: bool,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            language: "ko".to_string(),
            word_timestamps: true,
        }
    }
}

/// A recognition model that passed its load checks
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub size: ModelSize,
    /// Model name or model file path, as the backend expects it
    pub location: String,
}

/// Trait for converting service-specific transcription output to [`Transcription`]
pub trait TranscriptionMapper<T> {
    fn to_transcription(service_output: T, language: &str) -> Result<Transcription>;
}

/// Run a recognizer command and fail with its stderr on a non-zero exit
pub async fn run_recognizer(mut cmd: Command, binary: &str) -> Result<()> {
    debug!("Executing recognizer command: {:?}", cmd);

    let output = cmd.output().await
        .map_err(|e| JamakError::Transcription(format!("Failed to execute {}: {}", binary, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(JamakError::Transcription(format!(
            "{} exited with {}: {}",
            binary,
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Check that a recognizer binary can be executed at all
pub async fn probe_binary(binary: &str, arg: &str) -> Result<()> {
    let output = Command::new(binary)
        .arg(arg)
        .output()
        .await
        .map_err(|e| JamakError::ModelLoad(format!("{} not found: {}", binary, e)))?;

    // whisper.cpp prints usage and exits non-zero on some builds
    if output.status.success() || !output.stderr.is_empty() || !output.stdout.is_empty() {
        Ok(())
    } else {
        Err(JamakError::ModelLoad(format!("{} did not respond to {}", binary, arg)))
    }
}

/// Read and parse a recognizer JSON result file
pub async fn read_json_output<T: DeserializeOwned>(json_file: &Path) -> Result<T> {
    if !json_file.exists() {
        return Err(JamakError::Transcription(format!(
            "Recognizer output not found: {}",
            json_file.display()
        )));
    }

    let content = tokio::fs::read_to_string(json_file).await
        .map_err(|e| JamakError::Transcription(format!("Failed to read recognizer output: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| JamakError::Transcription(format!("Failed to parse recognizer output: {}", e)))
}
