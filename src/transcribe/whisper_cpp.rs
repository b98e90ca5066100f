// whisper.cpp command-line implementation

use async_trait::async_trait;
use std::path::Path;
use serde::Deserialize;
use tokio::process::Command;
use tracing::info;

use crate::config::TranscriberConfig;
use crate::error::{Result, JamakError};
use crate::setup::ModelStore;
use crate::transcription::{Segment, Transcription};
use super::{ModelSize, TranscriberTrait};
use super::common::{LoadedModel, TranscribeOptions, TranscriptionMapper, probe_binary, read_json_output, run_recognizer};

const OUTPUT_PREFIX: &str = "transcript";

/// Whisper.cpp specific JSON output format
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperCppOutput {
    pub result: Option<WhisperCppResult>,
    pub transcription: Vec<WhisperCppSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhisperCppResult {
    pub language: String,
}

/// Whisper.cpp specific segment format
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperCppSegment {
    pub offsets: WhisperCppOffsets,
    pub text: String,
}

/// Segment bounds in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperCppOffsets {
    pub from: i64,
    pub to: i64,
}

/// Mapper for Whisper.cpp format
pub struct WhisperCppMapper;

impl TranscriptionMapper<WhisperCppOutput> for WhisperCppMapper {
    fn to_transcription(whisper_output: WhisperCppOutput, language: &str) -> Result<Transcription> {
        let segments = whisper_output.transcription
            .into_iter()
            .map(|seg| {
                let start = seg.offsets.from.max(0) as f64 / 1000.0;
                let end = seg.offsets.to.max(0) as f64 / 1000.0;
                Segment::new(start, end, seg.text)
            })
            .collect();

        let language = whisper_output.result
            .map(|r| r.language)
            .unwrap_or_else(|| language.to_string());
        Ok(Transcription::new(segments, language))
    }
}

/// Whisper.cpp implementation backed by ggml model files
pub struct WhisperCppTranscriber {
    config: TranscriberConfig,
}

impl WhisperCppTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }

    fn build_command(
        &self,
        model: &LoadedModel,
        audio_path: &Path,
        output_dir: &Path,
        options: &TranscribeOptions,
    ) -> Command {
        let mut cmd = Command::new(self.config.binary());
        cmd.arg("-m").arg(&model.location)
            .arg("-f").arg(audio_path)
            .arg("-l").arg(&options.language)
            .arg("-oj")
            .arg("-of").arg(output_dir.join(OUTPUT_PREFIX))
            .arg("-np");

        if options.word_timestamps {
            // Full JSON carries token-level timing
            cmd.arg("-ojf");
        }

        cmd
    }
}

#[async_trait]
impl TranscriberTrait for WhisperCppTranscriber {
    async fn load_model(&self, size: ModelSize) -> Result<LoadedModel> {
        info!("Loading whisper.cpp model '{}'", size);

        probe_binary(self.config.binary(), "--help").await?;

        let store = ModelStore::new(&self.config.model_dir)
            .map_err(|e| JamakError::ModelLoad(e.to_string()))?;
        let model_path = store.ensure_model(size).await
            .map_err(|e| match e {
                JamakError::ModelLoad(msg) => JamakError::ModelLoad(msg),
                other => JamakError::ModelLoad(format!("Model {} unavailable: {}", size, other)),
            })?;

        Ok(LoadedModel {
            size,
            location: model_path.to_string_lossy().to_string(),
        })
    }

    async fn transcribe(
        &self,
        model: &LoadedModel,
        audio_path: &Path,
        options: &TranscribeOptions,
    ) -> Result<Transcription> {
        info!("Starting whisper.cpp transcription of: {}", audio_path.display());

        let temp_dir = tempfile::tempdir()
            .map_err(|e| JamakError::Transcription(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        let cmd = self.build_command(model, audio_path, output_dir, options);
        run_recognizer(cmd, self.config.binary()).await?;

        let json_file = output_dir.join(format!("{}.json", OUTPUT_PREFIX));
        let output: WhisperCppOutput = read_json_output(&json_file).await?;
        let transcription = WhisperCppMapper::to_transcription(output, &options.language)?;

        info!("whisper.cpp transcription completed: {} segments", transcription.segments.len());
        Ok(transcription)
    }
}
