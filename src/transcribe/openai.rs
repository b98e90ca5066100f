// OpenAI Whisper command-line implementation

use async_trait::async_trait;
use std::path::Path;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{info, debug};

use crate::config::TranscriberConfig;
use crate::error::{Result, JamakError};
use crate::transcription::{Segment, Transcription};
use super::{ModelSize, TranscriberTrait};
use super::common::{LoadedModel, TranscribeOptions, TranscriptionMapper, probe_binary, read_json_output, run_recognizer};

/// OpenAI Whisper specific JSON output format
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIWhisperOutput {
    #[serde(default)]
    pub text: String,
    pub segments: Vec<OpenAIWhisperSegment>,
    pub language: Option<String>,
}

/// OpenAI Whisper specific segment format
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIWhisperSegment {
    pub id: u64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub words: Vec<OpenAIWhisperWord>,
}

/// Word timing, present when `--word_timestamps True` is passed
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIWhisperWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// Mapper for OpenAI Whisper format
pub struct OpenAIWhisperMapper;

impl TranscriptionMapper<OpenAIWhisperOutput> for OpenAIWhisperMapper {
    fn to_transcription(whisper_output: OpenAIWhisperOutput, language: &str) -> Result<Transcription> {
        let segments = whisper_output.segments
            .into_iter()
            .map(|seg| {
                debug!("segment {} [{:.3}-{:.3}] with {} words", seg.id, seg.start, seg.end, seg.words.len());
                Segment::new(seg.start, seg.end, seg.text)
            })
            .collect();

        let language = whisper_output.language.unwrap_or_else(|| language.to_string());
        Ok(Transcription::new(segments, language))
    }
}

const WARMUP_SAMPLE_RATE: u32 = 16_000;
const WARMUP_MILLIS: u32 = 500;

/// Write a short 16-bit mono silent clip
fn write_silence(path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: WARMUP_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let to_error = |e: hound::Error| JamakError::ModelLoad(format!("Failed to write warm-up audio: {}", e));

    let mut writer = hound::WavWriter::create(path, spec).map_err(to_error)?;
    for _ in 0..WARMUP_SAMPLE_RATE * WARMUP_MILLIS / 1000 {
        writer.write_sample(0i16).map_err(to_error)?;
    }
    writer.finalize().map_err(to_error)?;
    Ok(())
}

/// OpenAI Whisper implementation
pub struct OpenAITranscriber {
    config: TranscriberConfig,
}

impl OpenAITranscriber {
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
        cmd.arg(audio_path)
            .arg("--model").arg(&model.location)
            .arg("--language").arg(&options.language)
            .arg("--task").arg("transcribe")
            .arg("--output_dir").arg(output_dir)
            .arg("--output_format").arg("json")
            .arg("--verbose").arg("False");

        if options.word_timestamps {
            cmd.arg("--word_timestamps").arg("True");
        }

        cmd
    }
}

#[async_trait]
impl TranscriberTrait for OpenAITranscriber {
    async fn load_model(&self, size: ModelSize) -> Result<LoadedModel> {
        info!("Loading OpenAI Whisper model '{}'", size);
        probe_binary(self.config.binary(), "--help").await
            .map_err(|e| JamakError::ModelLoad(format!(
                "OpenAI Whisper not available (install with: pip install openai-whisper): {}",
                e
            )))?;

        let model = LoadedModel {
            size,
            location: size.name().to_string(),
        };

        // The CLI only loads (and on first use downloads) a model while
        // transcribing, so run it once over a short silent clip
        let temp_dir = tempfile::tempdir()
            .map_err(|e| JamakError::ModelLoad(format!("Failed to create temp directory: {}", e)))?;
        let clip = temp_dir.path().join("warmup.wav");
        write_silence(&clip)?;

        let options = TranscribeOptions {
            language: self.config.source_language.clone(),
            word_timestamps: false,
        };
        let cmd = self.build_command(&model, &clip, temp_dir.path(), &options);
        run_recognizer(cmd, self.config.binary()).await
            .map_err(|e| match e {
                JamakError::Transcription(msg) => JamakError::ModelLoad(format!("Model {}: {}", size, msg)),
                other => JamakError::ModelLoad(format!("Model {}: {}", size, other)),
            })?;

        info!("Model '{}' loaded", size);
        Ok(model)
    }

    async fn transcribe(
        &self,
        model: &LoadedModel,
        audio_path: &Path,
        options: &TranscribeOptions,
    ) -> Result<Transcription> {
        info!("Starting OpenAI Whisper transcription of: {}", audio_path.display());

        let temp_dir = tempfile::tempdir()
            .map_err(|e| JamakError::Transcription(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        let cmd = self.build_command(model, audio_path, output_dir, options);
        run_recognizer(cmd, self.config.binary()).await?;

        let audio_stem = audio_path.file_stem()
            .ok_or_else(|| JamakError::Transcription("Invalid audio filename".to_string()))?;
        let json_file = output_dir.join(format!("{}.json", audio_stem.to_string_lossy()));

        let output: OpenAIWhisperOutput = read_json_output(&json_file).await?;
        let transcription = OpenAIWhisperMapper::to_transcription(output, &options.language)?;

        info!("OpenAI Whisper transcription completed: {} segments", transcription.segments.len());
        Ok(transcription)
    }
}
