// Speech recognition backends
//
// Each backend drives an external Whisper command-line tool and maps its JSON
// output onto `Transcription`:
// - OpenAI: the `whisper` Python CLI, models addressed by name
// - WhisperCpp: `whisper-cli` with ggml model files from the model store
//
// To add a backend, deserialize its output into service-specific structs,
// implement `TranscriptionMapper` for them and register it in the factory.

pub mod common;
pub mod model;
pub mod openai;
pub mod whisper_cpp;

use async_trait::async_trait;
use std::path::Path;

pub use common::{LoadedModel, TranscribeOptions, TranscriptionMapper};
pub use model::ModelSize;
use crate::config::{TranscriberBackend, TranscriberConfig};
use crate::error::Result;
use crate::transcription::Transcription;

/// Main trait for transcription operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriberTrait: Send + Sync {
    /// Make the named model ready for use
    async fn load_model(&self, size: ModelSize) -> Result<LoadedModel>;

    /// Transcribe a waveform file into time-stamped segments
    async fn transcribe(
        &self,
        model: &LoadedModel,
        audio_path: &Path,
        options: &TranscribeOptions,
    ) -> Result<Transcription>;
}

/// Factory for creating transcriber instances
pub struct TranscriberFactory;

impl TranscriberFactory {
    pub fn create_transcriber(config: TranscriberConfig) -> Box<dyn TranscriberTrait> {
        match config.backend {
            TranscriberBackend::OpenaiWhisper => {
                Box::new(openai::OpenAITranscriber::new(config))
            }
            TranscriberBackend::WhisperCpp => {
                Box::new(whisper_cpp::WhisperCppTranscriber::new(config))
            }
        }
    }
}
