use async_trait::async_trait;
use std::path::Path;
use tracing::{info, debug};

use crate::config::MediaConfig;
use crate::error::{Result, JamakError};
use super::{MediaProcessorTrait, MediaCommandBuilder};

/// Concrete implementation of media processor (FFmpeg-based)
pub struct MediaProcessorImpl {
    config: MediaConfig,
    command_builder: MediaCommandBuilder,
}

impl MediaProcessorImpl {
    /// Create a new media processor implementation
    pub fn new(config: MediaConfig) -> Self {
        let command_builder = MediaCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl MediaProcessorTrait for MediaProcessorImpl {
    async fn extract_audio(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> Result<()> {
        info!("Extracting audio from {} to {}", video_path.display(), audio_path.display());

        let command = self.command_builder.extract_audio(video_path, audio_path, self.config.sample_rate);
        command.execute().await?;

        if !audio_path.exists() {
            return Err(JamakError::Extraction(format!(
                "{} produced no audio file at {}",
                self.config.binary_path,
                audio_path.display()
            )));
        }

        info!("Audio extraction completed");
        Ok(())
    }

    async fn check_availability(&self) -> Result<String> {
        debug!("Getting media processor version information");

        let stdout = self.command_builder.version_check().execute().await
            .map_err(|e| JamakError::Extraction(format!("Media processor not available: {}", e)))?;

        // The first line carries the version
        let version = stdout.lines().next().unwrap_or("Unknown version").to_string();
        info!("Media processor is available: {}", version);
        Ok(version)
    }
}
