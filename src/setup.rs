use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tokio::io::AsyncWriteExt;
use reqwest::{Client, Response};
use tracing::{info, warn};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Result, JamakError};
use crate::transcribe::ModelSize;

const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Local store of ggml models for whisper.cpp
pub struct ModelStore {
    client: Client,
    model_dir: PathBuf,
    base_url: String,
}

#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub size: ModelSize,
    pub filename: String,
    pub url: String,
    pub size_mb: f64,
}

impl ModelStore {
    pub fn new<P: AsRef<Path>>(model_dir: P) -> Result<Self> {
        Self::with_base_url(model_dir, MODEL_BASE_URL)
    }

    pub fn with_base_url<P: AsRef<Path>>(model_dir: P, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jamak/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            model_dir: model_dir.as_ref().to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn available_models(&self) -> Vec<ModelInfo> {
        ModelSize::ALL
            .into_iter()
            .map(|size| self.model_info(size))
            .collect()
    }

    pub fn model_info(&self, size: ModelSize) -> ModelInfo {
        ModelInfo {
            size,
            filename: size.ggml_filename().to_string(),
            url: format!("{}/{}", self.base_url, size.ggml_filename()),
            size_mb: size.size_mb(),
        }
    }

    pub fn model_path(&self, size: ModelSize) -> PathBuf {
        self.model_dir.join(size.ggml_filename())
    }

    pub fn is_downloaded(&self, size: ModelSize) -> bool {
        self.model_path(size).is_file()
    }

    /// Return the local model file, downloading it on first use
    pub async fn ensure_model(&self, size: ModelSize) -> Result<PathBuf> {
        let local_path = self.model_path(size);
        if local_path.is_file() {
            info!("Model {} found at {}", size, local_path.display());
            return Ok(local_path);
        }

        info!("Model {} not found locally", size);
        self.download_model(&self.model_info(size)).await
    }

    pub async fn download_model(&self, model: &ModelInfo) -> Result<PathBuf> {
        let local_path = self.model_dir.join(&model.filename);

        if local_path.exists() {
            info!("Model {} already exists at {}", model.size, local_path.display());
            return Ok(local_path);
        }

        async_fs::create_dir_all(&self.model_dir).await?;

        info!("Downloading {} model ({:.1} MB)...", model.size, model.size_mb);

        let mut response = self.client.get(&model.url).send().await?;

        if !response.status().is_success() {
            return Err(JamakError::ModelLoad(format!(
                "Failed to download model {}: HTTP {}",
                model.size, response.status()
            )));
        }

        let total = response.content_length().unwrap_or((model.size_mb * 1_000_000.0) as u64);
        let pb = ProgressBar::new(total);
        pb.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .map_err(|e| JamakError::Config(format!("Invalid progress template: {}", e)))?
            .progress_chars("#>-"));

        // Download into a temp file so an interrupted transfer never looks like a model
        let temp_path = local_path.with_extension("tmp");
        if let Err(e) = stream_to_file(&mut response, &temp_path, &pb).await {
            pb.abandon();
            if let Err(remove_err) = async_fs::remove_file(&temp_path).await {
                warn!("Failed to remove partial download {}: {}", temp_path.display(), remove_err);
            }
            return Err(e);
        }

        async_fs::rename(&temp_path, &local_path).await?;

        pb.finish_with_message(format!("Downloaded {}", model.size));
        info!("Successfully downloaded {} to {}", model.size, local_path.display());

        Ok(local_path)
    }
}

async fn stream_to_file(response: &mut Response, path: &Path, pb: &ProgressBar) -> Result<()> {
    let mut file = async_fs::File::create(path).await?;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        pb.inc(chunk.len() as u64);
    }

    file.flush().await?;
    Ok(())
}
