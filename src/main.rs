//! Jamak - Korean video to translated subtitles
//!
//! Command-line entry point: sets up logging, loads the configuration and
//! dispatches to the subtitle pipeline.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use jamak::cli::{Args, Commands};
use jamak::config::Config;
use jamak::pipeline::{check_input_dir, Job, Pipeline};
use jamak::setup::ModelStore;
use jamak::subtitle::{format_time, parse_srt};
use jamak::transcribe::ModelSize;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Generate { input, model, output_dir } => {
            let model = resolve_model(model.as_deref(), &config)?;
            let mut job = Job::new(&input, model);
            if let Some(dir) = output_dir {
                job = job.with_output_dir(dir);
            }
            job.validate()?;

            let pipeline = Pipeline::new(config)?;
            pipeline.check_dependencies().await?;

            match pipeline.run(&job).await {
                Ok(output) => {
                    for subtitle in &output.subtitles {
                        println!("{} subtitles saved to: {}", subtitle.language, subtitle.path.display());
                    }
                }
                Err(e) => {
                    error!("Subtitle generation failed during {}: {}", e.stage(), e);
                    return Err(e.into());
                }
            }
        }
        Commands::Batch { input_dir, model, output_dir } => {
            let model = resolve_model(model.as_deref(), &config)?;
            check_input_dir(&input_dir)?;

            let pipeline = Pipeline::new(config)?;
            pipeline.check_dependencies().await?;

            let results = pipeline.run_directory(&input_dir, model, output_dir.as_deref()).await?;
            let failed = results.iter().filter(|(_, result)| result.is_err()).count();
            info!("Batch complete: {} succeeded, {} failed", results.len() - failed, failed);

            for (video, result) in &results {
                match result {
                    Ok(output) => println!("OK     {} ({} subtitle files)", video.display(), output.subtitles.len()),
                    Err(e) => println!("FAILED {} ({})", video.display(), e),
                }
            }
        }
        Commands::Extract { input, output } => {
            info!("Extracting audio from: {}", input.display());
            let pipeline = Pipeline::new(config)?;
            pipeline.extract_audio(&input, &output).await?;
            println!("Audio saved to: {}", output.display());
        }
        Commands::Inspect { input } => {
            let content = std::fs::read_to_string(&input)?;
            let entries = parse_srt(&content);

            println!("{}: {} entries", input.display(), entries.len());
            if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
                println!("Span: {} --> {}", format_time(first.start), format_time(last.end));
            }
        }
        Commands::Models { download } => {
            let store = ModelStore::new(&config.transcriber.model_dir)?;
            let models = store.available_models();

            println!("\nAvailable Whisper Models:");
            println!("{:<10} {:<22} {:<10} {:<10}", "Name", "Filename", "Size (MB)", "Status");
            println!("{}", "-".repeat(55));

            for model in &models {
                let status = if store.is_downloaded(model.size) { "Downloaded" } else { "Missing" };
                println!("{:<10} {:<22} {:<10.1} {:<10}", model.size.name(), model.filename, model.size_mb, status);
            }

            if download {
                info!("Downloading all missing models...");
                for model in &models {
                    if !store.is_downloaded(model.size) {
                        store.download_model(model).await?;
                    }
                }
                info!("All models downloaded successfully");
            }
        }
    }

    Ok(())
}

/// Model size from the command line, falling back to the configured one
fn resolve_model(model: Option<&str>, config: &Config) -> Result<ModelSize> {
    match model {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.transcriber.model),
    }
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".jamak").join("log");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "jamak.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("jamak.log").display());

    Ok(())
}
