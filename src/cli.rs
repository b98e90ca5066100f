use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate translated subtitles for a single video file
    Generate {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Whisper model size (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<String>,

        /// Output directory for subtitle files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Generate subtitles for all video files in a directory
    Batch {
        /// Input directory containing video files
        #[arg(short = 'd', long)]
        input_dir: PathBuf,

        /// Whisper model size (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<String>,

        /// Output directory for subtitle files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Extract audio from video file
    Extract {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output audio file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show entry count and time span of a SubRip file
    Inspect {
        /// Input subtitle file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List whisper.cpp models and their status
    Models {
        /// Download all missing models
        #[arg(long)]
        download: bool,
    },
}
