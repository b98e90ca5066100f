//! Jamak - Korean video to translated subtitles
//!
//! Extracts the audio track of a video, transcribes the Korean speech with
//! Whisper, translates each segment and writes one SubRip file per target
//! language next to the video.

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod transcribe;
pub mod transcription;
pub mod translate;
pub mod subtitle;
pub mod media;
pub mod error;
pub mod setup;
