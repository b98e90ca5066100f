use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{Result, JamakError};

const MICROS_PER_SECOND: u64 = 1_000_000;

/// One numbered block of a SubRip file
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start_code: String,
    pub end_code: String,
    pub text: String,
}

impl SubtitleEntry {
    pub fn new<S: Into<String>>(index: usize, start: f64, end: f64, text: S) -> Self {
        Self {
            index,
            start_code: format_time(start),
            end_code: format_time(end),
            text: text.into(),
        }
    }

    /// Render as `index`, time range, text and the blank separator line
    pub fn to_srt_block(&self) -> String {
        format!(
            "{}\n{} --> {}\n{}\n\n",
            self.index, self.start_code, self.end_code, self.text
        )
    }
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm)
///
/// The value is rounded to whole microseconds first and milliseconds are then
/// truncated, so `3661.2005` renders as `01:01:01,200`. Hours are not wrapped
/// at 24. Negative and non-finite input renders as zero.
pub fn format_time(seconds: f64) -> String {
    let total_micros = if seconds.is_finite() && seconds > 0.0 {
        (seconds * MICROS_PER_SECOND as f64).round() as u64
    } else {
        0
    };

    let whole_seconds = total_micros / MICROS_PER_SECOND;
    let millis = (total_micros % MICROS_PER_SECOND) / 1_000;
    let hours = whole_seconds / 3600;
    let minutes = (whole_seconds % 3600) / 60;
    let secs = whole_seconds % 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Parse an `HH:MM:SS,mmm` time code into seconds
pub fn parse_time_code(code: &str) -> Option<f64> {
    let (clock, millis) = code.trim().split_once([',', '.'])?;
    let mut parts = clock.split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let secs: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || secs >= 60 {
        return None;
    }
    let millis: u64 = millis.parse().ok()?;
    if millis >= 1000 {
        return None;
    }

    let total_millis = ((hours * 60 + minutes) * 60 + secs) * 1000 + millis;
    Some(total_millis as f64 / 1000.0)
}

/// Entry read back from a SubRip file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Parse SubRip content into entries, skipping malformed blocks
pub fn parse_srt(content: &str) -> Vec<ParsedEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines().peekable();

    while lines.peek().is_some() {
        while lines.peek().is_some_and(|l| l.trim().is_empty()) {
            lines.next();
        }

        let Some(index_line) = lines.next() else {
            break;
        };
        let Ok(index) = index_line.trim().trim_start_matches('\u{feff}').parse::<usize>() else {
            continue;
        };

        let Some(range_line) = lines.next() else {
            break;
        };
        let Some((start, end)) = range_line
            .split_once("-->")
            .and_then(|(start, end)| Some((parse_time_code(start)?, parse_time_code(end)?)))
        else {
            continue;
        };

        let mut text_lines = Vec::new();
        while let Some(line) = lines.next_if(|l| !l.trim().is_empty()) {
            text_lines.push(line.trim_end());
        }

        entries.push(ParsedEntry {
            index,
            start,
            end,
            text: text_lines.join("\n"),
        });
    }

    entries
}

/// Sequential writer for one SubRip output file
///
/// Every entry is flushed as soon as it is written, so entries emitted before
/// a failure elsewhere in the pipeline stay on disk.
pub struct SrtWriter {
    path: PathBuf,
    file: File,
    entries: usize,
}

impl SrtWriter {
    /// Create (or truncate) the output file
    pub async fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Creating subtitle file: {}", path.display());

        let file = File::create(&path).await
            .map_err(|e| JamakError::Write(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            path,
            file,
            entries: 0,
        })
    }

    pub async fn write_entry(&mut self, entry: &SubtitleEntry) -> Result<()> {
        debug!("{} <- entry {}", self.path.display(), entry.index);

        self.file.write_all(entry.to_srt_block().as_bytes()).await
            .map_err(|e| JamakError::Write(format!("{}: {}", self.path.display(), e)))?;
        self.file.flush().await
            .map_err(|e| JamakError::Write(format!("{}: {}", self.path.display(), e)))?;

        self.entries += 1;
        Ok(())
    }

    /// Flush and close the file, returning its path and entry count
    pub async fn finish(self) -> Result<(PathBuf, usize)> {
        self.file.sync_all().await
            .map_err(|e| JamakError::Write(format!("{}: {}", self.path.display(), e)))?;
        info!("Wrote {} entries to {}", self.entries, self.path.display());
        Ok((self.path, self.entries))
    }
}
