use serde::{Deserialize, Serialize};

/// One time-bounded unit of recognized speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Source-language text, possibly blank
    pub text: String,
}

impl Segment {
    pub fn new<S: Into<String>>(start: f64, end: f64, text: S) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Trimmed text, or `None` when the segment carries no speech
    pub fn spoken_text(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub segments: Vec<Segment>,
    pub language: String,
}

impl Transcription {
    pub fn new<S: Into<String>>(segments: Vec<Segment>, language: S) -> Self {
        let text = segments
            .iter()
            .filter_map(|seg| seg.spoken_text())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            text,
            segments,
            language: language.into(),
        }
    }

    /// Number of segments that will produce subtitle entries
    pub fn spoken_segments(&self) -> usize {
        self.segments.iter().filter(|seg| seg.spoken_text().is_some()).count()
    }

    /// End time of the last segment
    pub fn duration(&self) -> Option<f64> {
        self.segments.last().map(|seg| seg.end)
    }
}
