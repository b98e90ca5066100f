use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JamakError;

/// Whisper model size; larger models are more accurate but slower
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    #[default]
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub const ALL: [ModelSize; 5] = [
        ModelSize::Tiny,
        ModelSize::Base,
        ModelSize::Small,
        ModelSize::Medium,
        ModelSize::Large,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Base => "base",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// ggml model file used by whisper.cpp
    pub fn ggml_filename(&self) -> &'static str {
        match self {
            Self::Tiny => "ggml-tiny.bin",
            Self::Base => "ggml-base.bin",
            Self::Small => "ggml-small.bin",
            Self::Medium => "ggml-medium.bin",
            Self::Large => "ggml-large-v3.bin",
        }
    }

    /// Approximate download size in megabytes
    pub fn size_mb(&self) -> f64 {
        match self {
            Self::Tiny => 75.0,
            Self::Base => 142.0,
            Self::Small => 466.0,
            Self::Medium => 1500.0,
            Self::Large => 2900.0,
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelSize {
    type Err = JamakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.name() == wanted)
            .ok_or_else(|| JamakError::Config(format!(
                "Invalid model '{}'. Valid models: tiny, base, small, medium, large",
                s
            )))
    }
}
