//! Edit scripts: a replayable list of timeline actions
//!
//! ```toml
//! [[steps]]
//! op = "upload"
//! files = ["intro.mp4", "music.mp3"]
//!
//! [[steps]]
//! op = "cut"
//! track = "intro.mp4"
//! segment = 0
//! at = "0:04.5"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TrackcutError, TrackcutResult};
use crate::utils::time::parse_time;

/// A time given either as seconds or as `MM:SS(.ms)` text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeArg {
    Seconds(f64),
    Text(String),
}

impl TimeArg {
    pub fn seconds(&self) -> TrackcutResult<f64> {
        match self {
            TimeArg::Seconds(seconds) if seconds.is_finite() => Ok(*seconds),
            TimeArg::Seconds(seconds) => Err(TrackcutError::InvalidTimeFormat {
                time: seconds.to_string(),
            }),
            TimeArg::Text(text) => parse_time(text),
        }
    }
}

/// One scripted action. Tracks are referenced by id or by name; segments by
/// their position in the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    Upload { files: Vec<PathBuf> },
    Seek { time: TimeArg },
    Click { x: f64, width: f64 },
    Drag { x: f64, width: f64 },
    Select { track: String, segment: usize },
    Cut { track: String, segment: usize, at: TimeArg },
    CutSelected,
    RemoveSegment { track: String, segment: usize },
    RemoveTrack { track: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditScript {
    #[serde(default)]
    pub steps: Vec<EditStep>,
}

impl EditScript {
    pub fn from_json(content: &str) -> TrackcutResult<Self> {
        serde_json::from_str(content).map_err(|e| TrackcutError::ScriptError {
            message: e.to_string(),
        })
    }

    pub fn from_toml(content: &str) -> TrackcutResult<Self> {
        toml::from_str(content).map_err(|e| TrackcutError::ScriptError {
            message: e.to_string(),
        })
    }

    /// Load a `.toml` or `.json` script. Relative upload paths are resolved
    /// against the script's directory.
    pub fn load(path: &Path) -> TrackcutResult<Self> {
        if !path.is_file() {
            return Err(TrackcutError::InputFileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

        let script = if is_toml {
            Self::from_toml(&content)?
        } else {
            Self::from_json(&content)?
        };

        match path.parent() {
            Some(base) if !base.as_os_str().is_empty() => Ok(script.resolved_against(base)),
            _ => Ok(script),
        }
    }

    /// Make relative upload paths relative to `base`
    pub fn resolved_against(mut self, base: &Path) -> Self {
        for step in &mut self.steps {
            if let EditStep::Upload { files } = step {
                for file in files.iter_mut().filter(|f| f.is_relative()) {
                    *file = base.join(&*file);
                }
            }
        }
        self
    }
}
