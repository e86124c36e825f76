//! FFprobe adapter for media duration probing
//!
//! Runs `ffprobe` as a child process and reads the container duration from
//! its JSON output.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    binary: String,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using the given executable
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Extract `format.duration` from ffprobe's JSON output
    pub fn parse_duration(stdout: &[u8]) -> Result<f64, DomainError> {
        let output: FfprobeOutput = serde_json::from_slice(stdout)
            .map_err(|e| DomainError::ProbeFail(format!("Unreadable ffprobe output: {}", e)))?;

        let raw = output
            .format
            .and_then(|format| format.duration)
            .ok_or_else(|| DomainError::ProbeFail("ffprobe reported no duration".to_string()))?;

        let seconds: f64 = raw
            .trim()
            .parse()
            .map_err(|_| DomainError::ProbeFail(format!("Invalid duration: {}", raw)))?;

        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(DomainError::ProbeFail(format!("Invalid duration: {}", raw)));
        }

        Ok(seconds)
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, source: &SourceRef) -> Result<f64, DomainError> {
        debug!(binary = %self.binary, source = %source, "probing duration");

        let output = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "json",
                source.as_str(),
            ])
            .output()
            .await
            .map_err(|e| DomainError::ProbeFail(format!("Failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(source = %source, "ffprobe failed: {}", stderr.trim());
            return Err(DomainError::ProbeFail(format!(
                "ffprobe exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Self::parse_duration(&output.stdout)
    }
}
