//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// External tool settings used by the handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Path to ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Path to the LibreOffice binary used for document conversion.
    #[serde(default = "default_soffice_path")]
    pub soffice_path: PathBuf,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[serde(default = "default_log_level")]
    pub ffmpeg_log_level: String,

    /// Timeout for a single external tool run in seconds. Unset means wait forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_soffice_path() -> PathBuf {
    PathBuf::from("soffice")
}

fn default_log_level() -> String {
    "error".to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            soffice_path: default_soffice_path(),
            ffmpeg_log_level: default_log_level(),
            timeout_secs: None,
        }
    }
}

impl ConverterConfig {
    /// Creates a new config with custom tool paths.
    pub fn with_paths(ffmpeg_path: PathBuf, soffice_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            soffice_path,
            ..Default::default()
        }
    }

    /// Sets the tool timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Tool timeout as a duration, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
