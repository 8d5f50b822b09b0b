//! Optional capability detection.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::config::ConverterConfig;

/// Optional capabilities detected once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// FFmpeg can be launched.
    pub audio_transcoder: bool,
    /// PDF text extraction was compiled in.
    pub text_extraction: bool,
}

impl Capabilities {
    /// Probes the host environment.
    ///
    /// Never fails: an absent tool is reported as `false`.
    pub async fn detect(config: &ConverterConfig) -> Self {
        let caps = Self {
            audio_transcoder: probe_ffmpeg(&config.ffmpeg_path).await,
            text_extraction: text_extraction_compiled(),
        };
        info!(
            "Capabilities: audio_transcoder={}, text_extraction={}",
            caps.audio_transcoder, caps.text_extraction
        );
        caps
    }

    /// Every capability present. Intended for tests.
    pub fn all() -> Self {
        Self {
            audio_transcoder: true,
            text_extraction: true,
        }
    }

    /// No capability present. Intended for tests.
    pub fn none() -> Self {
        Self::default()
    }
}

fn text_extraction_compiled() -> bool {
    cfg!(feature = "pdf-text")
}

/// Runs `<ffmpeg> -version` with all output captured.
///
/// Any exit status counts as present; only a failure to launch the binary
/// counts as absent.
pub async fn probe_ffmpeg(ffmpeg_path: &Path) -> bool {
    let output = Command::new(ffmpeg_path)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await;

    match output {
        Ok(o) => {
            let stdout = String::from_utf8_lossy(&o.stdout);
            match parse_ffmpeg_version(&stdout) {
                Some(version) => debug!("Found ffmpeg {} at {:?}", version, ffmpeg_path),
                None => debug!("Found ffmpeg at {:?} (unknown version)", ffmpeg_path),
            }
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("ffmpeg not found at {:?}, audio conversions disabled", ffmpeg_path);
            false
        }
        Err(e) => {
            warn!("Failed to launch ffmpeg at {:?}: {}", ffmpeg_path, e);
            false
        }
    }
}

/// Extracts the version token from `ffmpeg -version` output.
fn parse_ffmpeg_version(output: &str) -> Option<String> {
    let re = Regex::new(r"ffmpeg version (\S+)").ok()?;
    re.captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
