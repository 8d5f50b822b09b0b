//! FFmpeg-based audio handler.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use super::process::{run_tool, stderr_text};
use crate::converter::config::ConverterConfig;
use crate::converter::error::ConversionError;
use crate::converter::traits::Handler;
use crate::converter::types::{AudioFormat, Category, HandlerJob};

/// Transcodes audio by shelling out to ffmpeg.
///
/// Availability is decided once by the capability probe and passed in;
/// the handler never probes on its own.
#[derive(Debug, Clone)]
pub struct AudioHandler {
    config: ConverterConfig,
    available: bool,
}

impl AudioHandler {
    /// Creates a new audio handler.
    pub fn new(config: ConverterConfig, available: bool) -> Self {
        Self { config, available }
    }

    /// Builds ffmpeg arguments for one transcode.
    fn build_args(
        &self,
        input_path: &Path,
        output_path: &Path,
        input: AudioFormat,
        output: AudioFormat,
    ) -> Vec<String> {
        vec![
            "-y".to_string(), // Overwrite output
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            "-f".to_string(),
            input.ffmpeg_format().to_string(),
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-c:a".to_string(),
            output.ffmpeg_codec().to_string(),
            // Output path may be a staging name, so the muxer is explicit.
            "-f".to_string(),
            output.ffmpeg_format().to_string(),
            output_path.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl Handler for AudioHandler {
    fn category(&self) -> Category {
        Category::Audio
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        if !self.available {
            return Err(ConversionError::missing_dependency(
                "FFmpeg",
                "it is not installed or not in PATH",
            ));
        }

        let input = AudioFormat::from_extension(&job.source_ext)?;
        let output = AudioFormat::from_extension(&job.target_ext)?;
        let args = self.build_args(&job.source_path, &job.output_path, input, output);

        let result = run_tool(&self.config.ffmpeg_path, &args, self.config.timeout())
            .await
            .map_err(|e| e.into_conversion_error("FFmpeg", &self.config.ffmpeg_path))?;

        if !result.status.success() {
            return Err(ConversionError::conversion_failed(
                format!("FFmpeg exited with code: {:?}", result.status.code()),
                stderr_text(&result),
            ));
        }

        tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| ConversionError::conversion_failed("Output file not created", None))?;
        debug!("Transcoded {:?} to {:?}", job.source_path, job.output_path);
        Ok(())
    }
}
