//! Office document handler backed by LibreOffice.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use super::process::{run_tool, stderr_text};
use crate::converter::config::ConverterConfig;
use crate::converter::error::ConversionError;
use crate::converter::traits::Handler;
use crate::converter::types::{Category, HandlerJob};

/// Converts office documents by running `soffice --headless --convert-to`.
///
/// The tool is assumed to be installed; when it is not, the failure
/// surfaces from the conversion itself.
#[derive(Debug, Clone)]
pub struct OfficeHandler {
    config: ConverterConfig,
}

impl OfficeHandler {
    /// Creates a new office handler.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    fn build_args(source: &Path, outdir: &Path, target_ext: &str) -> Vec<String> {
        vec![
            "--headless".to_string(),
            "--norestore".to_string(),
            "--convert-to".to_string(),
            target_ext.to_string(),
            "--outdir".to_string(),
            outdir.to_string_lossy().to_string(),
            source.to_string_lossy().to_string(),
        ]
    }

    /// Path soffice writes to: `<outdir>/<source stem>.<target_ext>`.
    fn produced_path(source: &Path, outdir: &Path, target_ext: &str) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        outdir.join(format!("{}.{}", stem, target_ext))
    }

    async fn convert_in(&self, job: &HandlerJob, outdir: &Path) -> Result<(), ConversionError> {
        let args = Self::build_args(&job.source_path, outdir, &job.target_ext);
        let output = run_tool(&self.config.soffice_path, &args, self.config.timeout())
            .await
            .map_err(|e| e.into_conversion_error("LibreOffice", &self.config.soffice_path))?;

        if !output.status.success() {
            return Err(ConversionError::conversion_failed(
                format!("LibreOffice exited with code: {:?}", output.status.code()),
                stderr_text(&output),
            ));
        }

        // soffice exits 0 even when a filter fails, so the file is the real signal.
        let produced = Self::produced_path(&job.source_path, outdir, &job.target_ext);
        if !tokio::fs::try_exists(&produced).await.unwrap_or(false) {
            return Err(ConversionError::conversion_failed(
                format!("LibreOffice did not produce {:?}", produced),
                stderr_text(&output),
            ));
        }

        // Copy rather than rename: the temp dir may be on another filesystem.
        tokio::fs::copy(&produced, &job.output_path).await?;
        debug!("Converted {:?} via LibreOffice", job.source_path);
        Ok(())
    }
}

#[async_trait]
impl Handler for OfficeHandler {
    fn category(&self) -> Category {
        Category::DocumentToDocument
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        let outdir = std::env::temp_dir().join(format!("transmute-office-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&outdir).await?;

        let result = self.convert_in(job, &outdir).await;

        if let Err(e) = tokio::fs::remove_dir_all(&outdir).await {
            warn!("Failed to remove temp dir {:?}: {}", outdir, e);
        }
        result
    }
}
