//! PDF text extraction handler.

use async_trait::async_trait;

use crate::converter::error::ConversionError;
use crate::converter::traits::Handler;
use crate::converter::types::{Category, HandlerJob};

/// Extracts the text of every page and concatenates it without separators.
///
/// Pages without a text layer contribute nothing. Whether extraction is
/// available is decided at startup and passed in.
#[derive(Debug, Clone)]
pub struct PdfTextHandler {
    available: bool,
}

impl PdfTextHandler {
    /// Creates a new PDF text handler.
    pub fn new(available: bool) -> Self {
        Self { available }
    }
}

/// Joins per-page text in page order with no separator.
fn join_pages(pages: &[String]) -> String {
    pages.concat()
}

#[cfg(feature = "pdf-text")]
fn extract(job: &HandlerJob) -> Result<(), ConversionError> {
    use std::io::Write;
    use tracing::debug;

    let bytes = std::fs::read(&job.source_path)?;
    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .map_err(|e| ConversionError::decode("pdf", e))?;
    let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
    debug!("Extracted {} pages ({} without text)", pages.len(), empty);

    let mut file = std::fs::File::create(&job.output_path)?;
    file.write_all(join_pages(&pages).as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(not(feature = "pdf-text"))]
fn extract(_job: &HandlerJob) -> Result<(), ConversionError> {
    Err(missing())
}

fn missing() -> ConversionError {
    ConversionError::missing_dependency(
        "PDF text extraction",
        "this build was compiled without the `pdf-text` feature",
    )
}

#[async_trait]
impl Handler for PdfTextHandler {
    fn category(&self) -> Category {
        Category::DocumentToText
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        if !self.available {
            return Err(missing());
        }
        if job.source_ext != "pdf" {
            return Err(ConversionError::unsupported(job.source_ext.clone()));
        }
        let job = job.clone();
        super::run_blocking(move || extract(&job)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn job(dir: &TempDir) -> HandlerJob {
        HandlerJob {
            source_path: dir.path().join("scan.pdf"),
            output_path: dir.path().join("scan_converted.txt"),
            source_ext: "pdf".to_string(),
            target_ext: "txt".to_string(),
        }
    }

    #[test]
    fn test_join_pages_has_no_separators() {
        let pages = vec!["one\n".to_string(), String::new(), "three".to_string()];
        assert_eq!(join_pages(&pages), "one\nthree");
    }

    #[tokio::test]
    async fn test_unavailable_is_missing_dependency() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("scan.pdf"), b"%PDF-1.4\n").unwrap();

        let job = job(&dir);
        let err = PdfTextHandler::new(false).handle(&job).await.unwrap_err();
        assert!(matches!(err, ConversionError::MissingDependency { .. }));
        assert!(!job.output_path.exists());
    }

    #[cfg(feature = "pdf-text")]
    #[tokio::test]
    async fn test_not_a_pdf_is_decode_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("scan.pdf"), b"plain text pretending").unwrap();

        let job = job(&dir);
        let err = PdfTextHandler::new(true).handle(&job).await.unwrap_err();
        assert!(matches!(err, ConversionError::DecodeError { .. }), "{err:?}");
        assert!(!job.output_path.exists());
    }
}
