//! Built-in handlers, one per [`Category`](super::Category).

mod audio;
mod office;
mod pdf_text;
mod process;
mod raster;
mod spreadsheet;
mod table;
mod tabular;
mod text_pdf;

pub use audio::AudioHandler;
pub use office::OfficeHandler;
pub use pdf_text::PdfTextHandler;
pub use raster::ImageHandler;
pub use spreadsheet::{SpreadsheetToTabularHandler, TabularToSpreadsheetHandler};
pub use table::Table;
pub use tabular::TabularInterchangeHandler;
pub use text_pdf::TextToPdfHandler;

use super::error::ConversionError;

/// Runs CPU-bound codec work on the blocking pool.
///
/// A panic inside a codec library is reported as a conversion failure
/// instead of tearing down the caller.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, ConversionError>
where
    F: FnOnce() -> Result<T, ConversionError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(ConversionError::conversion_failed(
            "codec library panicked while processing the file",
            None,
        )),
        Err(e) => Err(ConversionError::conversion_failed(e.to_string(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_blocking_returns_value() {
        let value = run_blocking(|| Ok(21 * 2)).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_blocking_converts_panic() {
        let result: Result<(), _> = run_blocking(|| panic!("boom")).await;
        let err = result.unwrap_err();
        assert!(matches!(err, ConversionError::ConversionFailed { .. }));
    }
}
