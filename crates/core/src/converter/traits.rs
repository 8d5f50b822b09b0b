//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConversionError;
use super::types::{Category, HandlerJob};

/// A format-family specific conversion routine.
///
/// Implementations are stateless: each call reads `job.source_path` and
/// either fully writes `job.output_path` or returns an error.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Returns the category this handler serves.
    fn category(&self) -> Category;

    /// Converts one file.
    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError>;
}
