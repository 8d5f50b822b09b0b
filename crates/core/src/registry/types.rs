use serde::Serialize;
use thiserror::Error;

use crate::converter::Category;

/// One registered conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionSpec {
    /// Unique display label; the lookup key.
    pub label: &'static str,
    /// Handler family that performs the conversion.
    pub category: Category,
    /// Declared source extension (lowercase, no dot).
    pub source_ext: &'static str,
    /// Target extension (lowercase, no dot).
    pub target_ext: &'static str,
}

impl ConversionSpec {
    pub const fn new(
        label: &'static str,
        category: Category,
        source_ext: &'static str,
        target_ext: &'static str,
    ) -> Self {
        Self {
            label,
            category,
            source_ext,
            target_ext,
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate conversion label: {0}")]
    DuplicateLabel(String),

    #[error("Invalid extension {extension:?} in conversion {label:?}")]
    InvalidExtension { label: String, extension: String },
}
