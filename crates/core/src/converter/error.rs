//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`ConversionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown conversion label.
    NotFound,
    /// Source file does not exist or is not a regular file.
    SourceNotFound,
    /// A required external tool or library is absent.
    MissingDependency,
    /// Source bytes do not match the declared format.
    DecodeError,
    /// Text cannot be decoded under the assumed character encoding.
    EncodingError,
    /// Format not handled by the underlying codec.
    UnsupportedFormat,
    /// Any other failure of an underlying library or tool.
    ConversionError,
}

/// Errors that can occur while dispatching or running a conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The conversion label is not registered.
    #[error("Unknown conversion: {label}")]
    NotFound { label: String },

    /// Source file missing or not a regular file.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// An external tool or optional library is not available.
    #[error("{dependency} is not available: {hint}")]
    MissingDependency { dependency: String, hint: String },

    /// Source data could not be decoded as the declared format.
    #[error("Failed to decode {format} data: {reason}")]
    DecodeError { format: String, reason: String },

    /// Source text is not valid in the assumed encoding.
    #[error("Invalid text encoding in {path}: {reason}")]
    EncodingError { path: PathBuf, reason: String },

    /// No codec for the requested format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Catch-all for library and tool failures.
    #[error("Conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Output file exists and overwriting is disabled.
    #[error("Output file already exists: {path}")]
    OutputExists { path: PathBuf },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// Creates a new conversion failed error with optional tool stderr.
    pub fn conversion_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Creates a new missing dependency error.
    pub fn missing_dependency(dependency: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingDependency {
            dependency: dependency.into(),
            hint: hint.into(),
        }
    }

    /// Creates a new decode error.
    pub fn decode(format: impl Into<String>, reason: impl ToString) -> Self {
        Self::DecodeError {
            format: format.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a new unsupported format error.
    pub fn unsupported(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            Self::MissingDependency { .. } => ErrorKind::MissingDependency,
            Self::DecodeError { .. } => ErrorKind::DecodeError,
            Self::EncodingError { .. } => ErrorKind::EncodingError,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::ConversionFailed { .. } | Self::OutputExists { .. } | Self::Io(_) => {
                ErrorKind::ConversionError
            }
        }
    }

    /// Human-readable description including tool output when there is any.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConversionFailed {
                stderr: Some(stderr),
                ..
            } if !stderr.trim().is_empty() => format!("{}\n{}", self, stderr.trim()),
            _ => self.to_string(),
        }
    }
}
