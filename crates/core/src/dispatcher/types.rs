//! Types for the dispatcher module.

use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::registry::ConversionSpec;

/// One user-initiated conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Correlates the log lines of this conversion.
    pub id: Uuid,
    pub source_path: PathBuf,
    pub spec: ConversionSpec,
}

impl ConversionRequest {
    pub fn new(id: Uuid, source_path: impl Into<PathBuf>, spec: ConversionSpec) -> Self {
        Self {
            id,
            source_path: source_path.into(),
            spec,
        }
    }
}

/// Outcome of one conversion, produced exactly once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionResult {
    Success { output_path: PathBuf },
    Failure { message: String },
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Output file of a successful conversion.
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            Self::Success { output_path } => Some(output_path),
            Self::Failure { .. } => None,
        }
    }

    /// Failure message, if the conversion failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }
}
