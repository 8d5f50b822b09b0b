//! The conversion dispatcher.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::config::DispatcherConfig;
use super::output::{derive_output_path, staging_path};
use super::types::{ConversionRequest, ConversionResult};
use crate::converter::{ConversionError, HandlerJob, HandlerSet};
use crate::registry::Registry;

/// Routes a labelled conversion to its handler and normalizes the outcome.
///
/// Conversions run one at a time: concurrent callers wait on a single
/// permit for the whole of each conversion. Clones share the permit.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    handlers: HandlerSet,
    config: DispatcherConfig,
    gate: Arc<Semaphore>,
}

impl Dispatcher {
    /// Creates a new dispatcher.
    pub fn new(registry: Registry, handlers: HandlerSet, config: DispatcherConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            handlers,
            config,
            gate: Arc::new(Semaphore::new(1)),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Converts `source_path` with the conversion registered as `label`.
    ///
    /// Never fails: every error is folded into [`ConversionResult::Failure`].
    pub async fn convert(&self, source_path: impl AsRef<Path>, label: &str) -> ConversionResult {
        match self.try_convert(source_path, label).await {
            Ok(output_path) => ConversionResult::Success { output_path },
            Err(e) => ConversionResult::Failure {
                message: e.user_message(),
            },
        }
    }

    /// Like [`convert`](Self::convert) but keeps the typed error.
    pub async fn try_convert(
        &self,
        source_path: impl AsRef<Path>,
        label: &str,
    ) -> Result<PathBuf, ConversionError> {
        let id = Uuid::new_v4();
        let span = info_span!("conversion", id = %id, label = %label);
        let source_path = source_path.as_ref().to_path_buf();

        async move {
            let started = Instant::now();
            let result = self.run(id, source_path, label).await;
            match &result {
                Ok(output) => info!(
                    "Conversion finished in {:?}: {}",
                    started.elapsed(),
                    output.display()
                ),
                Err(e) => warn!(kind = ?e.kind(), "Conversion failed: {}", e),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        id: Uuid,
        source_path: PathBuf,
        label: &str,
    ) -> Result<PathBuf, ConversionError> {
        let spec = *self.registry.lookup(label)?;
        let request = ConversionRequest::new(id, source_path, spec);

        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| ConversionError::conversion_failed("dispatcher is closed", None))?;

        if !is_regular_file(&request.source_path).await {
            return Err(ConversionError::SourceNotFound {
                path: request.source_path,
            });
        }

        let handler = self.handlers.handler_for(spec.category);
        let output_path = derive_output_path(
            &request.source_path,
            &self.config.output_suffix,
            spec.target_ext,
        );

        if !self.config.overwrite_existing
            && tokio::fs::try_exists(&output_path).await.unwrap_or(false)
        {
            return Err(ConversionError::OutputExists { path: output_path });
        }

        info!(
            "Converting {} with {} handler",
            request.source_path.display(),
            spec.category
        );

        let write_path = if self.config.atomic_writes {
            staging_path(&output_path)
        } else {
            output_path.clone()
        };
        let job = HandlerJob {
            source_path: request.source_path,
            output_path: write_path.clone(),
            source_ext: spec.source_ext.to_string(),
            target_ext: spec.target_ext.to_string(),
        };

        let outcome = handler.handle(&job).await;

        if !self.config.atomic_writes {
            return outcome.map(|()| output_path);
        }
        match outcome {
            Ok(()) => {
                if let Err(e) = tokio::fs::rename(&write_path, &output_path).await {
                    discard(&write_path).await;
                    return Err(e.into());
                }
                Ok(output_path)
            }
            Err(e) => {
                discard(&write_path).await;
                Err(e)
            }
        }
    }
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Removes a staging file, if the handler got as far as creating one.
async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial output {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial output {}: {}", path.display(), e),
    }
}
