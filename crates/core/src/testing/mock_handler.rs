//! Mock handler for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{Category, ConversionError, Handler, HandlerJob};

/// Bytes the mock writes to the output path.
pub const MOCK_OUTPUT: &[u8] = b"mock output";

/// Mock implementation of the Handler trait.
///
/// Provides controllable behavior for testing:
/// - Record every job for assertions
/// - Inject a one-shot error
/// - Simulate slow conversions and track how many ran at once
///
/// # Example
///
/// ```rust,ignore
/// use transmute_core::testing::MockHandler;
///
/// let mock = Arc::new(MockHandler::new(Category::Image));
/// let handlers = HandlerSet::new(&config, Capabilities::none())
///     .with_handler(Category::Image, mock.clone());
///
/// dispatcher.convert("/data/photo.png", "Image: PNG -> JPG").await;
/// assert_eq!(mock.calls().await.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockHandler {
    category: Category,
    /// Recorded jobs, in call order.
    calls: Arc<RwLock<Vec<HandlerJob>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<ConversionError>>>,
    /// Write the output file even when failing, like a codec that dies midway.
    write_before_error: Arc<RwLock<bool>>,
    /// Simulated conversion duration.
    delay: Arc<RwLock<Duration>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl MockHandler {
    /// Create a new mock handler for `category`.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            write_before_error: Arc::new(RwLock::new(false)),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    /// Get all recorded jobs.
    pub async fn calls(&self) -> Vec<HandlerJob> {
        self.calls.read().await.clone()
    }

    /// Clear recorded jobs.
    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: ConversionError) {
        *self.next_error.write().await = Some(error);
    }

    /// Write partial output before failing.
    pub async fn set_write_before_error(&self, write: bool) {
        *self.write_before_error.write().await = write;
    }

    /// Set the simulated conversion duration.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Highest number of calls that were in flight at the same time.
    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    async fn run(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match self.next_error.write().await.take() {
            Some(err) => {
                if *self.write_before_error.read().await {
                    tokio::fs::write(&job.output_path, b"partial").await?;
                }
                Err(err)
            }
            None => {
                tokio::fs::write(&job.output_path, MOCK_OUTPUT).await?;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Handler for MockHandler {
    fn category(&self) -> Category {
        self.category
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        self.calls.write().await.push(job.clone());

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        let result = self.run(job).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
