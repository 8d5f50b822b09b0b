//! Converter module: the per-category handlers and their shared contract.
//!
//! Every handler implements [`Handler`] and is bound to exactly one
//! [`Category`] inside a [`HandlerSet`]. Optional external capabilities are
//! detected once with [`Capabilities::detect`] and injected when the set is
//! built.
//!
//! # Example
//!
//! ```ignore
//! use transmute_core::converter::{Capabilities, ConverterConfig, HandlerJob, HandlerSet, Category};
//!
//! let config = ConverterConfig::default();
//! let capabilities = Capabilities::detect(&config).await;
//! let handlers = HandlerSet::new(&config, capabilities);
//!
//! let job = HandlerJob {
//!     source_path: PathBuf::from("/data/report.csv"),
//!     output_path: PathBuf::from("/data/report_converted.json"),
//!     source_ext: "csv".to_string(),
//!     target_ext: "json".to_string(),
//! };
//! handlers.handler_for(Category::TabularInterchange).handle(&job).await?;
//! ```

mod capabilities;
mod config;
mod error;
mod handlers;
mod set;
mod traits;
mod types;

pub use capabilities::{probe_ffmpeg, Capabilities};
pub use config::ConverterConfig;
pub use error::{ConversionError, ErrorKind};
pub use handlers::{
    AudioHandler, ImageHandler, OfficeHandler, PdfTextHandler, SpreadsheetToTabularHandler,
    Table, TabularInterchangeHandler, TabularToSpreadsheetHandler, TextToPdfHandler,
};
pub use set::HandlerSet;
pub use traits::Handler;
pub use types::{AudioFormat, Category, HandlerJob};
