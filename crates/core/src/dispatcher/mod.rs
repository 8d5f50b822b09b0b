//! Dispatcher module: label + source path in, one [`ConversionResult`] out.
//!
//! For every request the dispatcher:
//! - resolves the label in the [`Registry`](crate::registry::Registry)
//! - checks that the source is a regular file
//! - derives the output path next to the source
//! - runs the category's handler, staging the output when configured
//!
//! # Example
//!
//! ```ignore
//! use transmute_core::{Capabilities, ConverterConfig, Dispatcher, DispatcherConfig, HandlerSet, Registry};
//!
//! let converter = ConverterConfig::default();
//! let handlers = HandlerSet::new(&converter, Capabilities::detect(&converter).await);
//! let dispatcher = Dispatcher::new(Registry::builtin(), handlers, DispatcherConfig::default());
//!
//! match dispatcher.convert("/data/report.csv", "Data: CSV -> JSON").await {
//!     ConversionResult::Success { output_path } => println!("Saved to {}", output_path.display()),
//!     ConversionResult::Failure { message } => eprintln!("{}", message),
//! }
//! ```

mod config;
mod output;
mod runner;
mod types;

pub use config::DispatcherConfig;
pub use output::derive_output_path;
pub use runner::Dispatcher;
pub use types::{ConversionRequest, ConversionResult};
