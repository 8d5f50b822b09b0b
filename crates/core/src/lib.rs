//! Single-file format conversion.
//!
//! A [`Registry`] maps conversion labels to a handler [`Category`] and the
//! source/target extensions; the [`Dispatcher`] resolves a label, derives the
//! output path next to the source and runs the category's handler from a
//! [`HandlerSet`]. Every outcome is reported as a [`ConversionResult`].

pub mod config;
pub mod converter;
pub mod dispatcher;
pub mod registry;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config, ConfigError,
};
pub use converter::{
    probe_ffmpeg, Capabilities, Category, ConversionError, ConverterConfig, ErrorKind, Handler,
    HandlerJob, HandlerSet,
};
pub use dispatcher::{
    derive_output_path, ConversionRequest, ConversionResult, Dispatcher, DispatcherConfig,
};
pub use registry::{ConversionSpec, Registry, RegistryError};
