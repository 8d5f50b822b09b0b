//! Configuration for the dispatcher module.

use serde::{Deserialize, Serialize};

/// How the dispatcher names and writes output files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Marker inserted between the source stem and the target extension.
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Replace an existing output file. When false the conversion fails
    /// before any handler runs.
    #[serde(default = "default_true")]
    pub overwrite_existing: bool,

    /// Write to a hidden staging file and rename it into place on success.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
}

fn default_output_suffix() -> String {
    "_converted".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            output_suffix: default_output_suffix(),
            overwrite_existing: true,
            atomic_writes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default();
        assert_eq!(config.output_suffix, "_converted");
        assert!(config.overwrite_existing);
        assert!(config.atomic_writes);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DispatcherConfig = toml::from_str("atomic_writes = false").unwrap();
        assert_eq!(config.output_suffix, "_converted");
        assert!(config.overwrite_existing);
        assert!(!config.atomic_writes);
    }
}
