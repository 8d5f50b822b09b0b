use serde::{Deserialize, Serialize};

use crate::converter::ConverterConfig;
use crate::dispatcher::DispatcherConfig;

/// Root configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// External tools used by the handlers.
    #[serde(default)]
    pub converter: ConverterConfig,
    /// Output naming and writing.
    #[serde(default)]
    pub dispatch: DispatcherConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_deserialize_sections() {
        let toml = r#"
[converter]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
timeout_secs = 120

[dispatch]
output_suffix = "-new"
overwrite_existing = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.converter.ffmpeg_path,
            PathBuf::from("/opt/ffmpeg/bin/ffmpeg")
        );
        assert_eq!(config.converter.timeout_secs, Some(120));
        assert_eq!(config.converter.soffice_path, PathBuf::from("soffice"));
        assert_eq!(config.dispatch.output_suffix, "-new");
        assert!(!config.dispatch.overwrite_existing);
        assert!(config.dispatch.atomic_writes);
    }

    #[test]
    fn test_serialize_skips_unset_timeout() {
        let text = toml::to_string(&Config::default()).unwrap();
        assert!(!text.contains("timeout_secs"));
        assert!(text.contains("output_suffix = \"_converted\""));
    }
}
