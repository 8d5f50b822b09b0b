use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Output suffix is non-empty and has no path separators
/// - Tool paths are non-empty
/// - Tool timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let suffix = &config.dispatch.output_suffix;
    if suffix.is_empty() {
        // An empty suffix would write the output over a same-extension source.
        return Err(ConfigError::ValidationError(
            "dispatch.output_suffix cannot be empty".to_string(),
        ));
    }
    if suffix.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError(format!(
            "dispatch.output_suffix cannot contain path separators: {:?}",
            suffix
        )));
    }

    if config.converter.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.ffmpeg_path cannot be empty".to_string(),
        ));
    }
    if config.converter.soffice_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "converter.soffice_path cannot be empty".to_string(),
        ));
    }
    if config.converter.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "converter.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterConfig;
    use crate::dispatcher::DispatcherConfig;
    use std::path::PathBuf;

    fn with_suffix(suffix: &str) -> Config {
        Config {
            dispatch: DispatcherConfig {
                output_suffix: suffix.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_suffix() {
        assert!(validate_config(&with_suffix("-v2")).is_ok());
        for bad in ["", "/x", "a\\b"] {
            let err = validate_config(&with_suffix(bad)).unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)), "{bad:?}");
        }
    }

    #[test]
    fn test_validate_tools() {
        let config = Config {
            converter: ConverterConfig {
                ffmpeg_path: PathBuf::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());

        let config = Config {
            converter: ConverterConfig::default().with_timeout(0),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
