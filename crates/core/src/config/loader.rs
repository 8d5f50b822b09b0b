use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

const ENV_PREFIX: &str = "TRANSMUTE_";

/// Defaults, then the TOML file, then `TRANSMUTE_*` environment overrides.
///
/// Nested keys are separated by a double underscore, e.g.
/// `TRANSMUTE_DISPATCH__OUTPUT_SUFFIX`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Defaults with environment overrides only, for running without a file.
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::path::PathBuf;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[dispatch]
output_suffix = "_out"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.dispatch.output_suffix, "_out");
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[dispatch]
atomic_writes = "sometimes"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let err = load_config(Path::new("/nonexistent/transmute.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    // Env-touching tests run inside a Jail, which serializes them and
    // restores the environment afterwards.

    #[test]
    fn test_load_config_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "transmute.toml",
                r#"
[converter]
soffice_path = "/usr/lib/libreoffice/program/soffice"
"#,
            )?;

            let config = load_config(Path::new("transmute.toml")).unwrap();
            assert_eq!(
                config.converter.soffice_path,
                PathBuf::from("/usr/lib/libreoffice/program/soffice")
            );
            assert_eq!(config.converter.ffmpeg_path, PathBuf::from("ffmpeg"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "transmute.toml",
                r#"
[dispatch]
output_suffix = "_file"
"#,
            )?;
            jail.set_env("TRANSMUTE_DISPATCH__OUTPUT_SUFFIX", "_env");
            jail.set_env("TRANSMUTE_CONVERTER__TIMEOUT_SECS", "30");

            let config = load_config(Path::new("transmute.toml")).unwrap();
            assert_eq!(config.dispatch.output_suffix, "_env");
            assert_eq!(config.converter.timeout_secs, Some(30));
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_env_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("TRANSMUTE_DISPATCH__OVERWRITE_EXISTING", "false");

            let config = load_config_from_env().unwrap();
            assert!(!config.dispatch.overwrite_existing);
            assert_eq!(config.dispatch.output_suffix, "_converted");
            Ok(())
        });
    }
}
