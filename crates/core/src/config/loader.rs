use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `TORFIND_SEARCH__PATH`.
pub const ENV_PREFIX: &str = "TORFIND_";

/// Load configuration from defaults, an optional TOML file and environment
/// variable overrides, in that order of precedence.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materializer::ChecksumType;
    use figment::Jail;
    use std::path::PathBuf;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[search]
path = "/data"
pattern = "flac"

[materializer]
checksum = "sha256"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.search.path, PathBuf::from("/data"));
        assert_eq!(config.search.pattern.as_deref(), Some("flac"));
        assert_eq!(config.materializer.checksum, ChecksumType::Sha256);
        assert_eq!(config.materializer.buffer_size, 64 * 1024);
    }

    #[test]
    fn test_load_config_from_str_empty() {
        assert_eq!(load_config_from_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let result = load_config_from_str("[search]\nuse_regex = \"sometimes\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_without_file() {
        Jail::expect_with(|_jail| {
            let config = load_config(None).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "torfind.toml",
                r#"
[search]
path = "/srv/torrents"
use_regex = true

[output]
destination = "/srv/collected"
rename = true
"#,
            )?;

            let config = load_config(Some(Path::new("torfind.toml"))).unwrap();
            assert_eq!(config.search.path, PathBuf::from("/srv/torrents"));
            assert!(config.search.use_regex);
            assert_eq!(
                config.output.destination,
                Some(PathBuf::from("/srv/collected"))
            );
            assert!(config.output.rename);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("torfind.toml", "[search]\npath = \"/from/file\"\n")?;
            jail.set_env("TORFIND_SEARCH__PATH", "/from/env");
            jail.set_env("TORFIND_MATERIALIZER__CREATE_TARGET", "false");

            let config = load_config(Some(Path::new("torfind.toml"))).unwrap();
            assert_eq!(config.search.path, PathBuf::from("/from/env"));
            assert!(!config.materializer.create_target);
            Ok(())
        });
    }
}
