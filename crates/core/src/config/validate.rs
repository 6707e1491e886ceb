use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Search path is not empty
/// - Materializer buffer size is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.search.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "search.path cannot be empty".to_string(),
        ));
    }

    if config.materializer.buffer_size == 0 {
        return Err(ConfigError::ValidationError(
            "materializer.buffer_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}
