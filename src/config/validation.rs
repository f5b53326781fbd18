use crate::config::types::{Config, FetchConfig, OutputConfig};
use crate::ConfigError;
use tokio::sync::Semaphore;

/// Validates the entire configuration
///
/// The start URL is not checked here. The crawl parses it and fails with a
/// URL error before any fetch.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1 when set".to_string(),
        ));
    }

    if let Some(limit) = config.max_concurrent_fetches {
        if limit == 0 || limit > Semaphore::MAX_PERMITS {
            return Err(ConfigError::Validation(format!(
                "max-concurrent-fetches must be between 1 and {} when set",
                Semaphore::MAX_PERMITS
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "directory cannot be empty".to_string(),
        ));
    }

    if config.separator.is_empty() {
        return Err(ConfigError::Validation(
            "separator cannot be empty".to_string(),
        ));
    }

    if !config.indent_unit.chars().all(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "indent-unit must contain only whitespace, got '{}'",
            config.indent_unit
        )));
    }

    if config.log_file.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "log-file cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}
