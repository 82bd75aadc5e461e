//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{CourierConfig, LogOutput, LoggingConfig, NetworkConfig, ServerConfig};

/// Validates the entire configuration.
///
/// Adapter sections are checked by the adapters themselves when they are
/// built from them.
pub fn validate_config(config: &CourierConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_server_config(&config.server)?;
    validate_network_config(&config.network)?;
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if logging.max_files == 0 {
        return Err(ConfigError::validation(
            "logging.max_files must be greater than 0",
        ));
    }

    for module in logging.filters.keys() {
        if module.is_empty() || module.contains(char::is_whitespace) {
            return Err(ConfigError::validation(format!(
                "Invalid logging filter target: {module:?}"
            )));
        }
    }

    Ok(())
}

fn validate_server_config(server: &ServerConfig) -> ConfigResult<()> {
    if server.host.is_empty() {
        return Err(ConfigError::missing_field("server.host"));
    }
    Ok(())
}

fn validate_network_config(network: &NetworkConfig) -> ConfigResult<()> {
    if network.timeout_ms == 0 {
        return Err(ConfigError::validation("Timeout must be greater than 0"));
    }
    Ok(())
}

/// Validates a webhook path.
pub fn validate_path(path: &str) -> ConfigResult<()> {
    if !path.starts_with('/') {
        return Err(ConfigError::validation(format!(
            "Path must start with '/': {path}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&CourierConfig::default()).is_ok());
    }

    #[test]
    fn test_file_output_needs_path() {
        let mut config = CourierConfig::default();
        config.logging.output = LogOutput::File;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField { ref field } if field == "logging.file_path"
        ));

        config.logging.file_path = Some("courier.log".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = CourierConfig::default();
        config.network.timeout_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_filter_target_with_spaces_rejected() {
        let mut config = CourierConfig::default();
        config
            .logging
            .filters
            .insert("courier core".to_string(), Default::default());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/line").is_ok());
        assert!(validate_path("line").is_err());
    }
}
