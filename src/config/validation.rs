//! Configuration validation logic
//!
//! Every section gets a `validate` method; `Settings::validate` runs them in
//! order and returns the first failure.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings, StorageBackend,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Smallest file size the rotating writer accepts
const MIN_LOG_FILE_SIZE: u64 = 1024;

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Keep-alive timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.keep_alive_timeout == 0 {
            return Err(ConfigError::validation(
                "server.keep_alive_timeout",
                "Keep-alive timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must be a non-empty PostgreSQL URL
    /// - Min and max connections must be positive, min not above max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required when storage.backend is postgres.",
            ));
        }

        if !self.is_postgres_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }

    fn is_postgres_url(&self) -> bool {
        ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if !self.enabled {
            return Ok(());
        }

        if self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if self.max_size < MIN_LOG_FILE_SIZE {
            return Err(ConfigError::ValidationError {
                field: "logger.file.max_size".to_string(),
                message: format!("max_size must be at least {} bytes.", MIN_LOG_FILE_SIZE),
            });
        }

        if self.max_files == 0 {
            return Err(ConfigError::validation(
                "logger.file.max_files",
                "max_files must be greater than 0.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - File output, when enabled, needs a path and sane rotation limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// The database section is only checked when the PostgreSQL backend is
    /// selected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database.validate()?;
        }
        self.id_generator.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{IdGeneratorConfig, StorageConfig};

    fn valid_database() -> DatabaseConfig {
        DatabaseConfig {
            url: "postgres://localhost/gathering".to_string(),
            ..Default::default()
        }
    }

    fn field_of(result: Result<(), ConfigError>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_server_config_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "server.port");
    }

    #[test]
    fn test_server_config_invalid_timeouts() {
        let config = ServerConfig {
            request_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "server.request_timeout");

        let config = ServerConfig {
            keep_alive_timeout: 0,
            ..Default::default()
        };
        assert_eq!(field_of(config.validate()), "server.keep_alive_timeout");
    }

    #[test]
    fn test_database_config_valid_url_schemes() {
        for url in ["postgres://localhost/db", "postgresql://u:p@host:5432/db"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{} should be accepted", url);
        }
    }

    #[test]
    fn test_database_config_rejects_other_schemes() {
        for url in ["", "mysql://localhost/db", "sqlite://./test.db"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..Default::default()
            };
            assert_eq!(field_of(config.validate()), "database.url");
        }
    }

    #[test]
    fn test_database_config_connection_bounds() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..valid_database()
        };
        assert_eq!(field_of(config.validate()), "database.max_connections");

        let config = DatabaseConfig {
            min_connections: 0,
            ..valid_database()
        };
        assert_eq!(field_of(config.validate()), "database.min_connections");

        let config = DatabaseConfig {
            min_connections: 20,
            max_connections: 10,
            ..valid_database()
        };
        assert_eq!(field_of(config.validate()), "database.min_connections");
    }

    #[test]
    fn test_logger_settings_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            let settings = LoggerSettings {
                level: level.to_string(),
                ..Default::default()
            };
            assert!(settings.validate().is_ok(), "{} should be valid", level);
        }

        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate()), "logger.level");
    }

    #[test]
    fn test_logger_file_checks_only_apply_when_enabled() {
        let mut settings = LoggerSettings::default();
        settings.file.path = String::new();
        settings.file.max_files = 0;
        assert!(settings.validate().is_ok());

        settings.file.enabled = true;
        assert_eq!(field_of(settings.validate()), "logger.file.path");

        settings.file.path = "logs/app.log".to_string();
        assert_eq!(field_of(settings.validate()), "logger.file.max_files");

        settings.file.max_files = 3;
        settings.file.max_size = 100;
        assert_eq!(field_of(settings.validate()), "logger.file.max_size");
    }

    #[test]
    fn test_logger_invalid_format() {
        let mut settings = LoggerSettings::default();
        settings.file.format = "xml".to_string();
        assert_eq!(field_of(settings.validate()), "logger.file.format");
    }

    #[test]
    fn test_settings_memory_backend_skips_database() {
        let settings = Settings {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
            },
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_postgres_backend_requires_database_url() {
        let settings = Settings::default();
        assert_eq!(field_of(settings.validate()), "database.url");

        let settings = Settings {
            database: valid_database(),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_invalid_node_id() {
        let settings = Settings {
            database: valid_database(),
            id_generator: IdGeneratorConfig { node_id: 4096 },
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate()), "id_generator.node_id");
    }
}
