//! Errors raised while loading or validating settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A setting holds a value outside its allowed range or format
    #[error("Invalid setting {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error(
        "Invalid environment '{0}'. Valid values are: development, test, staging, production"
    )]
    InvalidEnvironment(String),

    /// `GATHERING_CONFIG_DIR` and `GATHERING_CONFIG_FILE` were both set
    #[error("Conflicting configuration sources: {0}")]
    MutualExclusivityError(String),

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity(message: impl Into<String>) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = ConfigError::validation("server.port", "Port must be between 1 and 65535");
        assert_eq!(
            err.to_string(),
            "Invalid setting server.port: Port must be between 1 and 65535"
        );
    }
}
