use std::error::Error;

/// Base trait for all textbridge errors
pub trait TextBridgeError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Could not determine the current directory: {source}")]
    CurrentDirUnavailable {
        #[from]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Whether the error only means the config file does not exist.
    ///
    /// Missing config files are expected and never surfaced to the user.
    pub fn is_file_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigReadError { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

impl TextBridgeError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigReadError { .. } => "CONFIG_READ_ERROR",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::CurrentDirUnavailable { .. } => "CONFIG_CURRENT_DIR_UNAVAILABLE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}
