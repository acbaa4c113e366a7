//! Centralized error types for MealScout.
//!
//! A unified error hierarchy with user-friendly messages, built on
//! `thiserror`. The UI shows `user_message()` instead of raw errors.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Check that it exists and is readable."
                        .to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save configuration. Please check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Network(_) => {
                    "Connection failed. Please check your network and the server address."
                        .to_string()
                }
                ApiError::ConnectionFailed(url) => {
                    format!("Could not reach the recommendation server at {}.", url)
                }
                ApiError::HttpStatus(code) => {
                    format!("The server returned an error (HTTP {}). Try again later.", code)
                }
                ApiError::MalformedResponse(_) => {
                    "Unexpected response from the server. Try again later.".to_string()
                }
                ApiError::Rejected(msg) => msg.clone(),
                ApiError::InvalidUrl(url) => format!("Invalid server URL: {}", url),
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical and should block further use.
    ///
    /// Failed suggestion or health probes are not critical; the form keeps
    /// working without them.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Api(ApiError::InvalidUrl(_))
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
