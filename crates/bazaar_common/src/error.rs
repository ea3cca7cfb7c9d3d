// --- File: crates/bazaar_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all Bazaar crates.
///
/// Feature crates keep their own error enums and wrap a `BazaarError` coming
/// out of shared code.
#[derive(Error, Debug)]
pub enum BazaarError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

// Common error conversions
impl From<reqwest::Error> for BazaarError {
    fn from(err: reqwest::Error) -> Self {
        BazaarError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BazaarError {
    fn from(err: serde_json::Error) -> Self {
        BazaarError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for BazaarError {
    fn from(err: std::io::Error) -> Self {
        BazaarError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BazaarError {
    BazaarError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BazaarError {
    BazaarError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
