//! Error types for the OAuth sample application

use thiserror::Error;

/// Main error type for the sample application
#[derive(Error, Debug)]
pub enum SampleAppError {
    /// I/O error (credentials file or storage file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Credentials resource is not well-formed XML
    #[error("Credentials XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON error in the storage file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client could not be created
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport base URL could not be parsed
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// Storage holds no token
    #[error("No saved token")]
    TokenNotFound,

    /// Authentication mode name is not one of the known modes
    #[error("Unknown authentication mode: {0}")]
    UnknownAuthMode(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for sample application operations
pub type Result<T> = std::result::Result<T, SampleAppError>;

impl SampleAppError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an unknown authentication mode error
    pub fn unknown_auth_mode(name: impl Into<String>) -> Self {
        Self::UnknownAuthMode(name.into())
    }
}
