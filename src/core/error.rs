//! Error types for Menugate

use thiserror::Error;

/// Result type alias for Menugate operations
pub type GateResult<T> = Result<T, GateError>;

/// Main error type for Menugate
#[derive(Error, Debug)]
pub enum GateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Current user is unavailable: {0}")]
    IdentityUnavailable(String),

    #[error("Authorization check failed: {0}")]
    AuthorizationCheckFailed(String),

    #[error("Menu load failed: {0}")]
    MenuLoadFailed(String),

    #[error("Header menu load failed: {0}")]
    HeaderLoadFailed(String),

    #[error("CSRF token request failed: {0}")]
    CsrfUnavailable(String),

    #[error("Invalid gate transition: {event} while {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Access denied to {path} ({capability})")]
    AccessDenied { path: String, capability: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

impl GateError {
    /// Create a generic error from a string
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GateError::Other(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        GateError::Config(msg.into())
    }

    /// Create a network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        GateError::Network(msg.into())
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GateError::IdentityUnavailable(_) => 2,
            GateError::AccessDenied { .. } => 4,
            GateError::Config(_) | GateError::Toml(_) => 5,
            GateError::Network(_) | GateError::Http(_) => 6,
            _ => 1,
        }
    }
}
