//! Unified error handling for the uscout crate
//!
//! Domain-specific error enums live next to the modules that raise them
//! and are re-exported here; [`Error`] wraps them into a single type
//! usable across module boundaries.

use std::io;
use thiserror::Error;

/// Errors raised by the on-disk platform registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registry file does not exist
    #[error("platform registry not found: {0}")]
    NotFound(String),

    /// Registry file parsed but contains no platforms
    #[error("platform registry is empty")]
    Empty,

    /// A platform entry failed validation on load
    #[error("invalid platform '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },

    /// Two entries share the same normalized name
    #[error("duplicate platform name: {0}")]
    DuplicateName(String),

    /// A selection matched no registered platform
    #[error("no matching platforms for: {0}")]
    NoMatch(String),
}

/// Precondition failures raised before any probe is launched
#[derive(Error, Debug)]
pub enum ScanError {
    /// Empty identifier selection
    #[error("no identifiers to scan")]
    NoIdentifiers,

    /// Empty platform selection
    #[error("no platforms to scan")]
    NoPlatforms,

    /// Concurrency bound below 1
    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    /// HTTP client construction failed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Unified error type for the uscout crate
#[derive(Error, Debug)]
pub enum Error {
    /// Platform registry errors
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Scan precondition and setup errors
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),

    /// Report template registration errors
    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Report rendering errors
    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when the error is a run-level precondition failure
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Scan(ScanError::NoIdentifiers)
                | Self::Scan(ScanError::NoPlatforms)
                | Self::Scan(ScanError::InvalidConcurrency)
                | Self::Registry(RegistryError::Empty)
                | Self::Registry(RegistryError::NotFound(_))
        )
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
