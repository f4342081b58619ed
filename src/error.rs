//! Error handling for replay-controls
//!
//! The playback core itself never fails: out-of-range seeks clamp and missing
//! breadcrumbs are no-ops. Errors only surface from the ambient layers
//! (configuration, session files) and from selecting a speed that is not offered.

use thiserror::Error;

/// Main error type for replay-controls operations
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Errors related to configuration loading/saving/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// The session file was readable but not a usable replay session
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// A playback speed outside the configured list was requested
    #[error("Unsupported playback speed: {0}x")]
    UnsupportedSpeed(f64),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReplayError>,
    },
}

impl ReplayError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReplayError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(err: serde_json::Error) -> Self {
        ReplayError::Serialization(err.to_string())
    }
}

/// Result type alias for replay-controls operations
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
