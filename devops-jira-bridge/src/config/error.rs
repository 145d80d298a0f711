//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while validating the bridge configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The Jira base URL could not be parsed.
    #[error("Invalid Jira URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Validation error in a setting.
    #[error("Validation error in '{field}': {message}")]
    ValidationError { field: String, message: String },
}
