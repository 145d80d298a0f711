//! Jira client error types.

use thiserror::Error;

/// Errors that can occur while talking to Jira.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Transport failure, timeout or undecodable response.
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Jira answered with a non-success status.
    #[error("Jira returned {status} for {method} {url}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// A header value could not be built from configuration.
    #[error("Invalid header value for '{name}'")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
}
