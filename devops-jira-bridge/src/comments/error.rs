//! Comment synchronization error types.

use thiserror::Error;

/// Errors that can occur while syncing an event into a Jira comment.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Jira API error.
    #[error("Jira API error: {0}")]
    JiraError(#[from] crate::jira::JiraError),

    /// Entry rendering error.
    #[error("Template rendering error: {0}")]
    TemplateError(#[from] crate::templates::TemplateError),
}
