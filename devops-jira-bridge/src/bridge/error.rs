//! Bridge error types.

/// Errors that can occur while building the bridge, serving or processing an event.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Jira client initialization errors.
    #[error(transparent)]
    Jira(#[from] crate::jira::JiraError),

    /// Template registration errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Comment synchronization errors.
    #[error(transparent)]
    Sync(#[from] crate::comments::SyncError),

    /// Listener errors.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
