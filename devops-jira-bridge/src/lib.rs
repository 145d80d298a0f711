#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod bridge;
pub mod comments;
pub mod config;
pub mod events;
pub mod issue_key;
pub mod jira;
pub mod server;
pub mod templates;

pub use bridge::{Bridge, BridgeError, IgnoreReason, WebhookOutcome};
pub use comments::{
    compose_body, contains_marker, plan_entries, sync_event, CommentThread, SyncError,
    SyncStatus, ENTRY_DELIMITER,
};
pub use config::{ConfigError, JiraConfig, DEFAULT_TIMEOUT_SECS};
pub use events::{classify, EventKind, PullRequestEvent, ReviewerVote, VoteStatus, WebhookEvent};
pub use issue_key::{extract_issue_key, IssueKey};
pub use jira::{CommentListing, JiraClient, JiraComment, JiraError, XsrfSession};
pub use server::{build_router, serve, HEALTH_PATH, WEBHOOK_PATH};
pub use templates::{Locale, LocaleError, TemplateError, TemplateRenderer};
