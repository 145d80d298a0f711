//! Webhook processing outcomes.

use crate::comments::SyncStatus;
use serde::Serialize;

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The body was not a service hook payload.
    MalformedPayload,
    /// The pull request title carries no `[J:<KEY>]` tag.
    MissingIssueKey,
    /// The event type is not one the bridge records.
    UnknownEvent,
    /// No browser link could be derived for the pull request.
    MissingPullRequestLink,
}

/// Result of processing a single webhook call.
///
/// Serialized as the response body; the HTTP status is always 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WebhookOutcome {
    /// The event reached Jira (or was already recorded).
    Synced {
        /// Target Jira issue.
        issue_key: String,
        /// What happened to the running comment.
        comment: SyncStatus,
    },

    /// The event was dropped without contacting Jira.
    Ignored {
        /// Reason for ignoring.
        reason: IgnoreReason,
    },

    /// Processing failed; the error has been logged.
    Failed {
        /// Target Jira issue, when known.
        issue_key: Option<String>,
        /// Error message.
        error: String,
    },
}

impl WebhookOutcome {
    /// Shorthand for [`WebhookOutcome::Ignored`].
    #[must_use]
    pub fn ignored(reason: IgnoreReason) -> Self {
        Self::Ignored { reason }
    }

    /// Returns true if the event failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
