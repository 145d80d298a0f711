//! Semantic event kinds and classification.

use super::payload::WebhookEvent;
use super::vote::{MergeStatus, PullRequestStatus, ReviewerVote};

/// Event type tag for pull request creation.
pub const PULL_REQUEST_CREATED: &str = "git.pullrequest.created";
/// Event type tag for pull request updates (pushes, votes, status changes).
pub const PULL_REQUEST_UPDATED: &str = "git.pullrequest.updated";
/// Event type tag for merge attempts.
pub const PULL_REQUEST_MERGED: &str = "git.pullrequest.merged";
/// Alternative merge attempt tag emitted by some organizations.
pub const PULL_REQUEST_MERGE_ATTEMPTED: &str = "git.pullrequest.merge.attempted";
/// Event type tag for discussion comments.
pub const PULL_REQUEST_COMMENTED: &str = "ms.vss-code.git-pullrequest-comment-event";

/// What happened to a pull request, reduced to the parts the bridge records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Pull request opened.
    Created {
        created_at: Option<String>,
        commit: Option<String>,
    },

    /// Pull request changed with a known source commit.
    ///
    /// Pushes, vote changes and status changes share this notification, so
    /// the current reviewer votes and pull request status travel with it.
    Updated {
        updated_at: Option<String>,
        commit: String,
        status: Option<PullRequestStatus>,
        votes: Vec<ReviewerVote>,
    },

    /// Merge attempted.
    MergeAttempted { merge_status: MergeStatus },

    /// Comment posted on a discussion thread.
    Commented {
        author: String,
        content: String,
        thread_id: Option<String>,
        published_at: Option<String>,
    },

    /// Reviewer votes and status without source commit information.
    ReviewerVoted {
        status: Option<PullRequestStatus>,
        votes: Vec<ReviewerVote>,
    },

    /// Anything else.
    Unknown { event_type: String },
}

impl EventKind {
    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::MergeAttempted { .. } => "merge_attempted",
            Self::Commented { .. } => "commented",
            Self::ReviewerVoted { .. } => "reviewer_voted",
            Self::Unknown { .. } => "unknown",
        }
    }
}

/// A classified pull request event, ready for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// Pull request title.
    pub title: String,

    /// Browser link to the pull request. Doubles as the thread marker.
    pub pr_link: String,

    /// What happened.
    pub kind: EventKind,
}

/// Maps an inbound notification to an [`EventKind`].
///
/// Classification looks at the event type tag first and the payload shape
/// second; see the variants of [`EventKind`] for what each produces.
#[must_use]
pub fn classify(event: &WebhookEvent) -> EventKind {
    let pull_request = event.pull_request();

    match event.event_type.as_str() {
        PULL_REQUEST_CREATED => EventKind::Created {
            created_at: pull_request
                .creation_date
                .clone()
                .or_else(|| event.created_date.clone()),
            commit: pull_request.source_commit().map(str::to_string),
        },

        PULL_REQUEST_UPDATED => {
            let votes = pull_request
                .reviewers
                .iter()
                .map(|reviewer| ReviewerVote {
                    reviewer: reviewer.display_name.clone(),
                    vote: reviewer.vote,
                })
                .collect();
            let status = PullRequestStatus::parse(pull_request.status.as_deref());

            match pull_request.source_commit() {
                Some(commit) => EventKind::Updated {
                    updated_at: event.created_date.clone(),
                    commit: commit.to_string(),
                    status,
                    votes,
                },
                None => EventKind::ReviewerVoted { status, votes },
            }
        }

        PULL_REQUEST_MERGED | PULL_REQUEST_MERGE_ATTEMPTED => EventKind::MergeAttempted {
            merge_status: MergeStatus::parse(pull_request.merge_status.as_deref()),
        },

        PULL_REQUEST_COMMENTED => match &event.resource.comment {
            Some(comment) => EventKind::Commented {
                author: comment
                    .author
                    .as_ref()
                    .map(|author| author.display_name.trim())
                    .filter(|name| !name.is_empty())
                    .unwrap_or("Unknown")
                    .to_string(),
                content: comment.content.clone(),
                thread_id: comment.thread_id().map(str::to_string),
                published_at: comment
                    .published_date
                    .clone()
                    .or_else(|| event.created_date.clone()),
            },
            None => EventKind::Unknown {
                event_type: event.event_type.clone(),
            },
        },

        other => EventKind::Unknown {
            event_type: other.to_string(),
        },
    }
}
