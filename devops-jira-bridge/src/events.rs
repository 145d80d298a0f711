//! Azure DevOps pull request events.
//!
//! This module holds the service hook payload model and reduces each
//! notification to an [`EventKind`] the formatter knows how to render.

mod kind;
mod payload;
mod vote;

pub use kind::{
    classify, EventKind, PullRequestEvent, PULL_REQUEST_COMMENTED, PULL_REQUEST_CREATED,
    PULL_REQUEST_MERGED, PULL_REQUEST_MERGE_ATTEMPTED, PULL_REQUEST_UPDATED,
};
pub use payload::{
    CommitRef, Identity, Link, Links, PullRequest, PullRequestComment, Repository, Resource,
    Reviewer, WebhookEvent,
};
pub use vote::{MergeStatus, PullRequestStatus, ReviewerVote, VoteStatus};
