//! Jira comment synchronization.
//!
//! Every pull request owns one running comment on its Jira issue. This module
//! finds that comment, works out which entries an event adds and either
//! creates the comment or appends to it. Each event causes at most one write.
//!
//! The read-then-write is not atomic: two events for the same pull request
//! arriving together can overwrite each other's append.

mod error;
mod plan;
mod status;
mod thread;

pub use error::SyncError;
pub use plan::plan_entries;
pub use status::SyncStatus;
pub use thread::{compose_body, contains_marker, CommentThread, ENTRY_DELIMITER};

use crate::events::PullRequestEvent;
use crate::issue_key::IssueKey;
use crate::jira::JiraClient;
use crate::templates::TemplateRenderer;
use tracing::{debug, info, info_span, Instrument};

/// Records a pull request event in the issue's running comment.
///
/// This function:
/// 1. Fetches the issue's comments
/// 2. Looks for the comment carrying the PR link
/// 3. Renders the entries not yet recorded
/// 4. Appends them to the found comment, or creates a new one
///
/// # Arguments
///
/// * `client` - Jira client
/// * `renderer` - Entry renderer
/// * `issue_key` - Target Jira issue
/// * `event` - Classified pull request event
///
/// # Returns
///
/// A [`SyncStatus`] describing what was written.
///
/// # Errors
///
/// Returns [`SyncError`] if Jira rejects a request or rendering fails.
pub async fn sync_event(
    client: &JiraClient,
    renderer: &TemplateRenderer,
    issue_key: &IssueKey,
    event: &PullRequestEvent,
) -> Result<SyncStatus, SyncError> {
    let span = info_span!(
        "sync_event",
        issue_key = %issue_key,
        kind = event.kind.name()
    );

    async {
        let listing = client.list_comments(issue_key).await?;
        let thread = CommentThread::find(&listing.comments, &event.pr_link);
        debug!(
            comments = listing.comments.len(),
            thread = ?thread.as_ref().map(CommentThread::comment_id),
            "Scanned Jira comments"
        );

        let entries = plan_entries(renderer, event, thread.as_ref())?;
        if entries.is_empty() {
            info!("Nothing new to record");
            return Ok(SyncStatus::Unchanged {
                comment_id: thread.map(|thread| thread.comment_id().to_string()),
            });
        }

        match thread {
            Some(thread) => {
                let body = thread.appended(&entries);
                client
                    .update_comment(issue_key, thread.comment_id(), &body, &listing.session)
                    .await?;

                info!(
                    comment_id = thread.comment_id(),
                    entries = entries.len(),
                    "Appended to Jira comment"
                );
                Ok(SyncStatus::Appended {
                    comment_id: thread.comment_id().to_string(),
                    entries: entries.len(),
                })
            }
            None => {
                let header = renderer.render_header(&event.pr_link)?;
                let body = compose_body(&header, &entries);
                let comment = client
                    .create_comment(issue_key, &body, &listing.session)
                    .await?;

                info!(
                    comment_id = %comment.id,
                    entries = entries.len(),
                    "Created Jira comment"
                );
                Ok(SyncStatus::Created {
                    comment_id: comment.id,
                    entries: entries.len(),
                })
            }
        }
    }
    .instrument(span)
    .await
}
