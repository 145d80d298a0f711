//! Decides which entries an event adds to a running comment.

use super::thread::CommentThread;
use crate::events::{EventKind, PullRequestEvent, PullRequestStatus, ReviewerVote, VoteStatus};
use crate::templates::{TemplateError, TemplateRenderer};

/// Renders the entries `event` contributes, skipping what `thread` already
/// records.
///
/// - Updates only produce an update entry when the commit differs from the
///   last recorded one. Otherwise the notification was a status or vote
///   change, and those entries are produced instead.
/// - A status entry is produced when the status differs from the last
///   recorded one. A thread without a recorded status counts as active.
/// - Votes produce one entry per reviewer with a non-zero vote that differs
///   from the reviewer's latest recorded vote entry.
/// - Unknown events produce nothing.
///
/// # Errors
///
/// Returns [`TemplateError`] if rendering fails.
pub fn plan_entries(
    renderer: &TemplateRenderer,
    event: &PullRequestEvent,
    thread: Option<&CommentThread>,
) -> Result<Vec<String>, TemplateError> {
    let last_commit = thread.and_then(CommentThread::last_commit);

    match &event.kind {
        EventKind::Created { created_at, commit } => Ok(vec![renderer.render_created(
            &event.title,
            &event.pr_link,
            created_at.as_deref(),
            commit.as_deref(),
        )?]),

        EventKind::Updated {
            updated_at,
            commit,
            status,
            votes,
        } => {
            if last_commit.as_deref() != Some(commit.as_str()) {
                return Ok(vec![renderer.render_updated(
                    updated_at.as_deref(),
                    commit,
                    status.as_ref(),
                )?]);
            }

            let mut entries = status_entry(renderer, status.as_ref(), thread)?;
            entries.extend(vote_entries(renderer, votes, Some(commit), thread)?);
            Ok(entries)
        }

        EventKind::ReviewerVoted { status, votes } => {
            let mut entries = status_entry(renderer, status.as_ref(), thread)?;
            entries.extend(vote_entries(
                renderer,
                votes,
                last_commit.as_deref(),
                thread,
            )?);
            Ok(entries)
        }

        EventKind::MergeAttempted { merge_status } => Ok(vec![
            renderer.render_merge_attempted(&event.pr_link, merge_status)?
        ]),

        EventKind::Commented {
            author,
            content,
            thread_id,
            published_at,
        } => Ok(vec![renderer.render_commented(
            &event.pr_link,
            author,
            content,
            thread_id.as_deref(),
            published_at.as_deref(),
        )?]),

        EventKind::Unknown { .. } => Ok(Vec::new()),
    }
}

fn status_entry(
    renderer: &TemplateRenderer,
    status: Option<&PullRequestStatus>,
    thread: Option<&CommentThread>,
) -> Result<Vec<String>, TemplateError> {
    let Some(status) = status else {
        return Ok(Vec::new());
    };

    let label = renderer.locale().status_label(status);
    let unchanged = match thread.and_then(CommentThread::last_status) {
        Some(recorded) => recorded == label,
        None => *status == PullRequestStatus::Active,
    };

    if unchanged {
        Ok(Vec::new())
    } else {
        Ok(vec![renderer.render_status_changed(status)?])
    }
}

fn vote_entries(
    renderer: &TemplateRenderer,
    votes: &[ReviewerVote],
    commit: Option<&str>,
    thread: Option<&CommentThread>,
) -> Result<Vec<String>, TemplateError> {
    let mut entries: Vec<String> = Vec::new();

    for vote in votes {
        if vote.status() == VoteStatus::NoVote {
            continue;
        }

        let entry = renderer.render_vote(vote, commit)?;
        let heading = vote_heading(&entry);
        let latest = thread.and_then(|thread| {
            thread.last_entry_where(|existing| {
                heading.is_some() && vote_heading(existing) == heading
            })
        });

        if latest.as_deref() != Some(entry.as_str()) && !entries.contains(&entry) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Returns the reviewer part of a vote entry, e.g. `**Vote from Bob`.
fn vote_heading(entry: &str) -> Option<&str> {
    entry.split_once("**: ").map(|(heading, _)| heading)
}
