//! The running comment that collects every entry for one pull request.
//!
//! Wire format:
//!
//! ```text
//! <header line>
//! Link: <pr link>
//!
//! <entry 1>
//!
//! ---
//!
//! <entry 2>
//! ```

use crate::jira::JiraComment;
use crate::templates::{
    COMMIT_ENTRY_HEADINGS, COMMIT_LINE_PREFIX, STATUS_ENTRY_HEADINGS, STATUS_LINE_PREFIX,
};

/// Separator placed between two entries.
pub const ENTRY_DELIMITER: &str = "\n\n---\n\n";

/// Separator between the header and the first entry.
const HEADER_SEPARATOR: &str = "\n\n";

/// An existing Jira comment acting as a pull request's running log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    comment_id: String,
    body: String,
}

impl CommentThread {
    /// Finds the running comment of a pull request.
    ///
    /// A comment whose header carries the PR link wins over one that only
    /// mentions it further down, such as another pull request's thread
    /// quoting the link. Within each pass the first comment in the order
    /// given wins.
    #[must_use]
    pub fn find(comments: &[JiraComment], pr_link: &str) -> Option<Self> {
        comments
            .iter()
            .find(|comment| contains_marker(&header_of(&comment.body), pr_link))
            .or_else(|| {
                comments
                    .iter()
                    .find(|comment| contains_marker(&comment.body, pr_link))
            })
            .map(Self::from_comment)
    }

    /// Wraps a Jira comment.
    #[must_use]
    pub fn from_comment(comment: &JiraComment) -> Self {
        Self {
            comment_id: comment.id.clone(),
            body: comment.body.clone(),
        }
    }

    /// Returns the Jira comment id.
    #[must_use]
    pub fn comment_id(&self) -> &str {
        &self.comment_id
    }

    /// Returns the raw comment body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Splits the body into its entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        split_entries(&self.body)
    }

    /// Returns the most recent entry matching `predicate`.
    #[must_use]
    pub fn last_entry_where(&self, predicate: impl Fn(&str) -> bool) -> Option<String> {
        self.entries().into_iter().rev().find(|entry| predicate(entry))
    }

    /// Returns the most recently recorded commit hash.
    ///
    /// Only entries written for commits (creation, update, vote) are read, and
    /// only their last line, so commit lines inside user text are ignored.
    #[must_use]
    pub fn last_commit(&self) -> Option<String> {
        self.entries()
            .iter()
            .rev()
            .filter(|entry| opens_with_any(entry, &COMMIT_ENTRY_HEADINGS))
            .find_map(|entry| {
                entry
                    .lines()
                    .last()
                    .and_then(|line| line.trim().strip_prefix(COMMIT_LINE_PREFIX.trim_end()))
                    .and_then(|rest| rest.split_whitespace().next())
                    .map(str::to_string)
            })
    }

    /// Returns the most recently recorded pull request status label.
    #[must_use]
    pub fn last_status(&self) -> Option<String> {
        self.entries()
            .iter()
            .rev()
            .filter(|entry| opens_with_any(entry, &STATUS_ENTRY_HEADINGS))
            .find_map(|entry| {
                entry
                    .lines()
                    .find_map(|line| line.trim().strip_prefix(STATUS_LINE_PREFIX.trim_end()))
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(str::to_string)
            })
    }

    /// Returns the body with `entries` appended after the existing ones.
    ///
    /// The existing body is kept verbatim apart from trailing whitespace.
    #[must_use]
    pub fn appended(&self, entries: &[String]) -> String {
        let mut body = self.body.trim_end().to_string();
        for entry in entries {
            body.push_str(ENTRY_DELIMITER);
            body.push_str(entry.trim());
        }
        body
    }
}

/// Builds the body of a new running comment.
#[must_use]
pub fn compose_body(header: &str, entries: &[String]) -> String {
    let entries = entries
        .iter()
        .map(|entry| entry.trim())
        .collect::<Vec<_>>()
        .join(ENTRY_DELIMITER);
    format!("{}{HEADER_SEPARATOR}{entries}", header.trim())
}

/// Returns true if `body` mentions `pr_link` as a whole link.
///
/// A match must not continue with characters that would extend the link,
/// so `.../pullrequest/1` does not match inside `.../pullrequest/10`.
#[must_use]
pub fn contains_marker(body: &str, pr_link: &str) -> bool {
    if pr_link.is_empty() {
        return false;
    }

    body.match_indices(pr_link).any(|(start, _)| {
        body[start + pr_link.len()..]
            .chars()
            .next()
            .map_or(true, |next| {
                !(next.is_alphanumeric() || matches!(next, '/' | '-' | '_' | '%'))
            })
    })
}

fn split_entries(body: &str) -> Vec<String> {
    let body = normalize_newlines(body);
    let mut blocks = body.split(ENTRY_DELIMITER);

    let first = blocks
        .next()
        .and_then(|block| block.split_once(HEADER_SEPARATOR))
        .map(|(_, entry)| entry);

    first
        .into_iter()
        .chain(blocks)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn header_of(body: &str) -> String {
    let body = normalize_newlines(body);
    match body.split_once(HEADER_SEPARATOR) {
        Some((header, _)) => header.to_string(),
        None => body,
    }
}

fn opens_with_any(entry: &str, headings: &[&str]) -> bool {
    headings.iter().any(|heading| entry.starts_with(heading))
}

fn normalize_newlines(body: &str) -> String {
    body.replace("\r\n", "\n")
}
