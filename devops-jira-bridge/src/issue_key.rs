//! Jira issue key extraction from pull request titles.
//!
//! Titles reference their Jira issue with a bracket tag such as
//! `[J:PROJ-123] Add feature`. The tag prefix is case-insensitive and
//! whitespace inside the brackets is tolerated.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static ISSUE_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*J\s*:\s*([a-z0-9][a-z0-9_-]*)\s*\]").expect("issue key pattern is valid")
});

/// A Jira issue key taken from a pull request title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    /// Returns the key as it is sent to Jira (upper case).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the Jira issue key from a pull request title.
///
/// Only the first `[J:<KEY>]` tag is considered; later tags are ignored.
///
/// # Returns
///
/// The upper-cased key, or `None` when the title carries no tag.
#[must_use]
pub fn extract_issue_key(title: &str) -> Option<IssueKey> {
    ISSUE_KEY_PATTERN
        .captures(title)
        .and_then(|captures| captures.get(1))
        .map(|key| IssueKey(key.as_str().to_uppercase()))
}
