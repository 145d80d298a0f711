//! Jira REST v2 comment resources.

use serde::{Deserialize, Serialize};

/// A comment on a Jira issue.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraComment {
    /// Comment id. Jira serializes it as a string.
    pub id: String,

    /// Comment body in Jira text format.
    #[serde(default)]
    pub body: String,
}

/// Response of `GET /rest/api/2/issue/{key}/comment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<JiraComment>,

    #[serde(default)]
    pub total: Option<u64>,
}

/// Request body for creating or updating a comment.
#[derive(Debug, Serialize)]
pub(crate) struct CommentBody<'a> {
    pub body: &'a str,
}
