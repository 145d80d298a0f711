//! Comment sync status types.

use serde::Serialize;

/// Outcome of syncing one event into the pull request's Jira comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    /// A new running comment was created.
    Created {
        /// Jira comment id.
        comment_id: String,
        /// Number of entries written.
        entries: usize,
    },

    /// Entries were appended to the existing running comment.
    Appended {
        /// Jira comment id.
        comment_id: String,
        /// Number of entries appended.
        entries: usize,
    },

    /// Nothing new to record.
    Unchanged {
        /// Jira comment id, if a running comment exists.
        comment_id: Option<String>,
    },
}

impl SyncStatus {
    /// Returns the status as a string for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Appended { .. } => "appended",
            Self::Unchanged { .. } => "unchanged",
        }
    }

    /// Returns the id of the comment the event landed in, if any.
    #[must_use]
    pub fn comment_id(&self) -> Option<&str> {
        match self {
            Self::Created { comment_id, .. } | Self::Appended { comment_id, .. } => {
                Some(comment_id)
            }
            Self::Unchanged { comment_id } => comment_id.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_sync_status_to_string() {
        let created = SyncStatus::Created {
            comment_id: "10001".to_string(),
            entries: 1,
        };
        assert_eq!(created.as_str(), "created");
        assert_eq!(created.comment_id(), Some("10001"));

        let appended = SyncStatus::Appended {
            comment_id: "10002".to_string(),
            entries: 2,
        };
        assert_eq!(appended.as_str(), "appended");

        let unchanged = SyncStatus::Unchanged { comment_id: None };
        assert_eq!(unchanged.as_str(), "unchanged");
        assert_eq!(unchanged.comment_id(), None);
    }

    #[test]
    fn serializes_with_status_tag() {
        let value = serde_json::to_value(SyncStatus::Appended {
            comment_id: "7".to_string(),
            entries: 1,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "status": "appended", "comment_id": "7", "entries": 1 })
        );
    }
}
