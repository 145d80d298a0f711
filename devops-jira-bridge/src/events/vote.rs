//! Reviewer vote, pull request status and merge status values.

use serde::Serialize;

/// Status derived from an Azure DevOps reviewer vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteStatus {
    /// Vote `10`.
    Approved,
    /// Vote `5`.
    ApprovedWithSuggestions,
    /// Vote `0`.
    NoVote,
    /// Vote `-5`.
    WaitingForAuthor,
    /// Vote `-10`.
    Rejected,
    /// Any other value.
    Changed,
}

impl VoteStatus {
    /// Maps a raw vote value to its status.
    #[must_use]
    pub fn from_vote(vote: i32) -> Self {
        match vote {
            10 => Self::Approved,
            5 => Self::ApprovedWithSuggestions,
            0 => Self::NoVote,
            -5 => Self::WaitingForAuthor,
            -10 => Self::Rejected,
            _ => Self::Changed,
        }
    }
}

/// A reviewer's vote as carried by an update notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerVote {
    pub reviewer: String,
    pub vote: i32,
}

impl ReviewerVote {
    #[must_use]
    pub fn status(&self) -> VoteStatus {
        VoteStatus::from_vote(self.vote)
    }
}

/// Result of a merge attempt, from the pull request `mergeStatus` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStatus {
    Succeeded,
    Conflicts,
    Failure,
    RejectedByPolicy,
    Queued,
    NotSet,
    /// Unrecognized or missing value, kept verbatim.
    Other(String),
}

impl MergeStatus {
    /// Parses the `mergeStatus` field. Matching is case-insensitive.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::Other(String::new());
        };

        match raw.to_ascii_lowercase().as_str() {
            "succeeded" => Self::Succeeded,
            "conflicts" => Self::Conflicts,
            "failure" => Self::Failure,
            "rejectedbypolicy" => Self::RejectedByPolicy,
            "queued" => Self::Queued,
            "notset" => Self::NotSet,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Returns the raw status as Azure DevOps spells it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Conflicts => "conflicts",
            Self::Failure => "failure",
            Self::RejectedByPolicy => "rejectedByPolicy",
            Self::Queued => "queued",
            Self::NotSet => "notSet",
            Self::Other(raw) => raw,
        }
    }
}

/// Lifecycle status of a pull request, from the `status` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestStatus {
    Active,
    Completed,
    Abandoned,
    /// Unrecognized value, kept verbatim.
    Other(String),
}

impl PullRequestStatus {
    /// Parses the `status` field. Missing, blank and `notSet` values yield
    /// `None`. Matching is case-insensitive.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;

        match raw.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "abandoned" => Some(Self::Abandoned),
            "notset" => None,
            _ => Some(Self::Other(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_votes() {
        assert_eq!(VoteStatus::from_vote(10), VoteStatus::Approved);
        assert_eq!(VoteStatus::from_vote(5), VoteStatus::ApprovedWithSuggestions);
        assert_eq!(VoteStatus::from_vote(0), VoteStatus::NoVote);
        assert_eq!(VoteStatus::from_vote(-5), VoteStatus::WaitingForAuthor);
        assert_eq!(VoteStatus::from_vote(-10), VoteStatus::Rejected);
    }

    #[test]
    fn maps_unknown_votes_to_changed() {
        assert_eq!(VoteStatus::from_vote(3), VoteStatus::Changed);
        assert_eq!(VoteStatus::from_vote(-1), VoteStatus::Changed);
    }

    #[test]
    fn parses_merge_status() {
        assert_eq!(MergeStatus::parse(Some("succeeded")), MergeStatus::Succeeded);
        assert_eq!(
            MergeStatus::parse(Some("rejectedByPolicy")),
            MergeStatus::RejectedByPolicy
        );
        assert_eq!(MergeStatus::parse(Some("CONFLICTS")), MergeStatus::Conflicts);
        assert_eq!(
            MergeStatus::parse(Some("somethingNew")),
            MergeStatus::Other("somethingNew".to_string())
        );
        assert_eq!(MergeStatus::parse(None), MergeStatus::Other(String::new()));
        assert_eq!(MergeStatus::RejectedByPolicy.as_str(), "rejectedByPolicy");
    }

    #[test]
    fn parses_pull_request_status() {
        assert_eq!(
            PullRequestStatus::parse(Some("completed")),
            Some(PullRequestStatus::Completed)
        );
        assert_eq!(
            PullRequestStatus::parse(Some("Abandoned")),
            Some(PullRequestStatus::Abandoned)
        );
        assert_eq!(
            PullRequestStatus::parse(Some("draft")),
            Some(PullRequestStatus::Other("draft".to_string()))
        );
        assert_eq!(PullRequestStatus::parse(Some("notSet")), None);
        assert_eq!(PullRequestStatus::parse(Some(" ")), None);
        assert_eq!(PullRequestStatus::parse(None), None);
    }
}
