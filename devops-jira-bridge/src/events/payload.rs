//! Azure DevOps service hook payload model.
//!
//! Only the fields the bridge reads are modelled; everything else in the
//! payload is ignored during deserialization.

use serde::Deserialize;

/// A service hook notification as posted by Azure DevOps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Event type tag (e.g. `git.pullrequest.created`).
    #[serde(default)]
    pub event_type: String,

    /// When the notification was raised.
    #[serde(default)]
    pub created_date: Option<String>,

    /// Event resource. A pull request for PR events; a comment plus its
    /// pull request for comment events.
    #[serde(default)]
    pub resource: Resource,
}

impl WebhookEvent {
    /// Returns the pull request the event refers to.
    ///
    /// Comment events nest the pull request under `resource.pullRequest`;
    /// all other PR events use the resource itself.
    #[must_use]
    pub fn pull_request(&self) -> &PullRequest {
        self.resource
            .nested_pull_request
            .as_ref()
            .unwrap_or(&self.resource.pull_request)
    }
}

/// The `resource` object of a notification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Pull request fields, present at the top level for PR events.
    #[serde(flatten)]
    pub pull_request: PullRequest,

    /// Pull request nested inside comment events.
    #[serde(default, rename = "pullRequest")]
    pub nested_pull_request: Option<PullRequest>,

    /// Comment carried by comment events.
    #[serde(default)]
    pub comment: Option<PullRequestComment>,
}

/// A pull request as serialized in service hook payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    #[serde(default)]
    pub pull_request_id: Option<u64>,

    #[serde(default)]
    pub title: Option<String>,

    /// REST API URL of the pull request.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, rename = "_links")]
    pub links: Option<Links>,

    #[serde(default)]
    pub repository: Option<Repository>,

    #[serde(default)]
    pub creation_date: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub merge_status: Option<String>,

    #[serde(default)]
    pub last_merge_source_commit: Option<CommitRef>,

    #[serde(default)]
    pub reviewers: Vec<Reviewer>,
}

impl PullRequest {
    /// Returns the pull request title, or an empty string.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Returns the browser link of the pull request.
    ///
    /// Resolution order: `_links.web.href`, the repository web URL plus the
    /// pull request id, then the raw `url` field.
    #[must_use]
    pub fn web_link(&self) -> Option<String> {
        if let Some(href) = self
            .links
            .as_ref()
            .and_then(|links| links.web.as_ref())
            .map(|web| web.href.trim())
            .filter(|href| !href.is_empty())
        {
            return Some(href.to_string());
        }

        if let (Some(id), Some(repository)) = (self.pull_request_id, self.repository.as_ref()) {
            if let Some(base) = repository.browser_url() {
                return Some(format!("{}/pullrequest/{id}", base.trim_end_matches('/')));
            }
        }

        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }

    /// Returns the head commit of the source branch, if known.
    #[must_use]
    pub fn source_commit(&self) -> Option<&str> {
        self.last_merge_source_commit
            .as_ref()
            .map(|commit| commit.commit_id.trim())
            .filter(|id| !id.is_empty())
    }
}

/// HAL-style link collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub web: Option<Link>,

    #[serde(default)]
    pub threads: Option<Link>,
}

/// A single link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub href: String,
}

/// Repository reference inside a pull request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(default)]
    pub web_url: Option<String>,

    #[serde(default)]
    pub remote_url: Option<String>,
}

impl Repository {
    fn browser_url(&self) -> Option<&str> {
        self.web_url
            .as_deref()
            .or(self.remote_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Commit reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRef {
    #[serde(default)]
    pub commit_id: String,
}

/// A reviewer and their current vote.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub vote: i32,
}

/// A comment on a pull request discussion thread.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestComment {
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub author: Option<Identity>,

    #[serde(default)]
    pub published_date: Option<String>,

    #[serde(default, rename = "_links")]
    pub links: Option<Links>,
}

impl PullRequestComment {
    /// Returns the id of the discussion thread the comment belongs to.
    ///
    /// Parsed from the trailing segment of `_links.threads.href`.
    #[must_use]
    pub fn thread_id(&self) -> Option<&str> {
        let href = self.links.as_ref()?.threads.as_ref()?.href.as_str();
        let (_, id) = href.trim_end_matches('/').rsplit_once("/threads/")?;
        (!id.is_empty() && id.chars().all(|c| c.is_ascii_digit())).then_some(id)
    }
}

/// An Azure DevOps identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub display_name: String,
}
