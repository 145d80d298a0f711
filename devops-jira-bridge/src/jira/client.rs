//! Jira REST v2 comment client.

use super::session::XsrfSession;
use super::types::{CommentBody, CommentPage, JiraComment};
use super::JiraError;
use crate::config::JiraConfig;
use crate::issue_key::IssueKey;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, COOKIE, ORIGIN, REFERER};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;
use url::Url;

/// Header Jira checks to skip its form-token XSRF check.
const ATLASSIAN_TOKEN_HEADER: &str = "X-Atlassian-Token";

/// User-Agent sent when none is configured.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Comments of an issue together with the session they were read under.
#[derive(Debug, Clone, Default)]
pub struct CommentListing {
    /// Comments in the order Jira returned them (oldest first).
    pub comments: Vec<JiraComment>,

    /// Cookies to replay on the following writes. Empty unless XSRF session
    /// replay is enabled.
    pub session: XsrfSession,
}

/// Low-level client for the Jira issue comment endpoints.
///
/// Holds only immutable configuration; every call is an independent request.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    config: JiraConfig,
}

impl JiraClient {
    /// Builds a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the token or user agent cannot be encoded as
    /// headers or the HTTP client fails to build.
    pub fn new(config: JiraConfig) -> Result<Self, JiraError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Basic auth is applied per request; Bearer can be a default header.
        if config.username().is_none() {
            let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.token()))
                .map_err(|source| JiraError::InvalidHeader {
                    name: "Authorization",
                    source,
                })?;
            bearer.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer);
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent().unwrap_or(DEFAULT_USER_AGENT))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    /// Fetches the comments of an issue.
    ///
    /// With XSRF session replay enabled this read doubles as the preliminary
    /// request that obtains the session and XSRF cookies.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] on transport failures or non-success statuses.
    pub async fn list_comments(&self, issue_key: &IssueKey) -> Result<CommentListing, JiraError> {
        let url = self.comments_url(issue_key);
        debug!(url = %url, "Fetching Jira comments");

        let response = self.authorize(self.http.get(url.clone())).send().await?;
        let response = ensure_success("GET", &url, response).await?;

        let session = if self.config.xsrf_session() {
            XsrfSession::from_headers(response.headers())
        } else {
            XsrfSession::default()
        };

        let page: CommentPage = response.json().await?;
        debug!(
            count = page.comments.len(),
            total = ?page.total,
            has_session = !session.is_empty(),
            "Fetched Jira comments"
        );

        Ok(CommentListing {
            comments: page.comments,
            session,
        })
    }

    /// Creates a comment on an issue.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] on transport failures or non-success statuses.
    pub async fn create_comment(
        &self,
        issue_key: &IssueKey,
        body: &str,
        session: &XsrfSession,
    ) -> Result<JiraComment, JiraError> {
        let url = self.comments_url(issue_key);
        debug!(url = %url, "Creating Jira comment");

        let request = self.http.post(url.clone()).json(&CommentBody { body });
        let request = self.with_session(self.authorize(request), issue_key, session)?;
        let response = ensure_success("POST", &url, request.send().await?).await?;

        Ok(response.json().await?)
    }

    /// Replaces the body of an existing comment.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] on transport failures or non-success statuses.
    pub async fn update_comment(
        &self,
        issue_key: &IssueKey,
        comment_id: &str,
        body: &str,
        session: &XsrfSession,
    ) -> Result<JiraComment, JiraError> {
        let url = self.config.endpoint(&[
            "rest",
            "api",
            "2",
            "issue",
            issue_key.as_str(),
            "comment",
            comment_id,
        ]);
        debug!(url = %url, "Updating Jira comment");

        let request = self.http.put(url.clone()).json(&CommentBody { body });
        let request = self.with_session(self.authorize(request), issue_key, session)?;
        let response = ensure_success("PUT", &url, request.send().await?).await?;

        Ok(response.json().await?)
    }

    fn comments_url(&self, issue_key: &IssueKey) -> Url {
        self.config
            .endpoint(&["rest", "api", "2", "issue", issue_key.as_str(), "comment"])
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.username() {
            Some(username) => request.basic_auth(username, Some(self.config.token())),
            None => request,
        }
    }

    /// Adds the XSRF headers to a mutating request when replay is enabled.
    fn with_session(
        &self,
        request: RequestBuilder,
        issue_key: &IssueKey,
        session: &XsrfSession,
    ) -> Result<RequestBuilder, JiraError> {
        if !self.config.xsrf_session() {
            return Ok(request);
        }

        let referer = self.config.endpoint(&["browse", issue_key.as_str()]);
        let mut request = request
            .header(ATLASSIAN_TOKEN_HEADER, "no-check")
            .header(ORIGIN, self.config.origin())
            .header(REFERER, referer.as_str());

        if let Some(cookies) = session.cookie_header() {
            let mut value =
                HeaderValue::from_str(&cookies).map_err(|source| JiraError::InvalidHeader {
                    name: "Cookie",
                    source,
                })?;
            value.set_sensitive(true);
            request = request.header(COOKIE, value);
        }

        Ok(request)
    }
}

/// Turns a non-success response into [`JiraError::Status`].
async fn ensure_success(
    method: &'static str,
    url: &Url,
    response: Response,
) -> Result<Response, JiraError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());

    Err(JiraError::Status {
        method,
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}
