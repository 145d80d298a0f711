//! Jira connection settings.
//!
//! The settings are validated once at startup and passed explicitly to the
//! Jira client; nothing in the library reads the environment directly.

mod error;

pub use error::ConfigError;

use std::time::Duration;
use url::Url;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Validated configuration for talking to Jira.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Jira base URL, without a trailing slash in its path.
    base_url: Url,
    /// API token (Bearer) or password (Basic, when a username is set).
    token: String,
    /// Username for Basic authentication.
    username: Option<String>,
    /// Per-request timeout.
    timeout: Duration,
    /// Custom User-Agent header.
    user_agent: Option<String>,
    /// Whether mutating requests replay the session and XSRF cookies.
    xsrf_session: bool,
}

impl JiraConfig {
    /// Creates a configuration with default timeout and Bearer authentication.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the URL is not an absolute `http(s)` URL or
    /// the token is blank.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;

        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "token".to_string(),
                message: "API token must not be empty".to_string(),
            });
        }

        Ok(Self {
            base_url,
            token,
            username: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            xsrf_session: false,
        })
    }

    /// Switches to Basic authentication with the given username.
    ///
    /// Blank usernames are ignored.
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username.filter(|name| !name.trim().is_empty());
        self
    }

    /// Sets the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::ValidationError {
                field: "timeout".to_string(),
                message: "timeout must be at least one second".to_string(),
            });
        }
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// Sets a custom User-Agent. Blank values are ignored.
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent.filter(|agent| !agent.trim().is_empty());
        self
    }

    /// Enables replaying session and XSRF cookies on mutating requests.
    pub fn with_xsrf_session(mut self, enabled: bool) -> Self {
        self.xsrf_session = enabled;
        self
    }

    /// Returns the Jira base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configured token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the Basic authentication username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the custom User-Agent, if any.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns whether XSRF session replay is enabled.
    pub fn xsrf_session(&self) -> bool {
        self.xsrf_session
    }

    /// Returns the origin (`scheme://host[:port]`) of the Jira instance.
    pub fn origin(&self) -> String {
        self.base_url.origin().ascii_serialization()
    }

    /// Joins path segments onto the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Parses and validates the Jira base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError {
            field: "url".to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::ValidationError {
            field: "url".to_string(),
            message: format!("'{raw}' is not a usable base URL"),
        });
    }

    Ok(url)
}
