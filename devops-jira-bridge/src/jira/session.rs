//! Session and XSRF cookie replay for Jira deployments that require it.

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Cookie carrying the servlet session.
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Cookie carrying Jira's XSRF token.
pub const XSRF_COOKIE: &str = "atlassian.xsrf.token";

/// Cookies captured from a read request, replayed on the following writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XsrfSession {
    cookies: Vec<(String, String)>,
}

impl XsrfSession {
    /// Captures the session and XSRF cookies from `Set-Cookie` headers.
    ///
    /// Other cookies are ignored. A later value for the same cookie replaces
    /// an earlier one.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut session = Self::default();

        for value in headers.get_all(SET_COOKIE) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            let pair = value.split(';').next().unwrap_or_default();
            let Some((name, cookie)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name == SESSION_COOKIE || name == XSRF_COOKIE {
                session.set(name, cookie.trim());
            }
        }

        session
    }

    fn set(&mut self, name: &str, value: &str) {
        match self.cookies.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.cookies.push((name.to_string(), value.to_string())),
        }
    }

    /// Returns true if no cookie was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Returns the captured value of a cookie.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Renders the captured cookies as a `Cookie` header value.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
