//! Jira issue comment API.
//!
//! A thin client over the REST v2 comment endpoints: list, create and update.
//! Deployments that enforce session-based XSRF protection can opt into
//! cookie replay, see [`XsrfSession`].

mod client;
mod error;
mod session;
mod types;

pub use client::{CommentListing, JiraClient};
pub use error::JiraError;
pub use session::{XsrfSession, SESSION_COOKIE, XSRF_COOKIE};
pub use types::{CommentPage, JiraComment};
