//! Per-request orchestration: extract, classify, sync.

mod error;
mod outcome;

pub use error::BridgeError;
pub use outcome::{IgnoreReason, WebhookOutcome};

use crate::comments::sync_event;
use crate::config::JiraConfig;
use crate::events::{classify, EventKind, PullRequestEvent, WebhookEvent};
use crate::issue_key::{extract_issue_key, IssueKey};
use crate::jira::JiraClient;
use crate::templates::{Locale, TemplateRenderer};
use std::error::Error;
use tracing::{debug, error, info, info_span, Instrument};

/// Mirrors Azure DevOps pull request events into Jira.
///
/// Holds only immutable state and can be shared across requests.
pub struct Bridge {
    client: JiraClient,
    renderer: TemplateRenderer,
}

impl Bridge {
    /// Builds a bridge from the Jira configuration and the comment locale.
    pub fn new(config: JiraConfig, locale: Locale) -> Result<Self, BridgeError> {
        Ok(Self {
            client: JiraClient::new(config)?,
            renderer: TemplateRenderer::new(locale)?,
        })
    }

    /// Returns the locale comments are written in.
    pub fn locale(&self) -> Locale {
        self.renderer.locale()
    }

    /// Handles a raw webhook body.
    ///
    /// Never fails: malformed bodies are ignored and processing errors are
    /// logged with their full source chain and reported as
    /// [`WebhookOutcome::Failed`].
    pub async fn handle_payload(&self, payload: &[u8]) -> WebhookOutcome {
        let event: WebhookEvent = match serde_json::from_slice(payload) {
            Ok(event) => event,
            Err(e) => {
                info!(error = %e, "Ignoring malformed webhook payload");
                return WebhookOutcome::ignored(IgnoreReason::MalformedPayload);
            }
        };

        let title = event.pull_request().title();
        let Some(issue_key) = extract_issue_key(title) else {
            info!(%title, "No Jira issue key in pull request title");
            return WebhookOutcome::ignored(IgnoreReason::MissingIssueKey);
        };

        match self.process(&event, &issue_key).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    event_type = %event.event_type,
                    issue_key = %issue_key,
                    error = %e,
                    error_chain = %error_chain(&e),
                    "Failed to sync pull request event to Jira"
                );
                WebhookOutcome::Failed {
                    issue_key: Some(issue_key.to_string()),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Processes a parsed webhook event for the issue named in its title.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] if Jira rejects a request or rendering fails.
    pub async fn process(
        &self,
        event: &WebhookEvent,
        issue_key: &IssueKey,
    ) -> Result<WebhookOutcome, BridgeError> {
        let span = info_span!("webhook", event_type = %event.event_type, issue_key = %issue_key);

        async {
            let pull_request = event.pull_request();

            let kind = classify(event);
            if let EventKind::Unknown { event_type } = &kind {
                info!(%event_type, "Ignoring unhandled event type");
                return Ok(WebhookOutcome::ignored(IgnoreReason::UnknownEvent));
            }

            let Some(pr_link) = pull_request.web_link() else {
                info!("Pull request has no link to use as marker");
                return Ok(WebhookOutcome::ignored(
                    IgnoreReason::MissingPullRequestLink,
                ));
            };

            debug!(kind = kind.name(), pr_link = %pr_link, "Classified event");
            let event = PullRequestEvent {
                title: pull_request.title().to_string(),
                pr_link,
                kind,
            };

            let status = sync_event(&self.client, &self.renderer, issue_key, &event).await?;
            info!(
                status = status.as_str(),
                comment_id = status.comment_id().unwrap_or("-"),
                "Synced pull request event"
            );
            Ok(WebhookOutcome::Synced {
                issue_key: issue_key.to_string(),
                comment: status,
            })
        }
        .instrument(span)
        .await
    }
}

/// Renders an error and all of its sources, outermost first.
fn error_chain(error: &dyn Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
