//! Entry renderer.

use super::locale::{Locale, TEMPLATE_NAMES};
use super::TemplateError;
use crate::events::{MergeStatus, PullRequestStatus, ReviewerVote};
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

/// Creates a Handlebars registry holding the templates of one locale.
///
/// The registry is configured with:
/// - No HTML escaping (comments are Jira text, not HTML)
/// - Strict mode (catches missing variables)
///
/// # Errors
///
/// Returns an error if a bundled template fails to parse.
pub fn create_handlebars_registry(locale: Locale) -> Result<Handlebars<'static>, TemplateError> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);

    for name in TEMPLATE_NAMES {
        if let Some(source) = locale.template_source(name) {
            hbs.register_template_string(name, source)
                .map_err(|source| TemplateError::RegistrationError {
                    locale: locale.to_string(),
                    source: Box::new(source),
                })?;
        }
    }

    Ok(hbs)
}

/// Renders comment headers and entries for a fixed locale.
///
/// Every render is deterministic: the same input always yields the same text.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    locale: Locale,
}

impl TemplateRenderer {
    /// Creates a renderer for the given locale.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled template fails to parse.
    pub fn new(locale: Locale) -> Result<Self, TemplateError> {
        Ok(Self {
            handlebars: create_handlebars_registry(locale)?,
            locale,
        })
    }

    /// Returns the locale this renderer writes in.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Renders the header that opens a pull request's running comment.
    ///
    /// The header carries the PR link, which later events use to find the
    /// comment again.
    pub fn render_header(&self, pr_link: &str) -> Result<String, TemplateError> {
        self.render("header", &json!({ "pr_link": pr_link }))
    }

    /// Renders a pull request creation entry.
    pub fn render_created(
        &self,
        title: &str,
        pr_link: &str,
        created_at: Option<&str>,
        commit: Option<&str>,
    ) -> Result<String, TemplateError> {
        self.render(
            "created",
            &json!({
                "title": title,
                "pr_link": pr_link,
                "timestamp": self.locale.format_timestamp(created_at),
                "commit": commit,
            }),
        )
    }

    /// Renders a source branch update entry.
    pub fn render_updated(
        &self,
        updated_at: Option<&str>,
        commit: &str,
        status: Option<&PullRequestStatus>,
    ) -> Result<String, TemplateError> {
        self.render(
            "updated",
            &json!({
                "timestamp": self.locale.format_timestamp(updated_at),
                "status": status.map(|status| self.locale.status_label(status)),
                "commit": commit,
            }),
        )
    }

    /// Renders a pull request status change entry.
    pub fn render_status_changed(
        &self,
        status: &PullRequestStatus,
    ) -> Result<String, TemplateError> {
        self.render(
            "status_changed",
            &json!({ "status": self.locale.status_label(status) }),
        )
    }

    /// Renders a merge attempt entry.
    pub fn render_merge_attempted(
        &self,
        pr_link: &str,
        merge_status: &MergeStatus,
    ) -> Result<String, TemplateError> {
        let raw = merge_status.as_str();
        self.render(
            "merge_attempted",
            &json!({
                "pr_link": pr_link,
                "outcome": self.locale.merge_note(merge_status),
                "merge_status": (!raw.is_empty()).then_some(raw),
            }),
        )
    }

    /// Renders a discussion comment entry.
    pub fn render_commented(
        &self,
        pr_link: &str,
        author: &str,
        content: &str,
        thread_id: Option<&str>,
        published_at: Option<&str>,
    ) -> Result<String, TemplateError> {
        self.render(
            "commented",
            &json!({
                "author": author,
                "content": neutralize_delimiters(content),
                "discussion_link": discussion_link(pr_link, thread_id),
                "timestamp": self.locale.format_timestamp(published_at),
            }),
        )
    }

    /// Renders a reviewer vote entry.
    pub fn render_vote(
        &self,
        vote: &ReviewerVote,
        commit: Option<&str>,
    ) -> Result<String, TemplateError> {
        self.render(
            "reviewer_voted",
            &json!({
                "reviewer": vote.reviewer,
                "status": self.locale.vote_label(vote.status()),
                "commit": commit,
            }),
        )
    }

    fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        let rendered = self.handlebars.render(name, data)?;
        Ok(rendered.trim().to_string())
    }
}

/// Builds the browser link of a discussion thread.
fn discussion_link(pr_link: &str, thread_id: Option<&str>) -> String {
    match thread_id {
        Some(id) => {
            let separator = if pr_link.contains('?') { '&' } else { '?' };
            format!("{pr_link}{separator}discussionId={id}")
        }
        None => pr_link.to_string(),
    }
}

/// Rewrites user lines that would read as the entry delimiter.
fn neutralize_delimiters(content: &str) -> String {
    content
        .lines()
        .map(|line| if line.trim() == "---" { "- - -" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}
