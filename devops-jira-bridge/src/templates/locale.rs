//! Deployment locales: template sources, labels and timestamp formats.

use crate::events::{MergeStatus, PullRequestStatus, VoteStatus};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Names of the templates every locale provides.
pub(crate) const TEMPLATE_NAMES: [&str; 7] = [
    "header",
    "created",
    "updated",
    "status_changed",
    "merge_attempted",
    "commented",
    "reviewer_voted",
];

/// Language used for every comment the bridge writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Brazilian Portuguese.
    #[default]
    PtBr,
    /// English.
    En,
}

/// Error returned when parsing an unsupported locale name.
#[derive(Debug, thiserror::Error)]
#[error("Unsupported locale '{0}', expected one of: pt-br, en")]
pub struct LocaleError(String);

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Ok(Self::PtBr),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(LocaleError(value.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PtBr => "pt-br",
            Self::En => "en",
        })
    }
}

impl Locale {
    /// Returns the Handlebars source of a named template.
    pub(crate) fn template_source(self, name: &str) -> Option<&'static str> {
        let source = match (self, name) {
            (Self::PtBr, "header") => include_str!("../../templates/pt-br/header.hbs"),
            (Self::PtBr, "created") => include_str!("../../templates/pt-br/created.hbs"),
            (Self::PtBr, "updated") => include_str!("../../templates/pt-br/updated.hbs"),
            (Self::PtBr, "status_changed") => {
                include_str!("../../templates/pt-br/status_changed.hbs")
            }
            (Self::PtBr, "merge_attempted") => {
                include_str!("../../templates/pt-br/merge_attempted.hbs")
            }
            (Self::PtBr, "commented") => include_str!("../../templates/pt-br/commented.hbs"),
            (Self::PtBr, "reviewer_voted") => {
                include_str!("../../templates/pt-br/reviewer_voted.hbs")
            }
            (Self::En, "header") => include_str!("../../templates/en/header.hbs"),
            (Self::En, "created") => include_str!("../../templates/en/created.hbs"),
            (Self::En, "updated") => include_str!("../../templates/en/updated.hbs"),
            (Self::En, "status_changed") => include_str!("../../templates/en/status_changed.hbs"),
            (Self::En, "merge_attempted") => include_str!("../../templates/en/merge_attempted.hbs"),
            (Self::En, "commented") => include_str!("../../templates/en/commented.hbs"),
            (Self::En, "reviewer_voted") => include_str!("../../templates/en/reviewer_voted.hbs"),
            _ => return None,
        };
        Some(source)
    }

    /// Human readable label for a reviewer vote.
    #[must_use]
    pub fn vote_label(self, status: VoteStatus) -> &'static str {
        match (self, status) {
            (Self::PtBr, VoteStatus::Approved) => "Aprovado",
            (Self::PtBr, VoteStatus::ApprovedWithSuggestions) => "Aprovado com sugestões",
            (Self::PtBr, VoteStatus::NoVote) => "Sem voto",
            (Self::PtBr, VoteStatus::WaitingForAuthor) => "Aguardando o autor",
            (Self::PtBr, VoteStatus::Rejected) => "Rejeitado",
            (Self::PtBr, VoteStatus::Changed) => "Voto alterado",
            (Self::En, VoteStatus::Approved) => "Approved",
            (Self::En, VoteStatus::ApprovedWithSuggestions) => "Approved with suggestions",
            (Self::En, VoteStatus::NoVote) => "No vote",
            (Self::En, VoteStatus::WaitingForAuthor) => "Waiting for author",
            (Self::En, VoteStatus::Rejected) => "Rejected",
            (Self::En, VoteStatus::Changed) => "Vote changed",
        }
    }

    /// Human readable label for a pull request status.
    #[must_use]
    pub fn status_label(self, status: &PullRequestStatus) -> &str {
        match (self, status) {
            (Self::PtBr, PullRequestStatus::Active) => "Ativo",
            (Self::PtBr, PullRequestStatus::Completed) => "Concluído",
            (Self::PtBr, PullRequestStatus::Abandoned) => "Abandonado",
            (Self::En, PullRequestStatus::Active) => "Active",
            (Self::En, PullRequestStatus::Completed) => "Completed",
            (Self::En, PullRequestStatus::Abandoned) => "Abandoned",
            (_, PullRequestStatus::Other(raw)) => raw,
        }
    }

    /// Human readable note for a merge attempt outcome.
    #[must_use]
    pub fn merge_note(self, status: &MergeStatus) -> &'static str {
        match (self, status) {
            (Self::PtBr, MergeStatus::Succeeded) => "Merge concluído com sucesso",
            (Self::PtBr, MergeStatus::Conflicts) => "Merge bloqueado por conflitos",
            (Self::PtBr, MergeStatus::Failure) => "Falha no merge",
            (Self::PtBr, MergeStatus::RejectedByPolicy) => "Merge rejeitado pelas políticas",
            (Self::PtBr, MergeStatus::Queued) => "Merge na fila",
            (Self::PtBr, MergeStatus::NotSet) => "Merge ainda não avaliado",
            (Self::PtBr, MergeStatus::Other(_)) => "Status de merge desconhecido",
            (Self::En, MergeStatus::Succeeded) => "Merge completed successfully",
            (Self::En, MergeStatus::Conflicts) => "Merge blocked by conflicts",
            (Self::En, MergeStatus::Failure) => "Merge failed",
            (Self::En, MergeStatus::RejectedByPolicy) => "Merge rejected by policy",
            (Self::En, MergeStatus::Queued) => "Merge queued",
            (Self::En, MergeStatus::NotSet) => "Merge not evaluated yet",
            (Self::En, MergeStatus::Other(_)) => "Unknown merge status",
        }
    }

    /// Formats an ISO-8601 timestamp in UTC.
    ///
    /// Unparseable values are returned verbatim; missing ones become `-`.
    #[must_use]
    pub fn format_timestamp(self, raw: Option<&str>) -> String {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return "-".to_string();
        };

        let pattern = match self {
            Self::PtBr => "%d/%m/%Y %H:%M UTC",
            Self::En => "%Y-%m-%d %H:%M UTC",
        };

        match DateTime::parse_from_rfc3339(raw) {
            Ok(timestamp) => timestamp.with_timezone(&Utc).format(pattern).to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_names() {
        assert_eq!("pt-br".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("PT_BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::PtBr);
        assert_eq!(Locale::En.to_string(), "en");
    }

    #[test]
    fn every_locale_has_every_template() {
        for locale in [Locale::PtBr, Locale::En] {
            for name in TEMPLATE_NAMES {
                assert!(locale.template_source(name).is_some(), "{locale}/{name}");
            }
        }
    }

    #[test]
    fn formats_timestamps_in_utc() {
        assert_eq!(
            Locale::PtBr.format_timestamp(Some("2024-03-01T10:05:00-03:00")),
            "01/03/2024 13:05 UTC"
        );
        assert_eq!(
            Locale::En.format_timestamp(Some("2024-03-01T10:05:00.1234567Z")),
            "2024-03-01 10:05 UTC"
        );
    }

    #[test]
    fn keeps_unparseable_timestamps() {
        assert_eq!(
            Locale::En.format_timestamp(Some("yesterday")),
            "yesterday"
        );
        assert_eq!(Locale::En.format_timestamp(None), "-");
        assert_eq!(Locale::En.format_timestamp(Some("  ")), "-");
    }

    #[test]
    fn labels_rejected_votes() {
        assert_eq!(Locale::PtBr.vote_label(VoteStatus::Rejected), "Rejeitado");
        assert_eq!(Locale::En.vote_label(VoteStatus::Rejected), "Rejected");
    }

    #[test]
    fn labels_pull_request_status() {
        assert_eq!(
            Locale::PtBr.status_label(&PullRequestStatus::Completed),
            "Concluído"
        );
        assert_eq!(
            Locale::En.status_label(&PullRequestStatus::Abandoned),
            "Abandoned"
        );
        assert_eq!(
            Locale::En.status_label(&PullRequestStatus::Other("draft".to_string())),
            "draft"
        );
    }
}
