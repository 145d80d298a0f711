//! Comment entry rendering using Handlebars.
//!
//! Each pull request event becomes one text entry. Templates ship with the
//! crate, one set per [`Locale`]; the locale is fixed when the renderer is
//! created.

mod error;
mod locale;
mod renderer;

pub use error::TemplateError;
pub use locale::{Locale, LocaleError};
pub use renderer::{create_handlebars_registry, TemplateRenderer};

/// Prefix of the line that records a commit hash in an entry.
///
/// Shared by every locale so recorded commits can be found regardless of
/// the language the thread was written in.
pub const COMMIT_LINE_PREFIX: &str = "Commit: ";

/// Prefix of the line that records a pull request status in an entry.
pub const STATUS_LINE_PREFIX: &str = "Status: ";

/// Opening of every entry whose last line records a commit, in every locale.
///
/// Only these entries are trusted when looking for the last recorded commit;
/// comment entries carry user text and are never read back.
pub const COMMIT_ENTRY_HEADINGS: [&str; 6] = [
    "**Pull Request Criado**",
    "**Pull Request Atualizado**",
    "**Voto de ",
    "**Pull Request Created**",
    "**Pull Request Updated**",
    "**Vote from ",
];

/// Opening of every entry that may record a pull request status.
pub const STATUS_ENTRY_HEADINGS: [&str; 4] = [
    "**Pull Request Atualizado**",
    "**Status do Pull Request Alterado**",
    "**Pull Request Updated**",
    "**Pull Request Status Changed**",
];
