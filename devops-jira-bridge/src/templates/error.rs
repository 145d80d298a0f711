//! Entry rendering error types.

/// Errors raised while registering or rendering comment templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Template registration error.
    #[error("Template registration error in '{locale}': {source}")]
    RegistrationError {
        locale: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },
}
