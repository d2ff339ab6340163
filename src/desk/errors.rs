use thiserror::Error;

/// Errors raised while building a responder: loading the user directory, parsing
/// response templates, or validating configured rules.
///
/// Answering a query never fails; an unknown user id is reported through the
/// policy's not-found text instead.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Wrapper around IO errors (reading seed or config files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A user seed file could not be read.
    #[error("failed to read user seed file {path}: {source}")]
    Seed {
        path: String,
        source: std::io::Error,
    },

    /// Wrapper around JSON errors from user seed files.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A response template could not be parsed.
    #[error("invalid template {template:?}: {reason}")]
    Template { template: String, reason: String },

    /// A configured rule is unusable (empty keyword, duplicate name).
    #[error("invalid rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl DeskError {
    pub(crate) fn template(template: &str, reason: impl Into<String>) -> Self {
        DeskError::Template {
            template: template.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_rule(rule: &str, reason: impl Into<String>) -> Self {
        DeskError::InvalidRule {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}
