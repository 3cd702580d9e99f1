use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlideError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlideError {
    /// The panel needs a content pane and a rear pane.
    #[error("slide panel requires two child panes (content, slide), found {found}")]
    Configuration { found: usize },

    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl SlideError {
    #[must_use]
    pub fn missing_panes(found: usize) -> Self {
        Self::Configuration { found }
    }

    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error came from pane composition rather than tuning values.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
