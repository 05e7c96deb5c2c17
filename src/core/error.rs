use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Invalid field path '{0}'")]
    InvalidFieldPath(String),

    #[error("Invalid criterion '{name}': {reason}")]
    InvalidCriterion { name: String, reason: String },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid page window: {0}")]
    InvalidPage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Raised by `RecordSource` implementations when a backend fetch fails.
    #[error("Record source error: {0}")]
    Source(String),

    #[error("No evaluator found for comparison: {0}")]
    UnsupportedComparison(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ViewError>;

impl ViewError {
    pub fn invalid_criterion(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCriterion {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
