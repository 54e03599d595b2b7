use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadGenError {
    /// Credentials or configuration for a source are missing; the call was never attempted.
    #[error("{0}")]
    SourceUnavailable(String),

    #[error("{source_name} failed: {message}")]
    SourceFailed { source_name: String, message: String },

    /// No source in the selected retrieval mode produced any leads.
    #[error("{0}")]
    NoLeads(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} is disabled")]
    FeatureDisabled(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl LeadGenError {
    pub fn source_failed(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        LeadGenError::SourceFailed {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }
}
