use thiserror::Error;

/// Failure taxonomy for the triage pipeline.
///
/// Configuration and parse errors abort before any request is sent. Of the
/// classification failures, only quota exhaustion is fatal on first sight;
/// the client consults [`TriageError::is_retryable`] for everything else
/// before scheduling another attempt.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid SARIF document: {0}")]
    Parse(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("classification response had no usable content")]
    EmptyResponse,

    #[error("malformed classification response: {0}")]
    MalformedResponse(String),

    #[error("API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("classification failed after {0} attempts")]
    RetriesExhausted(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TriageError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::EmptyResponse | Self::MalformedResponse(_)
        )
    }
}
