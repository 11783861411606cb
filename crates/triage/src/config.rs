//! Environment-sourced configuration.
//!
//! All lookups happen once per invocation; the resulting [`TriageConfig`]
//! is immutable and passed explicitly into the payload builder and the
//! classification client.

use crate::error::TriageError;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOP_N: usize = 50;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct TriageConfig {
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    pub top_n: usize,
    pub base_url: String,
}

impl TriageConfig {
    /// Reads configuration from the process environment. Fails before any
    /// request is attempted when the API credential is missing.
    pub fn from_env() -> Result<Self, TriageError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an injectable lookup, so tests never have
    /// to mutate process-wide environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TriageError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| TriageError::Configuration("OPENAI_API_KEY is not set".into()))?;

        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = lookup("OPENAI_TIMEOUT_SEC")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let top_n = lookup("TRIAGE_TOP_N")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOP_N);

        let base_url = lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            timeout_secs,
            top_n,
            base_url,
        })
    }
}
