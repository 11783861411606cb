//! Retry/backoff orchestration around a [`CompletionProvider`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TriageError;
use crate::payload::Payload;
use crate::prompts::SYSTEM_PROMPT;

use super::envelope;
use super::provider::CompletionProvider;

/// Seconds slept after each failed attempt. Its length is the attempt
/// budget: three attempts, 7 s cumulative worst-case added latency.
pub const BACKOFF_SCHEDULE: [u64; 3] = [1, 2, 4];

/// Marker the service puts in failure descriptions when the caller's usage
/// quota is gone. The failure surface is string-described, so the
/// fatal/retryable split is a substring check; update the marker here
/// without touching the retry loop.
const QUOTA_MARKER: &str = "insufficient_quota";

fn is_quota_exhausted(description: &str) -> bool {
    description.to_lowercase().contains(QUOTA_MARKER)
}

/// Classification client: one request per invocation, retried locally on
/// the fixed backoff schedule. No state is shared across invocations; the
/// caller controls batch size through the payload builder.
pub struct TriageClient {
    provider: Arc<dyn CompletionProvider>,
}

impl TriageClient {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Sends the payload for classification and returns the parsed result
    /// object.
    ///
    /// Transient failures (network, timeout, empty or malformed response)
    /// retry after 1 s, 2 s, and 4 s; once the schedule is exhausted the
    /// call fails with [`TriageError::RetriesExhausted`]. Quota exhaustion
    /// aborts immediately with no retry.
    pub async fn classify_and_remediate(&self, payload: &Payload) -> Result<Value, TriageError> {
        let user_payload = serde_json::to_value(payload)
            .map_err(|e| TriageError::Request(format!("failed to encode payload: {e}")))?;

        for (attempt, backoff_secs) in BACKOFF_SCHEDULE.iter().enumerate() {
            match self.attempt(&user_payload).await {
                Ok(result) => {
                    debug!(attempt = attempt + 1, "classification succeeded");
                    return Ok(result);
                }
                Err(err) => {
                    warn!(attempt = attempt + 1, error = %err, "classification attempt failed");

                    if is_quota_exhausted(&err.to_string()) {
                        return Err(TriageError::QuotaExhausted(err.to_string()));
                    }
                    if !err.is_retryable() {
                        return Err(err);
                    }

                    tokio::time::sleep(Duration::from_secs(*backoff_secs)).await;
                }
            }
        }

        Err(TriageError::RetriesExhausted(BACKOFF_SCHEDULE.len()))
    }

    async fn attempt(&self, user_payload: &Value) -> Result<Value, TriageError> {
        let raw = self.provider.complete(SYSTEM_PROMPT, user_payload).await?;
        envelope::extract_result(&raw)
    }
}
