//! Trims and normalizes a finding batch into the compact request payload.

use serde::{Deserialize, Serialize};

use crate::models::{truncate_chars, RawFinding};

/// Cap on message and snippet length in the wire payload.
pub const FIELD_MAX_CHARS: usize = 240;

/// A finding as it goes over the wire. Unlike [`RawFinding`], the snippet is
/// always a string; the payload has no concept of "missing", so an absent
/// snippet becomes `""` here and only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFinding {
    pub rule_id: String,
    pub message: String,
    pub file: String,
    pub start_line: u64,
    pub code_snippet: String,
}

/// The user-turn payload sent to the classification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub findings: Vec<NormalizedFinding>,
}

/// Builds the request payload: at most `top_n` findings taken from the
/// front (no severity selection happens before classification), with
/// message and snippet truncated to [`FIELD_MAX_CHARS`].
pub fn build_payload(findings: &[RawFinding], top_n: usize) -> Payload {
    let findings = findings
        .iter()
        .take(top_n)
        .map(|f| NormalizedFinding {
            rule_id: f.rule_id.clone(),
            message: truncate_chars(&f.message, FIELD_MAX_CHARS),
            file: f.file.clone(),
            start_line: f.start_line,
            code_snippet: truncate_chars(f.code_snippet.as_deref().unwrap_or(""), FIELD_MAX_CHARS),
        })
        .collect();

    Payload { findings }
}
