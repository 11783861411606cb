//! Stable fingerprint computation for findings.
//!
//! The fingerprint defines the cache key for a future deduplication layer.
//! Nothing consumes it on the critical path yet, so the field composition
//! below is the contract to preserve.

use sha2::{Digest, Sha256};

use crate::models::{truncate_chars, RawFinding};

/// Leading message characters that participate in the digest.
pub const MESSAGE_PREFIX_CHARS: usize = 120;

/// Computes a stable fingerprint for a finding.
///
/// SHA-256 hex digest of `rule_id|file|start_line|message[:120]`. Findings
/// that agree on those four fields share a fingerprint regardless of any
/// other field, on any platform, on any run.
pub fn fingerprint(finding: &RawFinding) -> String {
    let base = format!(
        "{}|{}|{}|{}",
        finding.rule_id,
        finding.file,
        finding.start_line,
        truncate_chars(&finding.message, MESSAGE_PREFIX_CHARS)
    );
    hex::encode(Sha256::digest(base.as_bytes()))
}
