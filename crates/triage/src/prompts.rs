//! Fixed prompt text for the classification service.

/// System instruction describing the expected output contract: a JSON
/// object with an `items` list matching the
/// [`ClassificationResult`](crate::models::ClassificationResult) shape.
pub const SYSTEM_PROMPT: &str = "You are a security triage assistant. \
For each finding, return JSON list 'items' where each item has: \
rule_id, file, start_line, owasp_category, cwe_id, severity (low|medium|high|critical), \
exploitability (1-5), remediation_steps (list), developer_comment, evidence_snippet.";
