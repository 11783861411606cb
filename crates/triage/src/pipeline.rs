//! End-to-end triage: extract, trim, classify, render.

use serde_json::{json, Value};
use tracing::info;

use crate::config::TriageConfig;
use crate::error::TriageError;
use crate::llm::TriageClient;
use crate::models::RawFinding;
use crate::payload::build_payload;
use crate::report::{self, NO_FINDINGS_REPORT};
use crate::sarif::{self, SNIPPET_MAX_CHARS};

/// Combined output of one triage run.
#[derive(Debug, Clone)]
pub struct TriageOutput {
    /// The raw classification result, written verbatim as the JSON artifact.
    pub result: Value,
    /// The rendered markdown summary.
    pub markdown: String,
}

/// Runs the pipeline over raw SARIF bytes, parsing entirely in memory.
pub async fn triage_bytes(
    client: &TriageClient,
    config: &TriageConfig,
    bytes: &[u8],
) -> Result<TriageOutput, TriageError> {
    let findings = sarif::findings_from_bytes(bytes, SNIPPET_MAX_CHARS)?;
    triage_findings(client, config, findings).await
}

/// Classifies an already-extracted finding list and renders the report.
///
/// An empty list never reaches the classification service; it yields the
/// fixed no-findings result immediately.
pub async fn triage_findings(
    client: &TriageClient,
    config: &TriageConfig,
    findings: Vec<RawFinding>,
) -> Result<TriageOutput, TriageError> {
    if findings.is_empty() {
        info!("no findings extracted; skipping classification");
        return Ok(TriageOutput {
            result: json!({ "items": [] }),
            markdown: NO_FINDINGS_REPORT.to_string(),
        });
    }

    info!(count = findings.len(), top_n = config.top_n, "classifying findings");

    let payload = build_payload(&findings, config.top_n);
    let result = client.classify_and_remediate(&payload).await?;
    let markdown = report::to_markdown(&result);

    Ok(TriageOutput { result, markdown })
}
