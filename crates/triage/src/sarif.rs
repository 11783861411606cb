//! SARIF extraction: one in-memory walk over the document, with path and
//! bytes adapters on top.
//!
//! Extraction never partially recovers a malformed document. Either the
//! whole document yields an ordered finding list, or it fails with
//! [`TriageError::Parse`].

use std::path::Path;

use serde_json::Value;

use crate::error::TriageError;
use crate::models::{truncate_chars, RawFinding};

/// Default cap on message and snippet length taken from a SARIF result.
pub const SNIPPET_MAX_CHARS: usize = 240;

/// Reads a SARIF file and extracts its findings in document order.
pub fn findings_from_path(
    path: impl AsRef<Path>,
    max_chars: usize,
) -> Result<Vec<RawFinding>, TriageError> {
    let bytes = std::fs::read(path)?;
    findings_from_bytes(&bytes, max_chars)
}

/// Extracts findings from raw SARIF bytes, parsing entirely in memory.
pub fn findings_from_bytes(bytes: &[u8], max_chars: usize) -> Result<Vec<RawFinding>, TriageError> {
    let document: Value =
        serde_json::from_slice(bytes).map_err(|e| TriageError::Parse(e.to_string()))?;
    extract_findings(&document, max_chars)
}

/// Walks a parsed SARIF document: runs in document order, results within a
/// run in document order, one [`RawFinding`] per result.
pub fn extract_findings(document: &Value, max_chars: usize) -> Result<Vec<RawFinding>, TriageError> {
    let runs = document
        .get("runs")
        .and_then(Value::as_array)
        .ok_or_else(|| TriageError::Parse("document has no top-level `runs` array".into()))?;

    let mut findings = Vec::new();
    for run in runs {
        let results = run.get("results").and_then(Value::as_array);
        for result in results.into_iter().flatten() {
            findings.push(extract_one(result, max_chars));
        }
    }
    Ok(findings)
}

fn extract_one(result: &Value, max_chars: usize) -> RawFinding {
    let rule_id = result
        .get("ruleId")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    let message = result
        .pointer("/message/text")
        .and_then(Value::as_str)
        .map(|text| truncate_chars(text, max_chars))
        .unwrap_or_default();

    // Only the first physical location counts; a result without one gets a
    // synthesized empty location so all defaults apply.
    let location = result.pointer("/locations/0/physicalLocation");

    let file = location
        .and_then(|loc| loc.pointer("/artifactLocation/uri"))
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN_FILE")
        .to_string();

    let region = location.and_then(|loc| loc.get("region"));

    let start_line = region
        .and_then(|r| r.get("startLine"))
        .and_then(Value::as_u64)
        .filter(|&line| line > 0)
        .unwrap_or(1);

    // Snippet stays absent (not empty) when the region carries no text.
    let code_snippet = region
        .and_then(|r| r.pointer("/snippet/text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(|text| truncate_chars(text, max_chars));

    RawFinding {
        rule_id,
        message,
        file,
        start_line,
        code_snippet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(doc: Value) -> Vec<RawFinding> {
        extract_findings(&doc, SNIPPET_MAX_CHARS).unwrap()
    }

    #[test]
    fn extracts_fully_populated_result() {
        let doc = json!({
            "runs": [{
                "tool": { "driver": { "rules": [{ "id": "TEST001" }] } },
                "results": [{
                    "ruleId": "TEST001",
                    "message": { "text": "Hardcoded secret" },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": { "uri": "src/app.py" },
                            "region": {
                                "startLine": 10,
                                "snippet": { "text": "KEY = \"abc\"" }
                            }
                        }
                    }]
                }]
            }]
        });

        let findings = extract(doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0],
            RawFinding {
                rule_id: "TEST001".into(),
                message: "Hardcoded secret".into(),
                file: "src/app.py".into(),
                start_line: 10,
                code_snippet: Some("KEY = \"abc\"".into()),
            }
        );
    }

    #[test]
    fn zero_results_yield_empty_list() {
        let findings = extract(json!({ "runs": [{ "results": [] }] }));
        assert!(findings.is_empty());
    }

    #[test]
    fn missing_rule_id_defaults_to_unknown() {
        let doc = json!({ "runs": [{ "results": [{ "message": { "text": "x" } }] }] });
        assert_eq!(extract(doc)[0].rule_id, "unknown");
    }

    #[test]
    fn missing_location_synthesizes_defaults() {
        let doc = json!({ "runs": [{ "results": [{ "ruleId": "R" }] }] });
        let finding = &extract(doc)[0];
        assert_eq!(finding.file, "UNKNOWN_FILE");
        assert_eq!(finding.start_line, 1);
        assert_eq!(finding.message, "");
        assert_eq!(finding.code_snippet, None);
    }

    #[test]
    fn malformed_start_line_coerces_to_one() {
        let region = |start_line: Value| {
            json!({ "runs": [{ "results": [{
                "locations": [{ "physicalLocation": { "region": { "startLine": start_line } } }]
            }] }] })
        };

        assert_eq!(extract(region(json!("twelve")))[0].start_line, 1);
        assert_eq!(extract(region(json!(0)))[0].start_line, 1);
        assert_eq!(extract(region(json!(-4)))[0].start_line, 1);
        assert_eq!(extract(region(json!(7)))[0].start_line, 7);
    }

    #[test]
    fn empty_snippet_text_stays_absent() {
        let doc = json!({ "runs": [{ "results": [{
            "locations": [{ "physicalLocation": { "region": {
                "startLine": 2,
                "snippet": { "text": "" }
            } } }]
        }] }] });
        assert_eq!(extract(doc)[0].code_snippet, None);
    }

    #[test]
    fn message_and_snippet_are_truncated() {
        let long = "a".repeat(500);
        let doc = json!({ "runs": [{ "results": [{
            "message": { "text": long },
            "locations": [{ "physicalLocation": { "region": {
                "snippet": { "text": "b".repeat(500) }
            } } }]
        }] }] });

        let finding = &extract_findings(&doc, 240).unwrap()[0];
        assert_eq!(finding.message.chars().count(), 240);
        assert_eq!(finding.code_snippet.as_ref().unwrap().chars().count(), 240);
    }

    #[test]
    fn preserves_document_order_across_runs() {
        let doc = json!({ "runs": [
            { "results": [{ "ruleId": "A" }, { "ruleId": "B" }] },
            { "results": [{ "ruleId": "C" }] }
        ] });
        let ids: Vec<_> = extract(doc).into_iter().map(|f| f.rule_id).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn missing_runs_is_a_parse_error() {
        let err = extract_findings(&json!({ "version": "2.1.0" }), 240).unwrap_err();
        assert!(matches!(err, TriageError::Parse(_)));
    }

    #[test]
    fn invalid_json_bytes_are_a_parse_error() {
        let err = findings_from_bytes(b"not json at all", 240).unwrap_err();
        assert!(matches!(err, TriageError::Parse(_)));
    }

    #[test]
    fn bytes_and_value_entry_points_agree() {
        let doc = json!({ "runs": [{ "results": [{ "ruleId": "R1" }] }] });
        let bytes = serde_json::to_vec(&doc).unwrap();
        assert_eq!(
            findings_from_bytes(&bytes, 240).unwrap(),
            extract_findings(&doc, 240).unwrap()
        );
    }
}
