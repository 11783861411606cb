//! Markdown rendering of a classification result.
//!
//! The renderer works on the raw result object rather than the typed
//! [`BatchResult`](crate::models::BatchResult): the service may nest items
//! differently or send labels outside the contract, and the report must
//! still come out.

use serde_json::Value;

use crate::models::Severity;

/// Rows rendered in the summary table; the full result lives in the JSON
/// artifact.
pub const MAX_REPORT_ROWS: usize = 20;

/// Report emitted when the result carries no items at all.
pub const NO_FINDINGS_REPORT: &str = "### GHAS Triage\n\nNo findings.";

const TRAILER: &str = "_Full triage details are available in the artifact (triage.json)._";

/// Renders a severity-ordered markdown summary.
///
/// Items are looked up under `items`, then `triage.items`; the first
/// non-empty list wins, so an empty top-level `items` falls through to the
/// nested one. Sorting is stable: equal-severity items keep their input
/// order.
pub fn to_markdown(result: &Value) -> String {
    let items = [result.get("items"), result.pointer("/triage/items")]
        .into_iter()
        .flatten()
        .filter_map(Value::as_array)
        .find(|items| !items.is_empty());

    let items = match items {
        Some(items) => items,
        None => return NO_FINDINGS_REPORT.to_string(),
    };

    let mut sorted: Vec<&Value> = items.iter().collect();
    sorted.sort_by_key(|item| severity_rank(item));

    let mut lines = vec![
        "### GHAS Triage Summary".to_string(),
        String::new(),
        "| Severity | Rule | Location | Note |".to_string(),
        "|---|---|---|---|".to_string(),
    ];

    for item in sorted.iter().take(MAX_REPORT_ROWS) {
        let severity = title_case(item.get("severity").and_then(Value::as_str).unwrap_or("?"));
        let rule = item.get("rule_id").and_then(Value::as_str).unwrap_or("?");
        let file = item.get("file").and_then(Value::as_str).unwrap_or("?");
        let line = match item.get("start_line") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => "?".to_string(),
        };
        // Literal pipes would break the table's column delimiter.
        let note = item
            .get("developer_comment")
            .and_then(Value::as_str)
            .unwrap_or("")
            .replace('|', "/");

        lines.push(format!("| {severity} | {rule} | {file}:{line} | {note} |"));
    }

    lines.push(String::new());
    lines.push(TRAILER.to_string());
    lines.join("\n")
}

fn severity_rank(item: &Value) -> u8 {
    item.get("severity")
        .and_then(Value::as_str)
        .map(Severity::from_label)
        .unwrap_or(Severity::Low)
        .rank()
}

// Capitalizes every word, not just the first: off-contract labels like
// "very high" render as "Very High".
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut at_word_start = true;
    for c in label.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(rule: &str, severity: &str) -> Value {
        json!({
            "rule_id": rule,
            "file": "src/app.py",
            "start_line": 10,
            "severity": severity,
            "developer_comment": format!("note for {rule}")
        })
    }

    #[test]
    fn no_items_produces_fixed_report() {
        assert_eq!(to_markdown(&json!({})), NO_FINDINGS_REPORT);
        assert_eq!(to_markdown(&json!({ "items": [] })), NO_FINDINGS_REPORT);
        assert_eq!(
            to_markdown(&json!({ "triage": { "items": [] } })),
            NO_FINDINGS_REPORT
        );
    }

    #[test]
    fn items_nested_under_triage_are_found() {
        let report = to_markdown(&json!({ "triage": { "items": [item("R1", "high")] } }));
        assert!(report.contains("| High | R1 | src/app.py:10 |"));
    }

    #[test]
    fn empty_top_level_items_fall_through_to_nested() {
        let result = json!({
            "items": [],
            "triage": { "items": [item("NESTED", "high")] }
        });
        let report = to_markdown(&result);
        assert!(report.contains("| High | NESTED | src/app.py:10 |"));
    }

    #[test]
    fn top_level_items_win_over_nested() {
        let result = json!({
            "items": [item("TOP", "low")],
            "triage": { "items": [item("NESTED", "critical")] }
        });
        let report = to_markdown(&result);
        assert!(report.contains("TOP"));
        assert!(!report.contains("NESTED"));
    }

    #[test]
    fn rows_are_sorted_by_severity_rank() {
        let result = json!({ "items": [
            item("L", "low"),
            item("C", "critical"),
            item("M", "medium"),
            item("H", "high"),
        ] });
        let report = to_markdown(&result);

        let pos = |rule: &str| report.find(&format!("| {rule} |")).unwrap();
        assert!(pos("C") < pos("H"));
        assert!(pos("H") < pos("M"));
        assert!(pos("M") < pos("L"));
    }

    #[test]
    fn equal_severity_keeps_input_order() {
        let result = json!({ "items": [
            item("FIRST", "high"),
            item("SECOND", "high"),
            item("THIRD", "high"),
        ] });
        let report = to_markdown(&result);

        let pos = |rule: &str| report.find(rule).unwrap();
        assert!(pos("FIRST") < pos("SECOND"));
        assert!(pos("SECOND") < pos("THIRD"));
    }

    #[test]
    fn rendering_sorted_input_matches_reversed_input() {
        let items: Vec<Value> = [
            ("C1", "critical"),
            ("H1", "high"),
            ("M1", "medium"),
            ("L1", "low"),
        ]
        .iter()
        .map(|(r, s)| item(r, s))
        .collect();

        let forward = to_markdown(&json!({ "items": items }));
        let reversed: Vec<Value> = items_reversed(&items);
        let backward = to_markdown(&json!({ "items": reversed }));
        assert_eq!(forward, backward);
    }

    fn items_reversed(items: &[Value]) -> Vec<Value> {
        items.iter().rev().cloned().collect()
    }

    #[test]
    fn caps_at_twenty_highest_ranked_rows() {
        let mut items: Vec<Value> = (0..80).map(|i| item(&format!("LOW{i}"), "low")).collect();
        items.extend((0..20).map(|i| item(&format!("CRIT{i}"), "critical")));

        let report = to_markdown(&json!({ "items": items }));
        let rows = report.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| Severity")).count();
        assert_eq!(rows, MAX_REPORT_ROWS);
        assert!(report.contains("CRIT19"));
        assert!(!report.contains("LOW0"));
    }

    #[test]
    fn unknown_severity_sorts_last_and_is_title_cased() {
        let result = json!({ "items": [
            { "rule_id": "WEIRD", "severity": "bizarre", "file": "f", "start_line": 1, "developer_comment": "" },
            item("H", "high"),
        ] });
        let report = to_markdown(&result);
        assert!(report.find("| H |").unwrap() < report.find("WEIRD").unwrap());
        assert!(report.contains("| Bizarre |"));
    }

    #[test]
    fn multiword_severity_labels_title_case_each_word() {
        let result = json!({ "items": [item("R", "very high")] });
        assert!(to_markdown(&result).contains("| Very High |"));
    }

    #[test]
    fn string_start_line_renders_verbatim() {
        let result = json!({ "items": [{
            "rule_id": "R",
            "severity": "high",
            "file": "src/app.py",
            "start_line": "10",
            "developer_comment": ""
        }] });
        assert!(to_markdown(&result).contains("| R | src/app.py:10 |"));
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let report = to_markdown(&json!({ "items": [{}] }));
        assert!(report.contains("| ? | ? | ?:? |  |"));
    }

    #[test]
    fn pipes_in_comments_are_escaped() {
        let result = json!({ "items": [{
            "rule_id": "R",
            "severity": "high",
            "file": "f",
            "start_line": 1,
            "developer_comment": "either|or|neither"
        }] });
        let report = to_markdown(&result);
        assert!(report.contains("either/or/neither"));
    }

    #[test]
    fn report_ends_with_artifact_trailer() {
        let report = to_markdown(&json!({ "items": [item("R", "low")] }));
        assert!(report.ends_with(TRAILER));
    }
}
