use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An extracted, unvalidated SARIF result.
///
/// `start_line` is always positive; absent or malformed input coerces to 1
/// during extraction. `code_snippet` stays `None` when the region carries no
/// snippet text; the payload builder flattens that to an empty string for
/// the wire, but the distinction matters for truncation before then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFinding {
    pub rule_id: String,
    pub message: String,
    pub file: String,
    pub start_line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort rank for reports: critical first, low (and anything
    /// unrecognized) last.
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Case-insensitive label parse. Unrecognized labels map to [`Severity::Low`]
    /// so they sort at the lowest priority.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Per-finding judgment returned by the classification service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub rule_id: String,
    pub file: String,
    pub start_line: u64,
    pub owasp_category: String,
    pub cwe_id: String,
    pub severity: Severity,
    #[serde(deserialize_with = "clamped_exploitability")]
    pub exploitability: u8,
    pub remediation_steps: Vec<String>,
    pub developer_comment: String,
    pub evidence_snippet: String,
}

// Exploitability stays within 1..=5 whatever the service sends back.
fn clamped_exploitability<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(1, 5) as u8)
}

/// Ordered results for one classified batch. The service may omit findings
/// it cannot classify, so the item count can be below the input count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub items: Vec<ClassificationResult>,
}

/// Character-based truncation; SARIF text fields may be non-ASCII, so byte
/// slicing is not safe here.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
