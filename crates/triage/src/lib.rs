//! GHAS Triage - SARIF triage pipeline
//!
//! Ingests SARIF static-analysis exports, normalizes the results into a
//! strict internal schema, sends them to an LLM classification service for
//! severity/category/remediation triage, and renders the outcome as a JSON
//! artifact plus a markdown summary.
//!
//! The pipeline is single-pass and synchronous: raw bytes become an ordered
//! [`RawFinding`] list, the payload builder trims and truncates for the
//! wire, the classification client sends one request with local retry, and
//! the renderer produces the report. The fingerprint module is a standalone
//! dedup primitive kept off the critical path.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod llm;
pub mod models;
pub mod payload;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod sarif;

pub use config::TriageConfig;
pub use error::TriageError;
pub use llm::{CompletionProvider, OpenAiProvider, TriageClient};
pub use models::{BatchResult, ClassificationResult, RawFinding, Severity};
pub use payload::{build_payload, NormalizedFinding, Payload};
pub use pipeline::{triage_bytes, triage_findings, TriageOutput};
pub use report::to_markdown;
pub use sarif::{findings_from_bytes, findings_from_path};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
