use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use ghas_triage::config::TriageConfig;
use ghas_triage::llm::{OpenAiProvider, TriageClient};
use ghas_triage::pipeline::triage_findings;
use ghas_triage::report::NO_FINDINGS_REPORT;
use ghas_triage::sarif::{findings_from_path, SNIPPET_MAX_CHARS};

#[derive(Args)]
pub struct SarifArgs {
    /// Path to the SARIF file to triage.
    pub path: PathBuf,

    /// Where to write the raw classification result.
    #[arg(long, default_value = "triage.json")]
    pub out_json: PathBuf,

    /// Where to write the markdown summary.
    #[arg(long, default_value = "triage.md")]
    pub out_md: PathBuf,

    /// Maximum findings sent for classification (TRIAGE_TOP_N overrides).
    #[arg(long, default_value_t = 50)]
    pub top_n: usize,
}

pub async fn execute(args: SarifArgs) -> Result<()> {
    // Findings are extracted before the config is built, so a missing API
    // key never blocks the no-findings path.
    let findings = findings_from_path(&args.path, SNIPPET_MAX_CHARS)
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    if findings.is_empty() {
        println!("No findings in SARIF.");
        std::fs::write(&args.out_md, NO_FINDINGS_REPORT)
            .with_context(|| format!("failed to write {}", args.out_md.display()))?;
        return Ok(());
    }

    let mut config = TriageConfig::from_env()?;
    if std::env::var("TRIAGE_TOP_N").is_err() {
        config.top_n = args.top_n;
    }

    let provider = Arc::new(OpenAiProvider::new(&config)?);
    let client = TriageClient::new(provider);

    let output = triage_findings(&client, &config, findings).await?;

    std::fs::write(&args.out_json, serde_json::to_string_pretty(&output.result)?)
        .with_context(|| format!("failed to write {}", args.out_json.display()))?;
    std::fs::write(&args.out_md, &output.markdown)
        .with_context(|| format!("failed to write {}", args.out_md.display()))?;

    println!(
        "Wrote {} and {}",
        args.out_json.display(),
        args.out_md.display()
    );
    Ok(())
}
