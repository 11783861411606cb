//! Sticky PR comment upsert, shelling out to the gh CLI.
//!
//! The report body is prefixed with a hidden marker; when a comment with
//! that marker already exists on the PR it is patched in place, otherwise a
//! new comment is created. A failed patch is not fatal: the report still
//! lands on the PR as a fresh comment.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{debug, warn};

const STICKY_MARKER: &str = "<!-- ghas-triage-sticky -->";

#[derive(Args)]
pub struct CommentArgs {
    /// Path to the markdown report to post.
    pub md_path: PathBuf,

    /// PR number; falls back to PR_NUMBER, then the newest open PR.
    #[arg(long)]
    pub pr: Option<String>,
}

/// Thin seam over the gh binary so the upsert flow can run without it.
trait GhCli {
    /// Runs gh and returns trimmed stdout, or None on any failure.
    fn output(&self, args: &[&str]) -> Option<String>;

    /// Runs gh for its side effect, failing on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<()>;
}

struct SystemGh;

impl GhCli for SystemGh {
    fn output(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("gh").args(args).output().ok()?;
        if output.status.success() {
            String::from_utf8(output.stdout)
                .ok()
                .map(|s| s.trim().to_string())
        } else {
            None
        }
    }

    fn run(&self, args: &[&str]) -> Result<()> {
        let status = Command::new("gh")
            .args(args)
            .status()
            .context("failed to run gh")?;
        if !status.success() {
            bail!("gh exited with {status}");
        }
        Ok(())
    }
}

enum UpsertAction {
    Updated(String),
    Created,
}

pub fn execute(args: CommentArgs) -> Result<()> {
    let report = std::fs::read_to_string(&args.md_path)
        .with_context(|| format!("failed to read {}", args.md_path.display()))?;
    let body = format!("{STICKY_MARKER}\n\n{report}");

    let gh = SystemGh;
    let pr_number = resolve_pr_number(&gh, args.pr)?;

    match upsert_comment(&gh, &pr_number, &body)? {
        UpsertAction::Updated(comment_id) => println!("Updated sticky comment {comment_id}"),
        UpsertAction::Created => println!("Created sticky comment."),
    }
    Ok(())
}

fn upsert_comment(gh: &dyn GhCli, pr_number: &str, body: &str) -> Result<UpsertAction> {
    if let Some(comment_id) = find_sticky_comment(gh, pr_number) {
        match patch_comment(gh, &comment_id, body) {
            Ok(()) => return Ok(UpsertAction::Updated(comment_id)),
            // A stale comment id or missing repo context must not drop the
            // report; fall through to creating a fresh comment.
            Err(err) => warn!(%err, "failed to patch sticky comment; creating a new one"),
        }
    }

    gh.run(&["pr", "comment", pr_number, "--body", body])?;
    Ok(UpsertAction::Created)
}

fn resolve_pr_number(gh: &dyn GhCli, flag: Option<String>) -> Result<String> {
    if let Some(pr) = flag {
        return Ok(pr);
    }
    if let Ok(pr) = std::env::var("PR_NUMBER") {
        return Ok(pr);
    }

    gh.output(&[
        "pr", "list", "--state", "open", "--json", "number", "--jq", ".[0].number",
    ])
    .filter(|out| !out.is_empty())
    .context("could not determine a PR number (no --pr, no PR_NUMBER, no open PR)")
}

fn find_sticky_comment(gh: &dyn GhCli, pr_number: &str) -> Option<String> {
    let comment_id = gh.output(&[
        "pr", "comments", pr_number, "--search", STICKY_MARKER, "--json", "id", "--jq", ".[0].id",
    ])?;

    if comment_id.is_empty() {
        None
    } else {
        debug!(comment_id, "found existing sticky comment");
        Some(comment_id)
    }
}

fn patch_comment(gh: &dyn GhCli, comment_id: &str, body: &str) -> Result<()> {
    let repository =
        std::env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY is not set")?;

    gh.run(&[
        "api",
        &format!("repos/{repository}/issues/comments/{comment_id}"),
        "-X",
        "PATCH",
        "-f",
        &format!("body={body}"),
    ])
}
