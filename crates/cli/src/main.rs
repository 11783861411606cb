use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
use commands::{comment::CommentArgs, sarif::SarifArgs};

#[derive(Parser)]
#[command(name = "ghas-triage")]
#[command(about = "Triage GHAS SARIF findings with LLM-backed classification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a SARIF file, classify its findings, and write the artifacts.
    Sarif(SarifArgs),

    /// Upsert the triage report as a sticky PR comment via the gh CLI.
    Comment(CommentArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sarif(args) => commands::sarif::execute(args).await,
        Commands::Comment(args) => commands::comment::execute(args),
    }
}
