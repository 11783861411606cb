//! HTTP front-end: accepts a SARIF upload and returns the combined
//! classification result and markdown report.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use ghas_triage::config::TriageConfig;
use ghas_triage::llm::{OpenAiProvider, TriageClient};
use ghas_triage::pipeline::triage_bytes;
use ghas_triage::TriageError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    info!("Starting GHAS Triage server");

    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/triage", post(triage))
        .layer(CorsLayer::permissive());

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Triage API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": ghas_triage::VERSION }))
}

/// Accepts raw SARIF bytes and returns `{"triage": ..., "markdown": ...}`.
///
/// Configuration is read once per request and stays immutable for that
/// invocation, so concurrent uploads never share mutable state.
async fn triage(body: Bytes) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let config = TriageConfig::from_env().map_err(error_response)?;
    let provider = Arc::new(OpenAiProvider::new(&config).map_err(error_response)?);
    let client = TriageClient::new(provider);

    let output = triage_bytes(&client, &config, &body)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({
        "triage": output.result,
        "markdown": output.markdown,
    })))
}

fn error_response(err: TriageError) -> (StatusCode, String) {
    let status = match &err {
        TriageError::Parse(_) => StatusCode::BAD_REQUEST,
        TriageError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        TriageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    };
    error!(%err, "triage request failed");
    (status, err.to_string())
}
