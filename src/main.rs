use clap::Parser; // for cli
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod error;
mod generator;
mod handlers;
mod metrics;
mod models;
mod prompt;
mod state;

use config::Args;
use controller::GenerationController;
use generator::{GeminiClient, TextGenerator};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments
    let args = Args::parse();

    let gemini = GeminiClient::new(
        reqwest::Client::new(),
        &args.api_url,
        &args.model,
        &args.api_key,
    );
    info!(endpoint = %gemini.endpoint(), "generation endpoint configured");
    let generator: Arc<dyn TextGenerator> = Arc::new(gemini);

    // one independent controller per feature
    let features = [prompt::slogan(), prompt::ad_copy()];
    let mut controllers = Vec::with_capacity(features.len());
    for feature in features {
        feature.check()?;
        info!(feature = %feature.name, fields = feature.fields.len(), "generator ready");
        controllers.push(GenerationController::new(feature, Arc::clone(&generator)));
    }
    let state = Arc::new(AppState::new(controllers));

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Copy generator running on http://localhost:{}", args.port);
    if args.api_key.is_empty() {
        tracing::warn!("no API key configured, requests go out unauthenticated");
    }
    axum::serve(listener, app).await?;
    Ok(())
}
