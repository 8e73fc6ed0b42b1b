//! Serve command: run the HTTP relay service.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::llm::build_provider;
use crate::pipeline::{ContentPipeline, PipelineOptions};
use crate::server::{cors_layer, router, AppState};
use std::sync::Arc;
use tracing::info;

/// Run the HTTP relay service.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check_api_key(settings.llm.provider) {
        Output::info("Run 'tubeseo doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let provider = build_provider(&settings.llm)?;
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let pipeline = ContentPipeline::new(provider)
        .with_prompts(prompts)
        .with_options(PipelineOptions::from_settings(&settings));

    let state = Arc::new(AppState::new(pipeline));
    let app = router(state, cors_layer(&settings)?);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, provider = %settings.llm.provider, model = settings.llm.model(), "Relay listening");

    Output::header("tubeseo Relay Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Provider", &format!("{} ({})", settings.llm.provider, settings.llm.model()));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Clean", "POST /api/clean-transcript");
    Output::kv("Generate", "POST /api/generate-content");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Output::info("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
