// ABOUTME: FitGPT server binary - wires logging, config, the orchestrator and the HTTP router
// ABOUTME: Starts degraded (generation returns 503) when OPENAI_API_KEY is absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGPT

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use fitgpt_core::config::ServerConfig;
use fitgpt_core::generation::GenerationOrchestrator;
use fitgpt_core::logging::LoggingConfig;
use fitgpt_core::routes::{router, AppState};
use fitgpt_core::store::{MemoryUserStore, MemoryWorkoutStore};

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;

    let config = ServerConfig::from_env();
    let orchestrator = GenerationOrchestrator::from_env();
    if !orchestrator.is_configured() {
        warn!("OPENAI_API_KEY not set; workout generation will return 503 until configured");
    }

    let state = AppState::new(
        orchestrator,
        Arc::new(MemoryUserStore::with_demo_account()),
        Arc::new(MemoryWorkoutStore::new()),
    );
    let app = router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        return;
    }
    info!("shutdown signal received");
}
