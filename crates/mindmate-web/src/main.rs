//! MindMate API server
//!
//! Run with: cargo run -p mindmate-web --bin mindmate

use std::sync::Arc;

use mindmate_config::Config;
use mindmate_triage::{Catalog, HfInferenceGateway};
use mindmate_web::{router::build_router, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    info!("Starting MindMate API server...");

    let config = Config::load()?;
    let catalog = Catalog::load(&config.data.dir);

    let gateway = HfInferenceGateway::from_config(&config.classifier)?;
    info!(
        model = %gateway.model,
        endpoint = %gateway.endpoint,
        authenticated = gateway.has_credentials(),
        "Classifier gateway ready"
    );

    let state = AppState::new(catalog, Arc::new(gateway));
    let app = build_router(state, config.server.body_limit_bytes);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌿 MindMate backend running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
