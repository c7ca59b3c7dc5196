//! HTTP surface: one POST endpoint per prediction task plus service metadata.

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ApiError;
pub use handlers::{CropRecommendation, FertilizerRecommendation, WeatherForecast, YieldPrediction};
pub use state::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::inference::Registry;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub models_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            models_dir: std::env::var("MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models")),
            static_dir: std::env::var("STATIC_DIR").ok().map(PathBuf::from),
        }
    }
}

impl ServerConfig {
    /// Places the landing page is looked for, in order.
    pub fn landing_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(ref static_dir) = self.static_dir {
            candidates.push(static_dir.join("index.html"));
        }
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join("index.html"));
        }
        candidates.push(PathBuf::from("index.html"));
        candidates
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server gracefully");
}

/// Serve the registry until ctrl-c.
pub async fn run_server(config: ServerConfig, registry: Registry) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let available: Vec<&str> = registry.available().into_iter().map(|t| t.name()).collect();

    let state = Arc::new(AppState::new(config, registry));
    let app = create_router(state);

    info!(address = %addr, models = ?available, "Agri Assistant API starting");
    axum::Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
