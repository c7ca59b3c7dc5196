use agri_assistant::cli::Cli;
use agri_assistant::inference::Registry;
use agri_assistant::server::{run_server, ServerConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_assistant=info,tower_http=info".into()),
        )
        .init();

    let config = Cli::parse().apply(ServerConfig::default());

    // missing artifacts only disable their endpoint
    let registry = Registry::load(&config.models_dir);

    run_server(config, registry).await
}
