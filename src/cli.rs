//! Command-line overrides for the environment-derived server config.

use std::path::PathBuf;

use clap::Parser;

use crate::server::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "agri-assistant", version, about = "Crop, yield, fertilizer and rain prediction API")]
pub struct Cli {
    /// Address to bind (env: API_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (env: API_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding model and encoder artifacts (env: MODELS_DIR)
    #[arg(long)]
    pub models_dir: Option<PathBuf>,

    /// Directory containing index.html (env: STATIC_DIR)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl Cli {
    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(models_dir) = self.models_dir {
            config.models_dir = models_dir;
        }
        if self.static_dir.is_some() {
            config.static_dir = self.static_dir;
        }
        config
    }
}
