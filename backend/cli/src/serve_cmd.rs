//! `attam serve`

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use attam_gateway::{copy_dependencies, start_server, AppState};
use tracing::{info, warn};

pub async fn run(config_path: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let path = config_path.unwrap_or_else(attam_config::config_file_path);
    let mut config = attam_config::load_and_prepare(&path).await?;
    if let Some(port) = port {
        config.server.port = port;
    }

    logging::init_logger(&config.logging.dir, &config.logging.level);
    // Loading ran before the subscriber existed; repeat its warnings.
    for warning in attam_config::validate(&config).warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    info!(
        config = %path.display(),
        env = %config.env,
        domains = config.domains.len(),
        admins = config.auth.admins.len(),
        "Starting Attam"
    );

    copy_dependencies(&config.paths.dependencies_dir, &config.paths.static_dir).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.server.bind))?;
    let state = AppState::new(config)?;
    start_server(addr, state).await
}
