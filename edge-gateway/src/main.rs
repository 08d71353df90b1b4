//! Entry point for the `edge-gateway` HTTP server.

use std::{net::SocketAddr, sync::Arc};

use edge_core::EdgeConfig;
use edge_gateway::routes::create_router;
use edge_proxy::{HttpUpstream, Upstream};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match EdgeConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if !config.index_path().is_file() {
        warn!(path = %config.index_path().display(), "application shell not found");
    }

    let upstream: Arc<dyn Upstream> = Arc::new(match config.upstream_timeout {
        Some(limit) => HttpUpstream::with_timeout(limit),
        None => HttpUpstream::new(),
    });
    let app = create_router(&config, upstream);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, api_base = %config.api_base_str(), "edge-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
