//! Shared per-router state.

use std::sync::Arc;

use edge_core::EdgeConfig;
use edge_proxy::Upstream;
use tower_http::services::{ServeDir, ServeFile};

/// Static-asset service: files under the build directory, falling back to
/// the application shell with status 200.
pub type Assets = ServeDir<ServeFile>;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration; an unset upstream base makes every proxied
    /// route answer 502.
    pub config: Arc<EdgeConfig>,
    /// Where proxied requests are sent.
    pub upstream: Arc<dyn Upstream>,
    /// Built client assets.
    pub assets: Assets,
}

impl AppState {
    /// Assemble state from the startup configuration.
    #[must_use]
    pub fn new(config: &EdgeConfig, upstream: Arc<dyn Upstream>) -> Self {
        let assets = ServeDir::new(&config.static_dir).fallback(ServeFile::new(config.index_path()));
        Self { config: Arc::new(config.clone()), upstream, assets }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").field("config", &self.config).finish_non_exhaustive()
    }
}
