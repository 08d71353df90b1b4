//! Startup configuration resolved from the process environment.
//!
//! Values are read once when the server starts. There is no hot reload.

use std::{
    fmt,
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    time::Duration,
};

use serde::Serialize;

use crate::CoreError;

/// Upstream used when neither `API_BASE` nor `REACT_APP_API_BASE` is set.
pub const DEFAULT_API_BASE: &str = "http://13.222.79.184:8001";

/// Listen port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Directory holding the built client when `STATIC_DIR` is unset.
pub const DEFAULT_STATIC_DIR: &str = "build";

/// Environment variables consulted for the upstream base, in priority order.
pub const API_BASE_VARS: [&str; 2] = ["API_BASE", "REACT_APP_API_BASE"];

/// Root URL of the backend API that proxied requests are forwarded to.
///
/// Stored verbatim so `/config` reports exactly what the operator set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UpstreamBase(String);

impl UpstreamBase {
    /// Wrap a base URL.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyUpstreamBase`] if `base` is empty or blank.
    pub fn new(base: impl Into<String>) -> Result<Self, CoreError> {
        let base = base.into();
        if base.trim().is_empty() {
            return Err(CoreError::EmptyUpstreamBase);
        }
        Ok(Self(base))
    }

    /// The base exactly as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append an original request target (`/path?query`) to the base.
    ///
    /// A single trailing slash on the base is dropped so the joined URL
    /// never contains `//` at the seam.
    #[must_use]
    pub fn join(&self, path_and_query: &str) -> String {
        let base = self.0.strip_suffix('/').unwrap_or(&self.0);
        format!("{base}{path_and_query}")
    }
}

impl fmt::Display for UpstreamBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Edge server configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct EdgeConfig {
    /// Address to bind.
    pub host: IpAddr,

    /// Port to listen on.
    pub port: u16,

    /// Upstream base URL. `None` disables proxying (every proxied route
    /// answers 502).
    pub api_base: Option<UpstreamBase>,

    /// Directory containing the built client and its `index.html`.
    pub static_dir: PathBuf,

    /// Optional deadline for a single upstream call.
    pub upstream_timeout: Option<Duration>,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            api_base: Some(UpstreamBase(DEFAULT_API_BASE.to_owned())),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            upstream_timeout: None,
        }
    }
}

impl EdgeConfig {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidEnv`] if `PORT`, `HOST` or
    /// `UPSTREAM_TIMEOUT_MS` is set to an unparsable value.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset, so an empty `API_BASE` falls
    /// through to `REACT_APP_API_BASE` and then to [`DEFAULT_API_BASE`].
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidEnv`] on unparsable numeric or address values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = var("PORT") {
            config.port = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                CoreError::InvalidEnv { var: "PORT", value: raw.clone(), reason: e.to_string() }
            })?;
        }

        if let Some(raw) = var("HOST") {
            config.host = raw.trim().parse().map_err(|e: std::net::AddrParseError| {
                CoreError::InvalidEnv { var: "HOST", value: raw.clone(), reason: e.to_string() }
            })?;
        }

        if let Some(base) = API_BASE_VARS.iter().find_map(|&key| var(key)) {
            config.api_base = Some(UpstreamBase(base));
        }

        if let Some(dir) = var("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(raw) = var("UPSTREAM_TIMEOUT_MS") {
            let ms: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                CoreError::InvalidEnv {
                    var: "UPSTREAM_TIMEOUT_MS",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
            config.upstream_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }

        Ok(config)
    }

    /// The value reported by `/config`: the upstream base, or `""` when unset.
    #[must_use]
    pub fn api_base_str(&self) -> &str {
        self.api_base.as_ref().map_or("", UpstreamBase::as_str)
    }

    /// Path of the application shell document.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}
