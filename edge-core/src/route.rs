//! Allow-list of request paths that are forwarded to the upstream API.
//!
//! Everything outside the allow-list is served locally (static assets or
//! the application shell).

use std::fmt;

/// Prefix of the claims routes.
pub const CLAIMS_PREFIX: &str = "/reclamos";

/// Prefix of the catalog routes.
pub const CATALOGS_PREFIX: &str = "/catalogos";

/// An allow-list entry that a request path matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProxyRoute {
    /// `/reclamos`, `/reclamos/` or `/reclamos/<rest>`.
    Claims,
    /// `/catalogos/` or `/catalogos/<rest>`. Bare `/catalogos` is not proxied.
    Catalogs,
}

impl ProxyRoute {
    /// Classify a request path (without query string). Prefixes match
    /// ASCII case-insensitively, so `/Reclamos/1` is proxied.
    ///
    /// Returns `None` for paths that must not be forwarded, including
    /// lookalikes such as `/reclamosx`.
    #[must_use]
    pub fn classify(path: &str) -> Option<Self> {
        if let Some(rest) = strip_prefix_ignore_case(path, CLAIMS_PREFIX) {
            if rest.is_empty() || rest.starts_with('/') {
                return Some(Self::Claims);
            }
        }
        if let Some(rest) = strip_prefix_ignore_case(path, CATALOGS_PREFIX) {
            if rest.starts_with('/') {
                return Some(Self::Catalogs);
            }
        }
        None
    }

    /// Classify a full request target (`/path?query`), ignoring the query.
    #[must_use]
    pub fn classify_target(path_and_query: &str) -> Option<Self> {
        let path = path_and_query
            .split_once('?')
            .map_or(path_and_query, |(path, _)| path);
        Self::classify(path)
    }

    /// Short label used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claims => "claims",
            Self::Catalogs => "catalogs",
        }
    }
}

fn strip_prefix_ignore_case<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let head = path.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &path[prefix.len()..])
}

impl fmt::Display for ProxyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
