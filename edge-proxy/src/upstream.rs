//! Upstream abstraction trait.
//!
//! Lets the gateway forward requests without knowing how the upstream is
//! reached, so handlers can be exercised against an in-process fake.

use std::sync::Arc;

use async_trait::async_trait;
use edge_core::UpstreamBase;
use hyper::{
    body::Bytes,
    header::{HeaderValue, CONTENT_TYPE},
    HeaderMap, StatusCode,
};

use crate::ProxyError;

/// Content type reported when the upstream response carries none.
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Status code exactly as returned by the upstream.
    pub status: StatusCode,
    /// The upstream `Content-Type` header, if any.
    pub content_type: Option<HeaderValue>,
    /// Raw response body.
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Build a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, content_type: Option<HeaderValue>, body: impl Into<Bytes>) -> Self {
        Self { status, content_type, body: body.into() }
    }

    /// Keep only the relayed fields of an upstream response head.
    pub(crate) fn from_head(status: StatusCode, headers: &HeaderMap, body: Bytes) -> Self {
        Self { status, content_type: headers.get(CONTENT_TYPE).cloned(), body }
    }

    /// The content type to relay, defaulting to `text/plain`.
    #[must_use]
    pub fn content_type_or_default(&self) -> HeaderValue {
        self.content_type
            .clone()
            .unwrap_or_else(|| HeaderValue::from_static(FALLBACK_CONTENT_TYPE))
    }
}

/// Something that can answer a forwarded GET request.
///
/// Implementations must be `Send + Sync` to be shared across request tasks.
///
/// # Cancel Safety
/// Dropping the future abandons the upstream call; no state is left behind.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Issue `GET {base}{path_and_query}` with the given `Accept` header and
    /// buffer the whole response.
    ///
    /// # Errors
    /// Returns a [`ProxyError`] for any transport-level failure. Non-2xx
    /// upstream statuses are returned as `Ok`.
    async fn fetch(
        &self,
        base: &UpstreamBase,
        path_and_query: &str,
        accept: &HeaderValue,
    ) -> Result<UpstreamResponse, ProxyError>;
}

#[async_trait]
impl<T: Upstream + ?Sized> Upstream for Arc<T> {
    async fn fetch(
        &self,
        base: &UpstreamBase,
        path_and_query: &str,
        accept: &HeaderValue,
    ) -> Result<UpstreamResponse, ProxyError> {
        (**self).fetch(base, path_and_query, accept).await
    }
}
