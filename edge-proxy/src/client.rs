//! HTTP upstream backed by hyper's pooled client.
//!
//! Both `http://` and `https://` upstreams are reachable. TLS server
//! certificates are verified against the bundled webpki roots.

use std::time::Duration;

use async_trait::async_trait;
use edge_core::UpstreamBase;
use http_body_util::{BodyExt, Empty};
use hyper::{
    body::Bytes,
    header::{HeaderValue, ACCEPT},
    Method, Request, Uri,
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::{ProxyError, Upstream, UpstreamResponse};

/// Forwards requests to a real upstream over HTTP/1.1, with or without TLS.
#[derive(Clone)]
pub struct HttpUpstream {
    client: Client<HttpsConnector<HttpConnector>, Empty<Bytes>>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for HttpUpstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUpstream").field("timeout", &self.timeout).finish_non_exhaustive()
    }
}

impl Default for HttpUpstream {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpUpstream {
    /// Create an upstream with no deadline beyond the client defaults.
    #[must_use]
    pub fn new() -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        Self {
            client: Client::builder(TokioExecutor::new()).build(connector),
            timeout: None,
        }
    }

    /// Create an upstream that abandons calls after `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout: Some(timeout), ..Self::new() }
    }

    async fn send(&self, target: &str, uri: Uri, accept: &HeaderValue) -> Result<UpstreamResponse, ProxyError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(ACCEPT, accept.clone())
            .body(Empty::<Bytes>::new())
            .map_err(|e| ProxyError::InvalidTarget { target: target.to_owned(), reason: e.to_string() })?;

        let resp = self
            .client
            .request(req)
            .await
            .map_err(|e| ProxyError::Transport { target: target.to_owned(), reason: e.to_string() })?;

        let (parts, body) = resp.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| ProxyError::Body { target: target.to_owned(), reason: e.to_string() })?
            .to_bytes();

        Ok(UpstreamResponse::from_head(parts.status, &parts.headers, body))
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(
        &self,
        base: &UpstreamBase,
        path_and_query: &str,
        accept: &HeaderValue,
    ) -> Result<UpstreamResponse, ProxyError> {
        let target = base.join(path_and_query);
        let uri = target
            .parse::<Uri>()
            .map_err(|e| ProxyError::InvalidTarget {
                target: target.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(url = %target, "forwarding upstream");

        match self.timeout {
            None => self.send(&target, uri, accept).await,
            Some(limit) => tokio::time::timeout(limit, self.send(&target, uri, accept))
                .await
                .map_err(|_| ProxyError::Timeout { target: target.clone(), elapsed: limit })?,
        }
    }
}
