//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use edge_proxy::ProxyError;

/// Body returned when no upstream base is configured.
pub const NOT_CONFIGURED_BODY: &str = "API_BASE not configured on server";

/// Body returned for any upstream transport failure.
pub const BAD_GATEWAY_BODY: &str = "Bad gateway";

/// Errors that can occur while handling a proxied request.
///
/// Both variants answer `502 Bad Gateway` with a plain-text body. The
/// underlying cause is logged by the handler and never sent to the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The server was started without an upstream base.
    #[error("upstream base not configured")]
    UpstreamNotConfigured,

    /// The upstream could not be reached or did not answer.
    #[error("upstream error: {0}")]
    Upstream(#[from] ProxyError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = match &self {
            GatewayError::UpstreamNotConfigured => NOT_CONFIGURED_BODY,
            GatewayError::Upstream(_) => BAD_GATEWAY_BODY,
        };
        (StatusCode::BAD_GATEWAY, body).into_response()
    }
}
