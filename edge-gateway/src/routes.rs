//! Axum route handlers for the edge server.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        header::{ACCEPT, ALLOW, CONTENT_TYPE},
        uri::PathAndQuery,
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use edge_core::{EdgeConfig, ProxyRoute};
use edge_proxy::{Upstream, UpstreamResponse};
use serde::Serialize;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use crate::{error::GatewayError, state::AppState};

/// `Accept` value forwarded when the caller sent none.
pub const DEFAULT_ACCEPT: &str = "application/json";

// ── Response types ────────────────────────────────────────────────────────────

/// Body of `GET /config`.
#[derive(Debug, Serialize)]
pub struct RuntimeConfig {
    #[serde(rename = "API_BASE")]
    pub api_base: String,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router from the startup configuration.
pub fn create_router(config: &EdgeConfig, upstream: Arc<dyn Upstream>) -> Router {
    router_with_state(AppState::new(config, upstream))
}

/// Build the application router around prepared state.
pub fn router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/config", get(runtime_config))
        .fallback(dispatch)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /config` — the upstream base the client should know about.
pub async fn runtime_config(State(state): State<AppState>) -> Json<RuntimeConfig> {
    Json(RuntimeConfig { api_base: state.config.api_base_str().to_owned() })
}

/// Everything except `/config`: allow-listed paths are proxied, the rest
/// is served from the build directory with the shell as fallback.
pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let Some(route) = ProxyRoute::classify(req.uri().path()) else {
        return serve_asset(state, req).await;
    };

    if req.method() != Method::GET && req.method() != Method::HEAD {
        return (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET,HEAD")]).into_response();
    }

    let target = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path(), PathAndQuery::as_str)
        .to_owned();

    match forward(&state, &target, req.headers()).await {
        Ok(resp) => {
            tracing::debug!(path = %target, route = %route, status = %resp.status(), "proxied");
            resp
        }
        Err(e) => {
            tracing::error!(path = %target, route = %route, error = %e, "proxy error");
            e.into_response()
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Forward one allow-listed request and relay the upstream answer.
///
/// # Errors
/// Returns [`GatewayError::UpstreamNotConfigured`] without touching the
/// network when no base is set, or [`GatewayError::Upstream`] on any
/// transport failure.
async fn forward(state: &AppState, target: &str, headers: &HeaderMap) -> Result<Response, GatewayError> {
    let base = state.config.api_base.as_ref().ok_or(GatewayError::UpstreamNotConfigured)?;
    let accept = forwarded_accept(headers);

    let upstream = state.upstream.fetch(base, target, &accept).await?;
    Ok(relay(upstream))
}

/// The caller's `Accept` values, repeated headers joined with `", "`.
fn forwarded_accept(headers: &HeaderMap) -> HeaderValue {
    let values: Vec<&[u8]> = headers.get_all(ACCEPT).iter().map(HeaderValue::as_bytes).collect();
    if values.is_empty() {
        return HeaderValue::from_static(DEFAULT_ACCEPT);
    }
    HeaderValue::from_bytes(&values.join(&b", "[..]))
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_ACCEPT))
}

/// Mirror status and content type; every other upstream header is dropped.
fn relay(upstream: UpstreamResponse) -> Response {
    let content_type = upstream.content_type_or_default();
    let mut resp = Response::new(Body::from(upstream.body));
    *resp.status_mut() = upstream.status;
    resp.headers_mut().insert(CONTENT_TYPE, content_type);
    resp
}

async fn serve_asset(state: AppState, req: Request) -> Response {
    match state.assets.oneshot(req).await {
        Ok(resp) => resp.into_response(),
        Err(never) => match never {},
    }
}
