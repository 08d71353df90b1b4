//! Integration test: forwarding to a live HTTP upstream.
//!
//! Starts a throwaway axum server on an ephemeral loopback port and checks
//! that `HttpUpstream` relays status, content type and body unchanged.
//! `https://` bases are checked to open a TLS handshake.

use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use edge_core::UpstreamBase;
use edge_proxy::{HttpUpstream, ProxyError, Upstream};
use hyper::header::HeaderValue;

async fn tipos_reclamo() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"a":1}"#)
}

/// Echoes the received path, query and `Accept` header.
async fn echo(headers: HeaderMap, req: Request) -> impl IntoResponse {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("<none>")
        .to_owned();
    let target = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_owned(), |pq| pq.as_str().to_owned());
    format!("{} {target} accept={accept}", req.method())
}

async fn missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "application/json")], r#"{"detail":"no"}"#)
}

async fn bare() -> impl IntoResponse {
    let mut resp = (StatusCode::CREATED, "raw").into_response();
    resp.headers_mut().remove(header::CONTENT_TYPE);
    resp
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "late"
}

async fn spawn_upstream() -> UpstreamBase {
    let app = Router::new()
        .route("/catalogos/tipos-reclamo", get(tipos_reclamo))
        .route("/reclamos/", get(echo))
        .route("/reclamos/missing", get(missing))
        .route("/reclamos/bare", get(bare))
        .route("/reclamos/slow", get(slow));

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(l) => l,
        Err(e) => panic!("failed to bind upstream: {e}"),
    };
    let addr = match listener.local_addr() {
        Ok(a) => a,
        Err(e) => panic!("no local addr: {e}"),
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    match UpstreamBase::new(format!("http://{addr}")) {
        Ok(b) => b,
        Err(e) => panic!("invalid base: {e}"),
    }
}

fn json_accept() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

#[tokio::test]
async fn relays_status_content_type_and_body() {
    let base = spawn_upstream().await;
    let resp = HttpUpstream::new()
        .fetch(&base, "/catalogos/tipos-reclamo", &json_accept())
        .await
        .unwrap_or_else(|e| panic!("fetch failed: {e}"));

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.content_type_or_default(), "application/json");
    assert_eq!(&resp.body[..], br#"{"a":1}"#);
}

#[tokio::test]
async fn forwards_get_with_exact_path_query_and_accept() {
    let base = spawn_upstream().await;
    let accept = HeaderValue::from_static("text/csv");
    let resp = HttpUpstream::new()
        .fetch(&base, "/reclamos/?dni=12345678&page=2", &accept)
        .await
        .unwrap_or_else(|e| panic!("fetch failed: {e}"));

    let body = String::from_utf8_lossy(&resp.body);
    assert_eq!(body, "GET /reclamos/?dni=12345678&page=2 accept=text/csv");
}

#[tokio::test]
async fn non_success_status_is_relayed_not_an_error() {
    let base = spawn_upstream().await;
    let resp = HttpUpstream::new()
        .fetch(&base, "/reclamos/missing", &json_accept())
        .await
        .unwrap_or_else(|e| panic!("fetch failed: {e}"));

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(&resp.body[..], br#"{"detail":"no"}"#);
}

#[tokio::test]
async fn missing_content_type_is_reported_as_none() {
    let base = spawn_upstream().await;
    let resp = HttpUpstream::new()
        .fetch(&base, "/reclamos/bare", &json_accept())
        .await
        .unwrap_or_else(|e| panic!("fetch failed: {e}"));

    assert_eq!(resp.status, StatusCode::CREATED);
    assert!(resp.content_type.is_none());
    assert_eq!(resp.content_type_or_default(), "text/plain");
}

#[tokio::test]
async fn slow_upstream_hits_configured_timeout() {
    let base = spawn_upstream().await;
    let err = match HttpUpstream::with_timeout(Duration::from_millis(100))
        .fetch(&base, "/reclamos/slow", &json_accept())
        .await
    {
        Ok(r) => panic!("expected timeout, got {r:?}"),
        Err(e) => e,
    };
    assert!(matches!(err, ProxyError::Timeout { .. }), "expected Timeout, got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // Bind then drop to obtain a loopback port with nothing listening.
    let port = match std::net::TcpListener::bind("127.0.0.1:0").and_then(|l| l.local_addr()) {
        Ok(a) => a.port(),
        Err(e) => panic!("failed to reserve port: {e}"),
    };
    let base = match UpstreamBase::new(format!("http://127.0.0.1:{port}")) {
        Ok(b) => b,
        Err(e) => panic!("invalid base: {e}"),
    };

    let err = match HttpUpstream::new().fetch(&base, "/reclamos", &json_accept()).await {
        Ok(r) => panic!("expected error, got {r:?}"),
        Err(e) => e,
    };
    assert!(matches!(err, ProxyError::Transport { .. }), "expected Transport, got {err:?}");
}

#[tokio::test]
async fn https_upstream_is_reached_over_tls() {
    use tokio::io::AsyncReadExt;

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(l) => l,
        Err(e) => panic!("failed to bind: {e}"),
    };
    let addr = match listener.local_addr() {
        Ok(a) => a,
        Err(e) => panic!("no local addr: {e}"),
    };

    // Capture the first bytes the client sends, then hang up.
    let first_bytes = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await?;
        let mut buf = [0u8; 5];
        stream.read_exact(&mut buf).await?;
        Ok::<_, std::io::Error>(buf)
    });

    let base = match UpstreamBase::new(format!("https://{addr}")) {
        Ok(b) => b,
        Err(e) => panic!("invalid base: {e}"),
    };
    let result = HttpUpstream::with_timeout(Duration::from_secs(5))
        .fetch(&base, "/catalogos/tipos-reclamo", &json_accept())
        .await;
    assert!(result.is_err(), "a hung-up TLS peer cannot produce a response");

    let record = match first_bytes.await {
        Ok(Ok(buf)) => buf,
        Ok(Err(e)) => panic!("upstream read failed: {e}"),
        Err(e) => panic!("upstream task failed: {e}"),
    };
    // TLS record header: handshake content type, protocol major version 3.
    assert_eq!(record[0], 0x16, "expected a TLS handshake record, got {record:?}");
    assert_eq!(record[1], 0x03, "expected TLS record version 3.x, got {record:?}");
}
