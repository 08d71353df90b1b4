//! Upstream forwarding for the claims lookup edge server.
//!
//! Issues the single buffered GET a proxied request turns into and hands
//! back the status, content type and body to relay.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod client;
pub mod error;
pub mod upstream;

pub use client::HttpUpstream;
pub use error::ProxyError;
pub use upstream::{Upstream, UpstreamResponse, FALLBACK_CONTENT_TYPE};
