//! Core types for the claims lookup edge server.
//!
//! Holds the startup configuration and the allow-list that decides which
//! request paths are forwarded to the upstream claims API.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod route;

pub use config::{EdgeConfig, UpstreamBase, DEFAULT_API_BASE, DEFAULT_PORT};
pub use error::CoreError;
pub use route::ProxyRoute;
