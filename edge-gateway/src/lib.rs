//! HTTP edge server for the claims lookup client.
//!
//! Serves the built single-page application, reports the upstream base on
//! `/config`, and forwards the `/reclamos` and `/catalogos` GET routes to
//! the upstream API so the browser never calls it cross-origin.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod routes;
pub mod state;
