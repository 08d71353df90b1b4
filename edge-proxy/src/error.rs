//! Error types for the proxy crate.

use std::time::Duration;

/// Errors that can occur while forwarding a request upstream.
///
/// Every variant is a transport-level failure; an upstream answering with a
/// non-2xx status is not an error and is relayed as-is.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProxyError {
    /// The joined upstream URL could not be parsed as a URI.
    #[error("invalid upstream target {target}: {reason}")]
    InvalidTarget { target: String, reason: String },

    /// Connecting to or exchanging the request with the upstream failed.
    #[error("upstream request to {target} failed: {reason}")]
    Transport { target: String, reason: String },

    /// The upstream did not answer within the configured deadline.
    #[error("upstream request to {target} timed out after {elapsed:?}")]
    Timeout { target: String, elapsed: Duration },

    /// The response body could not be read to completion.
    #[error("reading upstream body from {target} failed: {reason}")]
    Body { target: String, reason: String },
}
