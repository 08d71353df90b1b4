/// Errors produced by the `edge-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// An environment variable was set to a value that cannot be parsed.
    #[error("invalid value for {var}: '{value}' ({reason})")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// An upstream base URL was empty.
    #[error("upstream base must not be empty")]
    EmptyUpstreamBase,
}
