use thiserror::Error;

/// Errors from the stats REST client.
#[derive(Error, Debug)]
pub enum StatsError {
    /// Transport-level failure (connection, timeout, TLS) or a body that
    /// failed to decode.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("server returned {code} for {url}")]
    Status { code: u16, url: String },

    /// The owning view was torn down while a fetch was pending.
    #[error("fetch cancelled")]
    Cancelled,
}

impl StatsError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Server-side (5xx) and transport failures are transient; client
    /// errors (4xx) indicate the request itself is wrong, and a
    /// cancelled fetch must not be retried at all.
    pub fn is_transient(&self) -> bool {
        match self {
            StatsError::Http(_) => true,
            StatsError::Status { code, .. } => (500..=599).contains(code),
            StatsError::Cancelled => false,
        }
    }
}
