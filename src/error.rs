use thiserror::Error;

/// Error type shared by the era engine, the tag pipeline and the API clients.
#[derive(Debug, Error)]
pub enum EraError {
    /// Invalid clustering or pipeline configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The batch was cut short by its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    /// Last.fm kept answering with its rate limit code after all retries.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Last.fm rejected the configured API key.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Any other error reported in an API response body.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    /// K-means could not partition the observations.
    #[error("Clustering failed: {0}")]
    Clustering(String),

    /// The tag store could not be read or written.
    #[error("Tag store error: {0}")]
    Store(String),

    /// A tag worker stopped before reporting its results.
    #[error("Tag worker failed: {0}")]
    Worker(String),

    /// A required environment variable is not set.
    #[error("{0} must be set")]
    MissingEnv(String),
}

impl EraError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EraError::Cancelled)
    }
}
