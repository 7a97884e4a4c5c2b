//! Error types for vibe analysis.

use thiserror::Error;

/// Errors that can occur while obtaining an analysis for an image.
#[derive(Debug, Error)]
pub enum VisionError {
    /// No API key was configured for the vision provider.
    #[error("no API key configured; set openai_api_key in the config file or OPENAI_API_KEY")]
    MissingApiKey,

    /// The image reference could not be used.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The provider answered with a non-success status.
    #[error("HTTP {status} from vision provider: {message}")]
    Http { status: u16, message: String },

    /// The provider returned a rate-limit response.
    #[error("rate limited by vision provider")]
    RateLimited,

    /// The provider's response could not be parsed.
    #[error("parse error from vision provider: {0}")]
    Parse(String),

    /// The provider answered without any analysis text.
    #[error("vision provider returned no analysis text")]
    EmptyResponse,

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Reading a local image failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VisionError {
    /// Returns `true` when the error is transient and the request may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Convenience alias for analysis results.
pub type VisionResult<T> = std::result::Result<T, VisionError>;
