//! Error taxonomy for EduWaka API operations.
//!
//! Every networked operation returns a uniform `Result` instead of panicking
//! past its boundary. Callers render the message and decide whether to retry;
//! nothing here is fatal to the process. The worst outcome of any failure
//! path is remaining in (or reverting to) the anonymous state.

use thiserror::Error;

/// Failure modes of library operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Local pre-flight validation failed; no network call was issued.
    #[error("{0}")]
    Validation(String),

    /// The collaborator rejected the request (4xx/5xx). Carries the first
    /// structured field error when present, else the `detail` message,
    /// else an operation-specific fallback. Never retried automatically.
    #[error("{0}")]
    Rejected(String),

    /// Network or protocol failure talking to the collaborator.
    #[error("request failed: {0}. Please try again.")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response carried an access token whose payload could not be
    /// decoded. Treated as equivalent to no session.
    #[error("failed to decode user information from token")]
    TokenDecode,

    /// The local credentials file could not be read, written, or removed.
    #[error("credential storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;
