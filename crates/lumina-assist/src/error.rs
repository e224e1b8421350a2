//! Error types for reasoning-service calls

/// Errors from a reasoning service
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("Service not configured: {message}")]
    NotConfigured { message: String },

    #[error("Rate limited: retry after {retry_after_seconds:?} seconds")]
    RateLimited { retry_after_seconds: Option<u32> },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Empty response from service")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

/// Result type for reasoning-service calls
pub type AssistResult<T> = Result<T, AssistError>;
