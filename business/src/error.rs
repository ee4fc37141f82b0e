use thiserror::Error;

/// Failures of the dashboard data layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BusinessError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The response envelope did not carry `success: true`.
    #[error("not found: {0}")]
    NotFound(String),
}

pub type BusinessResult<T> = Result<T, BusinessError>;
