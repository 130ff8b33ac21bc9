use thiserror::Error;

/// Error taxonomy for the orchestration layer.
///
/// `ModelUnavailable` and `Extraction` never cross the orchestration
/// boundary: the analytics operations absorb them into fallback values, and
/// the chat operation converts `ModelUnavailable` into `ServiceUnavailable`.
/// `ServiceUnavailable` is the only model-related error a caller can observe.
#[derive(Error, Debug)]
pub enum SolaceError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote completion call failed (network, auth, rate limit,
    /// timeout, malformed envelope). Carries the failure kind, never the
    /// request or response content.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model replied, but no structured payload matching the required
    /// shape could be recovered.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("AI service temporarily unavailable. Please try again.")]
    ServiceUnavailable,
}

pub type Result<T> = std::result::Result<T, SolaceError>;
