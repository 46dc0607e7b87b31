use thiserror::Error;

/// Failure modes of a single remote completion call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LLMError {
    #[error("LLM rejected the credentials")]
    Unauthorized,

    #[error("LLM quota or rate limit exhausted")]
    RateLimited,

    #[error("LLM request timed out")]
    Timeout,

    #[error("LLM request failed: {0}")]
    Network(String),

    #[error("LLM API returned error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("No response from LLM")]
    EmptyResponse,

    #[error("Failed to parse LLM response: {0}")]
    Decode(String),
}
