use thiserror::Error;

use crate::domain::llm::errors::LLMError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Image file is empty")]
    EmptyImage,

    #[error("Image too large: {size} bytes (max {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Image dimensions too large: {width}x{height} (max {max_pixels} pixels)")]
    ImageDimensionsTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    #[error("Ingredient description is empty")]
    EmptyDescription,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Service not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<LLMError> for CoreError {
    fn from(error: LLMError) -> Self {
        CoreError::ExternalServiceError(error.to_string())
    }
}
