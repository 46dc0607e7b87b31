use std::future::Future;

use crate::domain::llm::{errors::LLMError, value_objects::ChatPrompt};

/// LLM Client trait for calling multimodal chat models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Issues exactly one completion request and returns the raw message content.
    fn generate(
        &self,
        prompt: ChatPrompt,
    ) -> impl Future<Output = Result<String, LLMError>> + Send;
}
