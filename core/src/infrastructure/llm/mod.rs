pub mod openai_client;

pub use openai_client::OpenAILLMClient;
