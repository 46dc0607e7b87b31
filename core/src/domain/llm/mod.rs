pub mod errors;
pub mod ports;
pub mod value_objects;

pub use errors::LLMError;
pub use ports::LLMClient;
#[cfg(test)]
pub use ports::MockLLMClient;
pub use value_objects::{ChatPrompt, ResponseFormat};
