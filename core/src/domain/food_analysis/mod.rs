pub mod entities;
pub mod pipeline;
pub mod ports;
pub mod prompt;
pub mod services;

pub use entities::*;
pub use pipeline::*;
pub use ports::*;
