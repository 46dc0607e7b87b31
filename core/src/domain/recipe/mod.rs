pub mod entities;
pub mod fallback;
pub mod ports;
pub mod prompt;
pub mod services;

pub use entities::*;
pub use ports::*;
