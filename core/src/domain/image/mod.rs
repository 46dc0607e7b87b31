pub mod services;
pub mod value_objects;

pub use services::validate_image;
pub use value_objects::{UploadedImage, ValidatedImage};
