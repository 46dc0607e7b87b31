pub mod common;
pub mod firebase;
pub mod food_analysis;
pub mod image;
pub mod llm;
pub mod recipe;
