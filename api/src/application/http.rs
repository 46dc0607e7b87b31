pub mod firebase;
pub mod food_analysis;
pub mod health;
pub mod multipart;
pub mod recipes;
pub mod server;
