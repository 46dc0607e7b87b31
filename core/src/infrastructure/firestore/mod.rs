pub mod auth;
pub mod client;
pub mod values;

pub use auth::ServiceAccount;
pub use client::FirestoreDocumentStore;
