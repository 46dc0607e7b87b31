pub mod firestore;
pub mod llm;
