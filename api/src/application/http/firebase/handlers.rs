pub mod ping_firestore;
