use std::future::Future;

use serde_json::{Map, Value};

use crate::domain::common::entities::app_errors::CoreError;

/// Document store access, keyed by collection and document id
#[cfg_attr(test, mockall::automock)]
pub trait DocumentStore: Send + Sync {
    /// Replaces the document's fields.
    fn set(
        &self,
        collection: &str,
        document: &str,
        fields: Map<String, Value>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get(
        &self,
        collection: &str,
        document: &str,
    ) -> impl Future<Output = Result<Option<Map<String, Value>>, CoreError>> + Send;
}

/// Service trait for the document store round-trip check
pub trait FirebaseService: Send + Sync {
    fn ping(&self) -> impl Future<Output = Result<Value, CoreError>> + Send;
}
