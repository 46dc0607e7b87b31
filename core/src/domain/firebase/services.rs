use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service, unix_timestamp_millis},
    firebase::ports::{DocumentStore, FirebaseService},
    llm::LLMClient,
};

pub const PING_COLLECTION: &str = "healthcheck";
pub const PING_DOCUMENT: &str = "ping";

impl<LLM, DS> FirebaseService for Service<LLM, DS>
where
    LLM: LLMClient,
    DS: DocumentStore,
{
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<Value, CoreError> {
        let store = self
            .document_store
            .as_ref()
            .ok_or_else(|| CoreError::NotConfigured("firebase".to_string()))?;

        let mut payload = Map::new();
        payload.insert("ok".to_string(), json!(true));
        payload.insert("ts".to_string(), json!(unix_timestamp_millis()));

        store.set(PING_COLLECTION, PING_DOCUMENT, payload).await?;

        let snapshot = store.get(PING_COLLECTION, PING_DOCUMENT).await?;
        debug!(found = snapshot.is_some(), "Read back ping document");

        Ok(snapshot.map(Value::Object).unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::test_support::{TestService, test_image_config},
        firebase::ports::MockDocumentStore,
    };

    fn service_with_store(store: Option<MockDocumentStore>) -> TestService {
        Service::new(None, store, "gpt-4o".to_string(), test_image_config())
    }

    #[tokio::test]
    async fn test_ping_round_trips_document() {
        let mut store = MockDocumentStore::new();
        store
            .expect_set()
            .withf(|collection, document, fields| {
                collection == PING_COLLECTION && document == PING_DOCUMENT && fields["ok"] == json!(true)
            })
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        store
            .expect_get()
            .withf(|collection, document| collection == PING_COLLECTION && document == PING_DOCUMENT)
            .times(1)
            .returning(|_, _| {
                let mut fields = Map::new();
                fields.insert("ok".to_string(), json!(true));
                fields.insert("ts".to_string(), json!(1_700_000_000_000_i64));
                Box::pin(async move { Ok(Some(fields)) })
            });
        let service = service_with_store(Some(store));

        let snapshot = service.ping().await.unwrap();

        assert_eq!(snapshot, json!({"ok": true, "ts": 1_700_000_000_000_i64}));
    }

    #[tokio::test]
    async fn test_ping_missing_document_is_null() {
        let mut store = MockDocumentStore::new();
        store
            .expect_set()
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        store
            .expect_get()
            .returning(|_, _| Box::pin(async { Ok(None) }));
        let service = service_with_store(Some(store));

        assert_eq!(service.ping().await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_ping_passes_store_errors_through() {
        let mut store = MockDocumentStore::new();
        store.expect_set().times(1).returning(|_, _, _| {
            Box::pin(async {
                Err(CoreError::ExternalServiceError("permission denied".to_string()))
            })
        });
        store.expect_get().times(0);
        let service = service_with_store(Some(store));

        let err = service.ping().await.unwrap_err();
        assert_eq!(
            err,
            CoreError::ExternalServiceError("permission denied".to_string())
        );
    }

    #[tokio::test]
    async fn test_ping_without_store() {
        let service = service_with_store(None);

        let err = service.ping().await.unwrap_err();
        assert!(matches!(err, CoreError::NotConfigured(_)));
    }
}
