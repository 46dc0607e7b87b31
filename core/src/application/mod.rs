use tracing::{info, warn};

use crate::{
    domain::common::{WsieConfig, services::Service},
    infrastructure::{firestore::FirestoreDocumentStore, llm::OpenAILLMClient},
};

pub type WsieService = Service<OpenAILLMClient, FirestoreDocumentStore>;

/// Resolves every optional collaborator once. A client that cannot be built
/// leaves its feature disabled for the lifetime of the process.
pub async fn create_service(config: WsieConfig) -> WsieService {
    let llm_client = match OpenAILLMClient::from_config(&config.llm) {
        Ok(client) => client,
        Err(e) => {
            warn!("OpenAI client initialisation failed, LLM features disabled: {}", e);
            None
        }
    };

    match &llm_client {
        Some(_) => info!(
            model = %config.llm.model,
            report_model = %config.llm.report_model,
            "LLM enabled"
        ),
        None => info!("No OpenAI API key configured, serving fallback responses"),
    }

    let document_store = match FirestoreDocumentStore::from_config(&config.firebase).await {
        Ok(Some(store)) => {
            info!(project_id = %store.project_id(), "Firestore document store configured");
            Some(store)
        }
        Ok(None) => {
            info!("Firestore not configured, firebase ping disabled");
            None
        }
        Err(e) => {
            warn!("Firestore initialisation failed, firebase ping disabled: {}", e);
            None
        }
    };

    Service::new(
        llm_client,
        document_store,
        config.llm.report_model,
        config.image,
    )
}
