use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::instrument;

use crate::{
    domain::{
        common::{FirebaseConfig, entities::app_errors::CoreError},
        firebase::ports::DocumentStore,
    },
    infrastructure::firestore::{
        auth::{ServiceAccount, TokenProvider},
        values::{from_firestore_fields, to_firestore_fields},
    },
};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const FIRESTORE_TIMEOUT: Duration = Duration::from_secs(10);
const EMULATOR_TOKEN: &str = "owner";
const EMULATOR_PROJECT_ID: &str = "demo-wsie";

#[derive(Clone)]
enum Credentials {
    ServiceAccount(Arc<TokenProvider>),
    Static(String),
}

/// Firestore REST v1 adapter for [`DocumentStore`]
#[derive(Clone)]
pub struct FirestoreDocumentStore {
    base_url: String,
    project_id: String,
    client: Client,
    credentials: Credentials,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    fields: Map<String, Value>,
}

fn http_client() -> Result<Client, CoreError> {
    Client::builder()
        .timeout(FIRESTORE_TIMEOUT)
        .build()
        .map_err(|e| CoreError::InvalidConfiguration(format!("Firestore client: {}", e)))
}

impl FirestoreDocumentStore {
    pub fn with_service_account(account: ServiceAccount) -> Result<Self, CoreError> {
        let client = http_client()?;
        let project_id = account.project_id.clone();
        let tokens = TokenProvider::new(account, client.clone())?;

        Ok(Self {
            base_url: FIRESTORE_BASE_URL.to_string(),
            project_id,
            client,
            credentials: Credentials::ServiceAccount(Arc::new(tokens)),
        })
    }

    pub fn with_emulator(host: &str, project_id: String) -> Result<Self, CoreError> {
        let host = host.trim_end_matches('/');
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/v1", host)
        } else {
            format!("http://{}/v1", host)
        };

        Ok(Self {
            base_url,
            project_id,
            client: http_client()?,
            credentials: Credentials::Static(EMULATOR_TOKEN.to_string()),
        })
    }

    /// Returns `None` when neither an emulator nor a service account is configured.
    pub async fn from_config(config: &FirebaseConfig) -> Result<Option<Self>, CoreError> {
        if let Some(host) = config.emulator_host.as_deref() {
            let project_id = config
                .project_id
                .clone()
                .unwrap_or_else(|| EMULATOR_PROJECT_ID.to_string());
            return Self::with_emulator(host, project_id).map(Some);
        }

        let Some(path) = config.service_account_path.as_deref() else {
            return Ok(None);
        };

        let mut account = ServiceAccount::from_file(path).await?;
        if let Some(project_id) = &config.project_id {
            account.project_id = project_id.clone();
        }

        Self::with_service_account(account).map(Some)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn document_url(&self, collection: &str, document: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}/{}",
            self.base_url, self.project_id, collection, document
        )
    }

    async fn bearer_token(&self) -> Result<String, CoreError> {
        match &self.credentials {
            Credentials::ServiceAccount(tokens) => tokens.access_token().await,
            Credentials::Static(token) => Ok(token.clone()),
        }
    }
}

fn request_error(e: reqwest::Error) -> CoreError {
    tracing::error!("Firestore request failed: {}", e);
    CoreError::ExternalServiceError(format!("Firestore error: {}", e))
}

async fn status_error(response: reqwest::Response) -> CoreError {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    tracing::error!("Firestore API error: {} - {}", status, error_text);
    CoreError::ExternalServiceError(format!(
        "Firestore returned error: {} - {}",
        status, error_text
    ))
}

impl DocumentStore for FirestoreDocumentStore {
    #[instrument(skip(self, data))]
    async fn set(
        &self,
        collection: &str,
        document: &str,
        data: Map<String, Value>,
    ) -> Result<(), CoreError> {
        let token = self.bearer_token().await?;
        let body = json!({ "fields": to_firestore_fields(&data) });

        let response = self
            .client
            .patch(self.document_url(collection, document))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(
        &self,
        collection: &str,
        document: &str,
    ) -> Result<Option<Map<String, Value>>, CoreError> {
        let token = self.bearer_token().await?;

        let response = self
            .client
            .get(self.document_url(collection, document))
            .bearer_auth(token)
            .send()
            .await
            .map_err(request_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let document: Document = response.json().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("Failed to parse Firestore document: {}", e))
        })?;

        from_firestore_fields(&document.fields).map(Some)
    }
}
