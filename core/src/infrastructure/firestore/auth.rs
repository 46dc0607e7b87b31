use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::common::entities::app_errors::CoreError;

const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Google service account key file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccount {
    pub async fn from_file(path: &Path) -> Result<Self, CoreError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            CoreError::InvalidConfiguration(format!(
                "cannot read service account {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            CoreError::InvalidConfiguration(format!("invalid service account JSON: {}", e))
        })
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges signed service account assertions for OAuth access tokens and
/// keeps the current one until a minute before it expires.
pub struct TokenProvider {
    account: ServiceAccount,
    encoding_key: EncodingKey,
    client: Client,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(account: ServiceAccount, client: Client) -> Result<Self, CoreError> {
        let encoding_key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| {
                CoreError::InvalidConfiguration(format!("invalid service account key: {}", e))
            })?;

        Ok(Self {
            account,
            encoding_key,
            client,
            cached: RwLock::new(None),
        })
    }

    pub async fn access_token(&self) -> Result<String, CoreError> {
        let refresh_margin = Utc::now() + Duration::seconds(60);

        if let Some(token) = self.cached.read().await.as_ref()
            && token.expires_at > refresh_margin
        {
            return Ok(token.access_token.clone());
        }

        let mut cached = self.cached.write().await;
        if let Some(token) = cached.as_ref()
            && token.expires_at > refresh_margin
        {
            return Ok(token.access_token.clone());
        }

        let token = self.fetch_token().await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, CoreError> {
        let claims = AssertionClaims {
            iss: &self.account.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.account.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Failed to sign service account assertion: {}", e);
                CoreError::ExternalServiceError(format!("Firebase auth error: {}", e))
            })
    }

    #[instrument(skip(self), fields(client_email = %self.account.client_email))]
    async fn fetch_token(&self) -> Result<CachedToken, CoreError> {
        let now = Utc::now();
        let assertion = self.sign_assertion(now)?;

        let response = self
            .client
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Token exchange request failed: {}", e);
                CoreError::ExternalServiceError(format!("Firebase auth error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Token exchange error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Firebase auth returned error: {} - {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("Failed to parse token response: {}", e))
        })?;

        debug!(expires_in = token.expires_in, "Obtained Firestore access token");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
