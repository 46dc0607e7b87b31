use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

pub mod entities;
pub mod services;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024; // 10MB
pub const DEFAULT_MAX_IMAGE_PIXELS: u64 = 40_000_000;

#[derive(Clone, Debug)]
pub struct WsieConfig {
    pub llm: LLMConfig,
    pub image: ImageConfig,
    pub firebase: FirebaseConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    /// `None` or blank disables every model call for the process lifetime.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub report_model: String,
    pub timeout: Duration,
}

impl LLMConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: "gpt-4o-mini".to_string(),
            report_model: "gpt-4o".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageConfig {
    pub max_upload_bytes: usize,
    /// Upper bound on `width * height`; also sizes the decoder's allocation limit.
    pub max_pixels: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_IMAGE_BYTES,
            max_pixels: DEFAULT_MAX_IMAGE_PIXELS,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FirebaseConfig {
    pub service_account_path: Option<PathBuf>,
    /// `host:port` of a local Firestore emulator; takes precedence over the
    /// service account.
    pub emulator_host: Option<String>,
    pub project_id: Option<String>,
}

pub fn unix_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
pub(crate) mod test_support;
