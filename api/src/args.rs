use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use wsie_core::domain::common::{
    DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_IMAGE_PIXELS, DEFAULT_OPENAI_BASE_URL, FirebaseConfig,
    ImageConfig, LLMConfig, WsieConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "wsie-api", version, about = "WSIE recipe and food analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,
    #[command(flatten)]
    pub log: LogArgs,
    #[command(flatten)]
    pub llm: LlmArgs,
    #[command(flatten)]
    pub image: ImageArgs,
    #[command(flatten)]
    pub firebase: FirebaseArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,
    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://localhost:8080"
    )]
    pub allowed_origins: Vec<String>,
    #[arg(long = "tls-cert-path", env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<PathBuf>,
    #[arg(long = "tls-key-path", env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<PathBuf>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,
    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    #[arg(long = "openai-base-url", env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,
    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,
    #[arg(long = "openai-report-model", env = "OPENAI_REPORT_MODEL", default_value = "gpt-4o")]
    pub report_model: String,
    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ImageArgs {
    #[arg(long = "max-upload-bytes", env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_IMAGE_BYTES)]
    pub max_upload_bytes: usize,
    #[arg(long = "max-image-pixels", env = "MAX_IMAGE_PIXELS", default_value_t = DEFAULT_MAX_IMAGE_PIXELS)]
    pub max_pixels: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct FirebaseArgs {
    #[arg(
        long = "firebase-service-account",
        env = "FIREBASE_SERVICE_ACCOUNT",
        default_value = "/run/secrets/firebase_sa.json"
    )]
    pub service_account_path: Option<PathBuf>,
    #[arg(long = "firestore-emulator-host", env = "FIRESTORE_EMULATOR_HOST")]
    pub emulator_host: Option<String>,
    #[arg(long = "firebase-project-id", env = "FIREBASE_PROJECT_ID")]
    pub project_id: Option<String>,
}

impl From<LlmArgs> for LLMConfig {
    fn from(args: LlmArgs) -> Self {
        Self {
            openai_api_key: args.openai_api_key,
            openai_base_url: args.openai_base_url,
            model: args.model,
            report_model: args.report_model,
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}

impl From<Args> for WsieConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig::from(args.llm),
            image: ImageConfig {
                max_upload_bytes: args.image.max_upload_bytes,
                max_pixels: args.image.max_pixels,
            },
            firebase: FirebaseConfig {
                service_account_path: args.firebase.service_account_path,
                emulator_host: args.firebase.emulator_host,
                project_id: args.firebase.project_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_into_config() {
        let args = Args::try_parse_from([
            "wsie-api",
            "--openai-api-key",
            "sk-test",
            "--llm-timeout-secs",
            "5",
            "--allowed-origins",
            "http://a.test,http://b.test",
            "--max-upload-bytes",
            "2048",
        ])
        .unwrap();

        assert_eq!(args.server.allowed_origins, vec!["http://a.test", "http://b.test"]);

        let config = WsieConfig::from(args);
        assert_eq!(config.llm.api_key(), Some("sk-test"));
        assert_eq!(config.llm.timeout, Duration::from_secs(5));
        assert_eq!(config.image.max_upload_bytes, 2048);
    }
}
