use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_ENDPOINT_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_MODEL_ID: &str = "facebook/bart-large-cnn";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub endpoint_url: String,
    pub api_token: Option<String>,
    pub model_id: String,
    pub cache_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let request_timeout = match env::var("RECAP_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|e| format!("RECAP_REQUEST_TIMEOUT_SECS: {}", e))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr: env::var("RECAP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            endpoint_url: env::var("HF_ENDPOINT_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT_URL.into()),
            api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            model_id: env::var("RECAP_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_ID.into()),
            cache_dir: env::var("RECAP_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("recap").join("cache")),
            temp_dir: env::var("RECAP_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir().join("recap").join("scratch")),
            request_timeout,
        })
    }
}
