use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub token_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("SOLACE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            request_timeout_secs: env::var("SOLACE_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("SOLACE_REQUEST_TIMEOUT_SECS must be a number"),
            token_path: env::var("SOLACE_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_token_path()),
        }
    }
}

/// Local-storage analog: a per-user JSON file holding the bearer tokens.
fn default_token_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("solace")
        .join("tokens.json")
}
