use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiError;
use crate::models::Credentials;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

pub const ENV_API_URL: &str = "JOURNAL_API_URL";
pub const ENV_EMAIL: &str = "JOURNAL_EMAIL";
pub const ENV_PASSWORD: &str = "JOURNAL_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "JOURNAL_TIMEOUT_SECS";
pub const ENV_EXPORT_DIR: &str = "JOURNAL_EXPORT_DIR";

/// Client settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub email: Option<String>,
    pub password: Option<String>,
    /// No timeout unless configured; a hung request stays pending
    pub timeout: Option<Duration>,
    pub export_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            email: None,
            password: None,
            timeout: None,
            export_dir: PathBuf::from("."),
        }
    }
}

impl ClientConfig {
    /// Load from process environment after applying `.env`
    pub fn from_env() -> Result<Self, ApiError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = ClientConfig::default();

        if let Some(url) = get(ENV_API_URL) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::Config(format!(
                    "{} must start with http:// or https://, got {}",
                    ENV_API_URL, url
                )));
            }
            config.base_url = url.trim_end_matches('/').to_string();
        }

        config.email = get(ENV_EMAIL);
        config.password = get(ENV_PASSWORD);

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|_| {
                ApiError::Config(format!("{} must be a whole number of seconds, got {}", ENV_TIMEOUT_SECS, raw))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(dir) = get(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Login credentials, when both halves are configured
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some(Credentials {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}
