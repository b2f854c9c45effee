use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub matcher_url: Option<String>,
    pub store_path: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            matcher_url: None,
            store_path: Some("./reclaim_store.json".to_string()),
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("RECLAIM_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(bind_addr) = env::var("RECLAIM_BIND_ADDR") {
            self.bind_addr = bind_addr;
        }
        if let Ok(api_token) = env::var("RECLAIM_API_TOKEN") {
            self.api_token = Some(api_token);
        }
        if let Ok(matcher_url) = env::var("RECLAIM_MATCHER_URL") {
            self.matcher_url = Some(matcher_url);
        }
        if let Ok(store_path) = env::var("RECLAIM_STORE_PATH") {
            self.store_path = Some(store_path);
        }
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(matcher_url) = &self.matcher_url {
            if matcher_url.trim().is_empty() {
                self.matcher_url = None;
            }
        }
        if let Some(store_path) = &self.store_path {
            if store_path.trim().is_empty() {
                self.store_path = None;
            }
        }
    }

    /// Relative store paths resolve against the config file's directory, not
    /// the process working directory.
    pub fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir.filter(|p| !p.as_os_str().is_empty()) else {
            return;
        };
        if let Some(store_path) = &self.store_path {
            let path = Path::new(store_path);
            if path.is_relative() {
                self.store_path = Some(base.join(path).to_string_lossy().to_string());
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr '{}': {}", self.bind_addr, err))?;
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be at least 1"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be positive"));
        }
        if let Some(matcher_url) = &self.matcher_url {
            if !matcher_url.starts_with("http://") && !matcher_url.starts_with("https://") {
                return Err(anyhow!("matcher_url must be an http(s) URL"));
            }
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            matcher_url: self.matcher_url.clone(),
            store_path: self.store_path.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }
}
