use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com";
pub const DEFAULT_ROOT_ID: &str = "root";
pub const TOKEN_ENV: &str = "DRIVEPICK_TOKEN";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Remote id of the container the mirror root is bound to.
    #[serde(default = "default_root_id")]
    pub root_id: String,

    /// Entries requested per `files.list` page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Attempts per listing request; 1 disables retries.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Parent directory for the scratch mirror. No scratch mirror when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_root_id() -> String {
    DEFAULT_ROOT_ID.to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_attempts() -> u32 {
    1
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            api_base_url: default_api_base_url(),
            root_id: default_root_id(),
            page_size: default_page_size(),
            attempts: default_attempts(),
            scratch_dir: None,
            token: None,
        }
    }
}

impl PickerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config {}", path.display()))?;
        let cfg: PickerConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config {}", path.display()))?;
        if cfg.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        Ok(cfg)
    }

    pub fn remote(&self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.api_base_url.clone(),
            page_size: self.page_size,
            attempts: self.attempts,
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            root_id: self.root_id.clone(),
            scratch_dir: self.scratch_dir.clone(),
        }
    }

    /// Picks the access token: explicit value, then the environment, then the
    /// config file.
    pub fn resolve_token(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()))
            .or_else(|| self.token.clone())
            .with_context(|| {
                format!(
                    "no access token configured (pass --token, set {}, or add `token` to the config file)",
                    TOKEN_ENV
                )
            })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub page_size: u32,
    pub attempts: u32,
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub root_id: String,
    pub scratch_dir: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            root_id: DEFAULT_ROOT_ID.to_string(),
            scratch_dir: None,
        }
    }
}

#[cfg(test)]
#[path = "tests/config/config_tests.rs"]
mod tests;
