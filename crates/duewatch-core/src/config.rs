//! DueWatch configuration system.
//!
//! A single TOML file with serde-defaulted sections. The store and
//! mailer sections are handed to their clients at construction, so
//! tests can point both at fake endpoints.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DuewatchConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub mailer: MailerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl DuewatchConfig {
    /// Load config from the default path (~/.duewatch/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::DuewatchError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::DuewatchError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::DuewatchError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".duewatch")
            .join("config.toml")
    }
}

/// Record store (Firestore REST) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base endpoint of the document store REST API.
    #[serde(default = "default_store_endpoint")]
    pub endpoint: String,
    /// Project that owns the collection.
    #[serde(default)]
    pub project_id: String,
    /// Collection holding the notification records.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// API key appended to the query.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

fn default_store_endpoint() -> String {
    "https://firestore.googleapis.com".into()
}
fn default_collection() -> String {
    "notifications".into()
}
fn default_store_timeout() -> u64 {
    15
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_store_endpoint(),
            project_id: String::new(),
            collection: default_collection(),
            api_key: String::new(),
            timeout_secs: default_store_timeout(),
        }
    }
}

/// Transactional-email provider (EmailJS-style) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    /// Base endpoint of the delivery provider.
    #[serde(default = "default_mailer_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub user_id: String,
    /// Origin header some providers require for browser-keyed accounts.
    #[serde(default)]
    pub origin: String,
    #[serde(default = "default_mailer_timeout")]
    pub timeout_secs: u64,
}

fn default_mailer_endpoint() -> String {
    "https://api.emailjs.com".into()
}
fn default_mailer_timeout() -> u64 {
    10
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_mailer_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            user_id: String::new(),
            origin: String::new(),
            timeout_secs: default_mailer_timeout(),
        }
    }
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8787
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Scheduled trigger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    /// Cadence: either a 5-field cron expression ("0 8 * * *") or empty
    /// to fall back to the fixed interval below.
    #[serde(default)]
    pub cron: String,
    /// Interval in seconds, used when no cron expression is set.
    #[serde(default = "default_every_secs")]
    pub every_secs: u64,
    /// Hard deadline for one pipeline run.
    #[serde(default = "default_run_timeout")]
    pub run_timeout_secs: u64,
}

fn bool_true() -> bool {
    true
}
fn default_every_secs() -> u64 {
    3600
}
fn default_run_timeout() -> u64 {
    60
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron: String::new(),
            every_secs: default_every_secs(),
            run_timeout_secs: default_run_timeout(),
        }
    }
}
