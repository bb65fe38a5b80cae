use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of create calls per assignment (including the first).
    pub max_attempts: u32,
    /// Delay in seconds before the second attempt; doubles per attempt after.
    pub base_delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 5.0,
        }
    }
}

/// Azure identifiers used to build assignment scopes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AzureConfig {
    /// Subscription the node's resources live in. Filled in by provisioning.
    pub subscription_id: String,
    /// Tenant the service principal belongs to.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl AzureConfig {
    /// Scope covering the whole subscription.
    pub fn subscription_scope(&self) -> String {
        format!("/subscriptions/{}", self.subscription_id)
    }

    /// Scope for one resource group in the configured subscription.
    pub fn resource_group_scope(&self, resource_group: &str) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}",
            self.subscription_id, resource_group
        )
    }
}

/// Global configuration loaded from `~/.config/rolegrant/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantConfig {
    pub azure: AzureConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rolegrant")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GrantConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GrantConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GrantConfig = toml::from_str(&data)?;
    Ok(cfg)
}
