use crate::core::dirs::get_config_directory;
use crate::core::error::{Result, ScriptHubError};
use crate::core::relay::{EnvelopeKind, Relay};
use crate::core::storage::DEFAULT_QUOTA_BYTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://scriptblox.com/api/script";
pub const DEFAULT_IMAGE_HOST: &str = "https://scriptblox.com";
pub const DEFAULT_FALLBACK_IMAGE: &str = "logo.png";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub endpoint_prefix: String,
    pub envelope: EnvelopeKind,
}

impl From<&RelayConfig> for Relay {
    fn from(config: &RelayConfig) -> Self {
        Relay::new(config.endpoint_prefix.clone(), config.envelope)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HubConfig {
    pub api_base: String,
    pub image_host: String,
    pub fallback_image: String,
    pub relays: Vec<RelayConfig>,
    pub request_timeout_secs: u64,
    pub response_ttl_secs: u64,
    pub page_size_threshold: usize,
    pub debounce_ms: u64,
    pub storage_quota_bytes: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
            relays: vec![
                RelayConfig {
                    endpoint_prefix: "https://api.allorigins.win/get?url=".to_string(),
                    envelope: EnvelopeKind::Wrapped,
                },
                RelayConfig {
                    endpoint_prefix: "https://api.codetabs.com/v1/proxy?quest=".to_string(),
                    envelope: EnvelopeKind::Raw,
                },
                RelayConfig {
                    endpoint_prefix: "https://corsproxy.io/?".to_string(),
                    envelope: EnvelopeKind::Raw,
                },
            ],
            request_timeout_secs: 10,
            response_ttl_secs: 600,
            page_size_threshold: 20,
            debounce_ms: 600,
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl HubConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join("config.json"))
    }

    /// Load the user's configuration, writing the defaults on first use.
    pub fn load_or_create() -> Result<Self> {
        let config_file = Self::config_path()?;

        if config_file.exists() {
            Self::load_from(&config_file)
        } else {
            let config = Self::default();
            config.save_to(&config_file)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.relays.is_empty() {
            return Err(ScriptHubError::config_error("at least one relay is required"));
        }
        if self.api_base.trim().is_empty() {
            return Err(ScriptHubError::config_error("api_base must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ScriptHubError::config_error(
                "request_timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn relay_chain(&self) -> Vec<Relay> {
        self.relays.iter().map(Relay::from).collect()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn response_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.response_ttl_secs as i64)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_relay_order() {
        let config = HubConfig::default();
        let relays = config.relay_chain();
        assert_eq!(relays.len(), 3);
        assert!(relays[0].endpoint_prefix.contains("allorigins"));
        assert_eq!(relays[0].envelope, EnvelopeKind::Wrapped);
        assert_eq!(relays[1].envelope, EnvelopeKind::Raw);
        assert!(relays[2].endpoint_prefix.contains("corsproxy"));
    }

    #[test]
    fn test_default_timings_and_limits() {
        let config = HubConfig::default();
        assert_eq!(config.response_ttl(), chrono::Duration::minutes(10));
        assert_eq!(config.page_size_threshold, 20);
        assert_eq!(config.debounce(), Duration::from_millis(600));
        assert_eq!(config.storage_quota_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_save_and_load_round_trip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.json");

        let mut config = HubConfig::default();
        config.request_timeout_secs = 3;
        config.save_to(&path)?;

        let loaded = HubConfig::load_from(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "debounce_ms": 250 }"#)?;

        let loaded = HubConfig::load_from(&path)?;
        assert_eq!(loaded.debounce_ms, 250);
        assert_eq!(loaded.relays.len(), 3);
        Ok(())
    }

    #[test]
    fn test_empty_relay_list_is_rejected() {
        let config = HubConfig {
            relays: Vec::new(),
            ..HubConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScriptHubError::Config { .. })
        ));
    }
}
