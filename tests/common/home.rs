//! Isolated config and cache directories for running the binary
//!
//! Each [`TestHome`] owns a temporary directory and points `XDG_CONFIG_HOME`
//! and `XDG_CACHE_HOME` at it. The written config routes every relay to a
//! closed local port so no test touches the network.

#![allow(dead_code)]

use assert_cmd::Command;
use script_hub::core::{
    config::{HubConfig, RelayConfig},
    error::Result,
    filter::ScriptFilter,
    relay::EnvelopeKind,
    state::{GridSnapshot, QueryState, ScriptSummary},
    storage::{FileStorage, Storage},
};
use std::path::PathBuf;
use tempfile::TempDir;

pub const UNREACHABLE_RELAY: &str = "http://127.0.0.1:9/?";

pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> Result<Self> {
        let home = Self {
            dir: TempDir::new()?,
        };

        let config = HubConfig {
            relays: vec![RelayConfig {
                endpoint_prefix: UNREACHABLE_RELAY.to_string(),
                envelope: EnvelopeKind::Raw,
            }],
            request_timeout_secs: 2,
            ..HubConfig::default()
        };
        config.save_to(&home.config_file())?;
        Ok(home)
    }

    pub fn config_home(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    pub fn cache_home(&self) -> PathBuf {
        self.dir.path().join("cache")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_home().join("script-hub").join("config.json")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_home().join("script-hub")
    }

    /// The same store the binary opens.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.cache_dir().join("storage"))
    }

    /// Seed the script body cache with `identifier -> body`.
    pub fn seed_body(&self, identifier: &str, body: &str) -> Result<()> {
        let bodies = serde_json::json!({ identifier: body }).to_string();
        self.storage().set_item("zylite_scripts_content", &bodies)?;
        Ok(())
    }

    /// Save a grid as if `list` had shown these scripts.
    pub fn write_grid(&self, cards: &[ScriptSummary]) -> Result<()> {
        let query = QueryState::new("", ScriptFilter::All, 1);
        GridSnapshot::new(query, cards, false).save(&self.cache_dir())
    }

    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("script-hub")?;
        cmd.env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_CACHE_HOME", self.cache_home())
            .env("NO_COLOR", "1");
        Ok(cmd)
    }
}
