//! Centralized initialization shared by every command.
//!
//! [`HubContext::initialize`] loads the configuration, opens the persistent
//! store under the cache directory, builds the HTTP client and wires them into
//! a [`Catalog`]. Commands that work with the card grid also go through the
//! context to load and save the grid snapshot.
//!
//! # Initialization Steps
//! 1. **Configuration**: Load `config.json`, writing defaults on first use
//! 2. **Storage**: Open the file-backed store with the configured quota
//! 3. **Transport**: Build the blocking HTTP client with the request timeout
//! 4. **Catalog**: Load the body cache and assemble the relay chain

use crate::core::catalog::Catalog;
use crate::core::config::HubConfig;
use crate::core::dirs::{get_cache_directory, get_storage_directory};
use crate::core::error::{Result, ScriptHubError};
use crate::core::grid::GridController;
use crate::core::relay::ReqwestHttp;
use crate::core::state::GridSnapshot;
use crate::core::storage::{FileStorage, Storage};
use std::path::PathBuf;
use std::rc::Rc;

pub struct HubContext {
    pub config: HubConfig,
    pub cache_dir: PathBuf,
    pub catalog: Catalog,
}

impl HubContext {
    pub fn initialize() -> Result<Self> {
        let config = HubConfig::load_or_create()?;
        let cache_dir = get_cache_directory()?;
        let storage_dir = get_storage_directory()?;
        log::debug!("Using storage at {}", storage_dir.display());

        let storage: Rc<dyn Storage> = Rc::new(FileStorage::with_quota(
            storage_dir,
            config.storage_quota_bytes,
        ));
        let http = ReqwestHttp::new(config.request_timeout())?;
        let catalog = Catalog::new(&config, storage, Box::new(http));

        log::debug!(
            "Initialized with {} relays and {} cached script bodies",
            catalog.transport.relays().len(),
            catalog.bodies.len()
        );

        Ok(Self {
            config,
            cache_dir,
            catalog,
        })
    }

    /// The last rendered grid, if any command has listed scripts yet.
    pub fn load_snapshot(&self) -> Result<Option<GridSnapshot>> {
        match GridSnapshot::load(&self.cache_dir) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(ScriptHubError::NoGridState) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Grid controller restored from the snapshot, or a fresh one.
    pub fn load_grid(&self) -> Result<GridController> {
        let debounce = self.config.debounce();
        Ok(match self.load_snapshot()? {
            Some(snapshot) => GridController::from_snapshot(snapshot, debounce),
            None => GridController::new(debounce),
        })
    }

    pub fn save_grid(&self, grid: &GridController) -> Result<()> {
        grid.snapshot().save(&self.cache_dir)
    }
}
