//! Two-tier result cache on top of [`Storage`].
//!
//! - [`ResponseCache`]: listing responses keyed by `filter_search_page`, stored
//!   as `zylite_api_<key>` → `{ "ts": <ms>, "data": [...] }` and treated as
//!   absent once older than the TTL. Stale entries are never swept.
//! - [`ScriptBodyCache`]: identifier → body map stored whole under
//!   `zylite_scripts_content`, with no expiry.
//!
//! Caching only ever speeds things up, so both tiers fail soft: read errors
//! look like a miss and write errors are logged and dropped.

use crate::core::error::StorageError;
use crate::core::state::ScriptSummary;
use crate::core::storage::Storage;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const RESPONSE_KEY_PREFIX: &str = "zylite_api_";
pub const BODIES_KEY: &str = "zylite_scripts_content";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Capture time in epoch milliseconds
    pub ts: i64,
    pub data: T,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, captured_at: DateTime<Utc>) -> Self {
        Self {
            ts: captured_at.timestamp_millis(),
            data,
        }
    }

    /// An age that does not fit in `i64` counts as stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.timestamp_millis()
            .checked_sub(self.ts)
            .is_some_and(|age| age <= ttl.num_milliseconds())
    }
}

pub struct ResponseCache {
    storage: Rc<dyn Storage>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(storage: Rc<dyn Storage>, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    fn storage_key(key: &str) -> String {
        format!("{RESPONSE_KEY_PREFIX}{key}")
    }

    pub fn get(&self, key: &str) -> Option<Vec<ScriptSummary>> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<ScriptSummary>> {
        let raw = match self.storage.get_item(&Self::storage_key(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("Response cache miss: {key}");
                return None;
            }
            Err(e) => {
                log::warn!("Response cache read failed for {key}: {e}");
                return None;
            }
        };

        let entry: CacheEntry<Vec<ScriptSummary>> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Ignoring unreadable response cache entry {key}: {e}");
                return None;
            }
        };

        if !entry.is_fresh(now, self.ttl) {
            log::debug!("Response cache entry {key} expired");
            return None;
        }

        log::debug!("Response cache hit: {key} ({} scripts)", entry.data.len());
        Some(entry.data)
    }

    pub fn set(&self, key: &str, scripts: &[ScriptSummary]) {
        self.set_at(key, scripts, Utc::now());
    }

    pub fn set_at(&self, key: &str, scripts: &[ScriptSummary], now: DateTime<Utc>) {
        let entry = CacheEntry::new(scripts, now);
        let result = serde_json::to_string(&entry)
            .map_err(|e| log::warn!("Failed to serialize response cache entry {key}: {e}"))
            .and_then(|json| {
                self.storage
                    .set_item(&Self::storage_key(key), &json)
                    .map_err(|e| log::warn!("Response cache write failed for {key}: {e}"))
            });
        if result.is_ok() {
            log::debug!("Cached {} scripts under {key}", scripts.len());
        }
    }

    /// Number of stored response entries, fresh or not.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self
            .storage
            .keys()?
            .iter()
            .filter(|key| key.starts_with(RESPONSE_KEY_PREFIX))
            .count())
    }

    /// Remove every response entry. Returns how many were removed.
    pub fn clear(&self) -> Result<usize, StorageError> {
        let keys: Vec<String> = self
            .storage
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(RESPONSE_KEY_PREFIX))
            .collect();
        for key in &keys {
            self.storage.remove_item(key)?;
        }
        Ok(keys.len())
    }
}

pub struct ScriptBodyCache {
    storage: Rc<dyn Storage>,
    bodies: BTreeMap<String, String>,
}

impl ScriptBodyCache {
    /// Load the stored map; anything unreadable starts the cache empty.
    pub fn load(storage: Rc<dyn Storage>) -> Self {
        let bodies = match storage.get_item(BODIES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable script body cache: {e}");
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                log::warn!("Script body cache unavailable: {e}");
                BTreeMap::new()
            }
        };
        log::debug!("Loaded {} cached script bodies", bodies.len());
        Self { storage, bodies }
    }

    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.bodies.get(identifier).map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.bodies.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn insert(&mut self, identifier: &str, body: &str) {
        self.bodies.insert(identifier.to_string(), body.to_string());
        self.persist();
    }

    /// Keep the bodies that a listing shipped inline.
    pub fn absorb(&mut self, scripts: &[ScriptSummary]) -> usize {
        let mut added = 0;
        for script in scripts {
            if let Some(body) = script.inline_body.as_deref().filter(|b| !b.is_empty()) {
                self.bodies
                    .insert(script.identifier.clone(), body.to_string());
                added += 1;
            }
        }
        if added > 0 {
            self.persist();
        }
        added
    }

    pub fn clear(&mut self) -> Result<usize, StorageError> {
        let removed = self.bodies.len();
        self.bodies.clear();
        self.storage.remove_item(BODIES_KEY)?;
        Ok(removed)
    }

    fn persist(&self) {
        match serde_json::to_string(&self.bodies) {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(BODIES_KEY, &json) {
                    log::warn!("Script body cache write failed: {e}");
                }
            }
            Err(e) => log::warn!("Failed to serialize script body cache: {e}"),
        }
    }
}
