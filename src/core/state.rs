//! Catalog data structures and grid state persistence.
//!
//! This module defines the records the hub exchanges with the remote API and
//! the snapshot of the rendered grid that is kept between commands, so that
//! `more`, `show N` and `copy N` can refer to the last listing.
//!
//! # Public API
//! - [`ScriptSummary`]: One catalog entry as returned by list/search/trending
//! - [`GameInfo`]: The game a script targets
//! - [`QueryState`]: Search text, active filter and page number
//! - [`GridSnapshot`]: The rendered card set plus the query that produced it
//!
//! # Snapshot Strategy
//! - **JSON serialization**: Human-readable `grid.json` in the cache directory
//! - **Timestamping**: Track when the grid was last rendered
//! - **Bodies stripped**: Script bodies live in the body cache, not the snapshot

use crate::core::error::{Result, ScriptHubError};
use crate::core::filter::ScriptFilter;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSummary {
    #[serde(rename = "slug")]
    pub identifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "views", default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameInfo>,
    /// Body shipped inline by some listings
    #[serde(rename = "script", default, skip_serializing_if = "Option::is_none")]
    pub inline_body: Option<String>,
}

/// The API sends `null` for some text fields.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ScriptSummary {
    pub fn views(&self) -> u64 {
        self.view_count.unwrap_or(0)
    }

    pub fn game_name(&self) -> &str {
        self.game.as_ref().map_or("Unknown", |game| game.name.as_str())
    }

    /// Copy without the inline body, for storing in the grid snapshot.
    pub fn without_body(&self) -> Self {
        Self {
            inline_body: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub filter: ScriptFilter,
    pub page: u32,
}

impl QueryState {
    pub fn new(search_text: impl Into<String>, filter: ScriptFilter, page: u32) -> Self {
        Self {
            search_text: search_text.into(),
            filter,
            page: page.max(1),
        }
    }

    /// Search takes precedence over the filter when choosing an endpoint.
    pub fn has_search(&self) -> bool {
        !self.search_text.trim().is_empty()
    }

    /// `filter_search_page`, with `none` standing in for empty search text.
    ///
    /// The filter is always part of the key, even while a search is active,
    /// so the same search under two filters is cached twice.
    pub fn cache_key(&self) -> String {
        let search = if self.search_text.is_empty() {
            "none"
        } else {
            self.search_text.as_str()
        };
        format!("{}_{}_{}", self.filter, search, self.page)
    }

    pub fn next_page(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub query: QueryState,
    pub cards: Vec<ScriptSummary>,
    pub pagination_visible: bool,
    pub last_updated: SystemTime,
}

impl GridSnapshot {
    pub fn new(query: QueryState, cards: &[ScriptSummary], pagination_visible: bool) -> Self {
        Self {
            query,
            cards: cards.iter().map(ScriptSummary::without_body).collect(),
            pagination_visible,
            last_updated: SystemTime::now(),
        }
    }

    pub fn file_path(cache_dir: &Path) -> PathBuf {
        cache_dir.join("grid.json")
    }

    pub fn save(&self, cache_dir: &Path) -> Result<()> {
        log::debug!("Saving grid snapshot with {} cards", self.cards.len());

        fs::create_dir_all(cache_dir)?;
        let path = Self::file_path(cache_dir);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;

        log::debug!("Grid snapshot written to {}", path.display());
        Ok(())
    }

    /// Load the last rendered grid; a missing file means nothing was listed yet.
    pub fn load(cache_dir: &Path) -> Result<Self> {
        let path = Self::file_path(cache_dir);
        log::debug!("Loading grid snapshot from {}", path.display());

        if !path.exists() {
            return Err(ScriptHubError::NoGridState);
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| {
            log::error!("Failed to parse grid snapshot '{}': {}", path.display(), e);
            ScriptHubError::grid_state_parse_failed(&path, e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn summary(json: &str) -> ScriptSummary {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_summary_reads_wire_names() {
        let s = summary(
            r#"{"slug":"abc","title":"Foo","views":1500,
                "game":{"name":"Arsenal","imageUrl":"/images/a.png"},"script":"print(1)"}"#,
        );
        assert_eq!(s.identifier, "abc");
        assert_eq!(s.views(), 1500);
        assert_eq!(s.game_name(), "Arsenal");
        assert_eq!(s.inline_body.as_deref(), Some("print(1)"));
    }

    #[test]
    fn test_summary_defaults() {
        let s = summary(r#"{"slug":"abc","title":"Foo","views":null}"#);
        assert_eq!(s.views(), 0);
        assert_eq!(s.game_name(), "Unknown");
        assert!(s.inline_body.is_none());
    }

    #[test]
    fn test_cache_key_uses_none_for_empty_search() {
        let query = QueryState::new("", ScriptFilter::All, 1);
        assert_eq!(query.cache_key(), "all_none_1");
    }

    #[test]
    fn test_cache_key_keeps_filter_during_search() {
        let query = QueryState::new("aimbot", ScriptFilter::Trending, 2);
        assert_eq!(query.cache_key(), "trending_aimbot_2");
        assert!(query.has_search());
    }

    #[test]
    fn test_whitespace_search_is_not_a_search() {
        let query = QueryState::new("   ", ScriptFilter::Keyless, 1);
        assert!(!query.has_search());
        assert_eq!(query.cache_key(), "keyless_   _1");
    }

    #[test]
    fn test_page_is_at_least_one() {
        assert_eq!(QueryState::new("", ScriptFilter::All, 0).page, 1);
    }

    #[test]
    fn test_snapshot_round_trip_strips_bodies() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let cards = vec![summary(r#"{"slug":"abc","title":"Foo","script":"x"}"#)];
        let snapshot = GridSnapshot::new(QueryState::new("", ScriptFilter::All, 1), &cards, false);
        snapshot.save(temp_dir.path())?;

        let loaded = GridSnapshot::load(temp_dir.path())?;
        assert_eq!(loaded.cards.len(), 1);
        assert!(loaded.cards[0].inline_body.is_none());
        assert_eq!(loaded.query, snapshot.query);
        Ok(())
    }

    #[test]
    fn test_missing_snapshot_reports_no_grid() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            GridSnapshot::load(temp_dir.path()),
            Err(ScriptHubError::NoGridState)
        ));
    }
}
