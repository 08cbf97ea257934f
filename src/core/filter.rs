//! Type-safe listing filter enumeration.
//!
//! [`ScriptFilter`] names the four catalog listings. It participates in cache
//! keys through [`ScriptFilter::as_str`] and selects the listing endpoint
//! when no search text is present.

use crate::core::error::{Result, ScriptHubError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFilter {
    /// Latest scripts
    #[default]
    All,
    /// Scripts that work in any game
    Universal,
    /// Scripts that need no access key
    Keyless,
    /// Trending scripts
    Trending,
}

impl ScriptFilter {
    pub const ALL: [ScriptFilter; 4] = [
        ScriptFilter::All,
        ScriptFilter::Universal,
        ScriptFilter::Keyless,
        ScriptFilter::Trending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptFilter::All => "all",
            ScriptFilter::Universal => "universal",
            ScriptFilter::Keyless => "keyless",
            ScriptFilter::Trending => "trending",
        }
    }
}

impl fmt::Display for ScriptFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptFilter {
    type Err = ScriptHubError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == wanted)
            .ok_or_else(|| ScriptHubError::unknown_filter(s))
    }
}
