//! Script API endpoints and response extraction.
//!
//! Listings come back as `{ result: { scripts: [...] } }` and single scripts as
//! `{ script: { script: "<body>" } }`. Extraction is lenient: a missing
//! `result` or `scripts` is an empty listing and malformed items are skipped.

use crate::core::filter::ScriptFilter;
use crate::core::state::{QueryState, ScriptSummary};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptApi {
    base: String,
}

impl ScriptApi {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Search text wins over the filter; the filter only picks the listing
    /// endpoint when there is nothing to search for.
    pub fn listing_url(&self, query: &QueryState) -> String {
        let page = query.page;
        if query.has_search() {
            return format!(
                "{}/search?q={}&mode=free&page={}",
                self.base,
                urlencoding::encode(&query.search_text),
                page
            );
        }

        match query.filter {
            ScriptFilter::All => format!("{}/fetch?page={}", self.base, page),
            ScriptFilter::Universal => format!("{}/fetch?page={}&universal=1", self.base, page),
            ScriptFilter::Keyless => format!("{}/fetch?page={}&key=0", self.base, page),
            ScriptFilter::Trending => format!("{}/trending?page={}", self.base, page),
        }
    }

    pub fn script_url(&self, identifier: &str) -> String {
        format!("{}/fetch/{}", self.base, urlencoding::encode(identifier))
    }
}

/// One page of a listing response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub scripts: Vec<ScriptSummary>,
    /// Items the API sent, including any skipped as malformed
    pub returned: usize,
}

pub fn extract_listing(payload: &Value) -> Listing {
    let Some(items) = payload
        .get("result")
        .and_then(|result| result.get("scripts"))
        .and_then(Value::as_array)
    else {
        return Listing::default();
    };

    let scripts = items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(summary) => Some(summary),
            Err(e) => {
                log::warn!("Skipping malformed script entry: {e}");
                None
            }
        })
        .collect();

    Listing {
        scripts,
        returned: items.len(),
    }
}

/// The body of a single-script response, if it carries a non-empty one.
pub fn extract_body(payload: &Value) -> Option<String> {
    payload
        .get("script")
        .and_then(|script| script.get("script"))
        .and_then(Value::as_str)
        .filter(|body| !body.is_empty())
        .map(str::to_string)
}
