//! Shared services for the grid and the detail view.
//!
//! [`Catalog`] bundles the relay transport, both cache tiers and the API
//! endpoints. The grid controller and the detail modal borrow it for each
//! operation; neither owns the caches.

use crate::core::api::{self, ScriptApi};
use crate::core::cache::{ResponseCache, ScriptBodyCache};
use crate::core::card::CardStyle;
use crate::core::config::HubConfig;
use crate::core::error::TransportError;
use crate::core::relay::{HttpGet, RelayTransport};
use crate::core::storage::Storage;
use std::rc::Rc;

pub struct Catalog {
    pub api: ScriptApi,
    pub transport: RelayTransport,
    pub responses: ResponseCache,
    pub bodies: ScriptBodyCache,
    pub style: CardStyle,
    pub page_size_threshold: usize,
}

impl Catalog {
    pub fn new(config: &HubConfig, storage: Rc<dyn Storage>, http: Box<dyn HttpGet>) -> Self {
        Self {
            api: ScriptApi::new(config.api_base.clone()),
            transport: RelayTransport::new(config.relay_chain(), http),
            responses: ResponseCache::new(Rc::clone(&storage), config.response_ttl()),
            bodies: ScriptBodyCache::load(storage),
            style: CardStyle {
                image_host: config.image_host.trim_end_matches('/').to_string(),
                fallback_image: config.fallback_image.clone(),
            },
            page_size_threshold: config.page_size_threshold,
        }
    }

    /// Body for `identifier`: body cache first, then a single-script fetch.
    ///
    /// `Ok(None)` means the API answered without a body; nothing is cached then.
    pub fn resolve_body(&mut self, identifier: &str) -> Result<Option<String>, TransportError> {
        if let Some(body) = self.bodies.get(identifier) {
            log::debug!("Script body cache hit: {identifier}");
            return Ok(Some(body.to_string()));
        }

        log::debug!("Script body cache miss: {identifier}");
        let payload = self.transport.fetch_json(&self.api.script_url(identifier))?;
        let body = api::extract_body(&payload);
        if let Some(body) = &body {
            self.bodies.insert(identifier, body);
        }
        Ok(body)
    }
}
