//! Canned API payloads and a scripted HTTP client
//!
//! [`ScriptedHttp`] stands in for the network. Responses are picked by route
//! (a substring of the decoded target URL) or, failing that, from a FIFO
//! queue; anything left over answers 503. Every requested URL is recorded.

#![allow(dead_code)]

use script_hub::core::{
    catalog::Catalog,
    config::{HubConfig, RelayConfig},
    error::Result,
    relay::{EnvelopeKind, HttpGet, HttpResponse},
    storage::{MemoryStorage, Storage},
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub const RELAY_PREFIX: &str = "https://relay.test/raw?url=";

#[derive(Default)]
pub struct ScriptedHttp {
    routes: RefCell<Vec<(String, HttpResponse)>>,
    queue: RefCell<VecDeque<HttpResponse>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedHttp {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Answer every request whose decoded URL contains `pattern`.
    pub fn route(&self, pattern: &str, response: HttpResponse) {
        self.routes
            .borrow_mut()
            .push((pattern.to_string(), response));
    }

    pub fn route_json(&self, pattern: &str, payload: &Value) {
        self.route(pattern, HttpResponse::ok(payload.to_string()));
    }

    pub fn enqueue(&self, response: HttpResponse) {
        self.queue.borrow_mut().push_back(response);
    }

    /// Decoded URLs of every request so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HttpGet for ScriptedHttp {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let decoded = urlencoding::decode(url)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| url.to_string());
        self.requests.borrow_mut().push(decoded.clone());

        let routed = self
            .routes
            .borrow()
            .iter()
            .find(|(pattern, _)| decoded.contains(pattern.as_str()))
            .map(|(_, response)| response.clone());
        if let Some(response) = routed {
            return Ok(response);
        }

        Ok(self
            .queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| unavailable()))
    }
}

pub fn unavailable() -> HttpResponse {
    HttpResponse {
        status: 503,
        body: String::new(),
    }
}

/// Config with a single pass-through relay.
pub fn single_relay_config() -> HubConfig {
    HubConfig {
        relays: vec![RelayConfig {
            endpoint_prefix: RELAY_PREFIX.to_string(),
            envelope: EnvelopeKind::Raw,
        }],
        ..HubConfig::default()
    }
}

pub fn catalog_with(config: &HubConfig, storage: Rc<dyn Storage>, http: &Rc<ScriptedHttp>) -> Catalog {
    Catalog::new(config, storage, Box::new(Rc::clone(http)))
}

pub fn test_catalog(http: &Rc<ScriptedHttp>) -> Catalog {
    catalog_with(
        &single_relay_config(),
        Rc::new(MemoryStorage::new()),
        http,
    )
}

pub fn script_item(slug: &str) -> Value {
    json!({
        "slug": slug,
        "title": format!("Script {slug}"),
        "views": 1500,
        "game": { "name": "Arsenal", "imageUrl": "/images/arsenal.png" }
    })
}

pub fn script_item_with_body(slug: &str, body: &str) -> Value {
    let mut item = script_item(slug);
    item["script"] = json!(body);
    item
}

/// Listing payload with `count` scripts named `{prefix}-{n}`.
pub fn listing(prefix: &str, count: usize) -> Value {
    let scripts: Vec<Value> = (1..=count)
        .map(|n| script_item(&format!("{prefix}-{n}")))
        .collect();
    listing_of(scripts)
}

pub fn listing_of(scripts: Vec<Value>) -> Value {
    json!({ "result": { "scripts": scripts } })
}

pub fn script_detail(body: &str) -> Value {
    json!({ "script": { "script": body } })
}
