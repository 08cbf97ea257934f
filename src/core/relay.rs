//! Relay transport: reaching the script API through public CORS relays.
//!
//! The API cannot be called directly, so every request is routed through an
//! ordered list of relay services. Each relay is tried once, in order; the
//! first one that answers with a 2xx status and a parseable envelope wins.
//! Individual failures are logged and skipped, and only when the whole chain
//! is exhausted does the caller see a single [`TransportError`].
//!
//! # Public API
//! - [`Relay`]: One relay endpoint and the envelope it wraps responses in
//! - [`RelayEnvelope`]: Tagged union of the envelope shapes, normalized here
//! - [`HttpGet`]: Seam for the HTTP client ([`ReqwestHttp`] in production)
//! - [`RelayTransport`]: The fallback chain itself
//! - [`first_success`]: Pure fallback over an ordered list of attempts

use crate::core::error::{Result, ScriptHubError, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::rc::Rc;
use std::time::Duration;

/// How a relay packages the target's response.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    /// `{ "contents": "<target body as a string>" }`
    Wrapped,
    /// The target body, unchanged
    Raw,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelayEnvelope {
    Wrapped { contents: String },
    Raw(Value),
}

#[derive(Deserialize)]
struct WrappedBody {
    contents: Option<String>,
}

impl RelayEnvelope {
    pub fn parse(kind: EnvelopeKind, body: &str) -> Result<Self> {
        match kind {
            EnvelopeKind::Raw => serde_json::from_str(body)
                .map(RelayEnvelope::Raw)
                .map_err(|e| ScriptHubError::parse(format!("raw body is not JSON: {e}"))),
            EnvelopeKind::Wrapped => {
                let wrapped: WrappedBody = serde_json::from_str(body)
                    .map_err(|e| ScriptHubError::parse(format!("wrapper is not JSON: {e}")))?;
                let contents = wrapped
                    .contents
                    .ok_or_else(|| ScriptHubError::parse("wrapper has no contents"))?;
                Ok(RelayEnvelope::Wrapped { contents })
            }
        }
    }

    /// The target's JSON payload. Wrapped envelopes need a second parse pass.
    pub fn into_payload(self) -> Result<Value> {
        match self {
            RelayEnvelope::Raw(value) => Ok(value),
            RelayEnvelope::Wrapped { contents } => serde_json::from_str(&contents)
                .map_err(|e| ScriptHubError::parse(format!("wrapped contents are not JSON: {e}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relay {
    pub endpoint_prefix: String,
    pub envelope: EnvelopeKind,
}

impl Relay {
    pub fn new(endpoint_prefix: impl Into<String>, envelope: EnvelopeKind) -> Self {
        Self {
            endpoint_prefix: endpoint_prefix.into(),
            envelope,
        }
    }

    /// `prefix + encode(target) + sep + "_t=" + nonce`, where `sep` is `&` if
    /// the prefix already carries a query string.
    pub fn request_url(&self, target_url: &str, nonce: i64) -> String {
        let separator = if self.endpoint_prefix.contains('?') {
            '&'
        } else {
            '?'
        };
        format!(
            "{}{}{}_t={}",
            self.endpoint_prefix,
            urlencoding::encode(target_url),
            separator,
            nonce
        )
    }

    pub fn decode(&self, body: &str) -> Result<Value> {
        RelayEnvelope::parse(self.envelope, body)?.into_payload()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single blocking GET.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

impl<T: HttpGet + ?Sized> HttpGet for Rc<T> {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        (**self).get(url)
    }
}

pub struct ReqwestHttp {
    client: reqwest::blocking::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("script-hub/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpGet for ReqwestHttp {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// Run `attempt` over `candidates` in order and return the first success.
///
/// Each candidate is tried exactly once. Failures are logged, never returned;
/// exhausting the list yields one aggregate error.
pub fn first_success<C, T, E, F>(
    candidates: &[C],
    mut attempt: F,
) -> std::result::Result<T, TransportError>
where
    F: FnMut(&C) -> std::result::Result<T, E>,
    E: Display,
{
    if candidates.is_empty() {
        return Err(TransportError::NoRelays);
    }

    for (position, candidate) in candidates.iter().enumerate() {
        match attempt(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => log::warn!(
                "Relay {} of {} failed: {}",
                position + 1,
                candidates.len(),
                e
            ),
        }
    }

    log::error!("All {} relays failed", candidates.len());
    Err(TransportError::AllRelaysFailed {
        attempts: candidates.len(),
    })
}

pub struct RelayTransport {
    relays: Vec<Relay>,
    http: Box<dyn HttpGet>,
}

impl RelayTransport {
    pub fn new(relays: Vec<Relay>, http: Box<dyn HttpGet>) -> Self {
        Self { relays, http }
    }

    pub fn relays(&self) -> &[Relay] {
        &self.relays
    }

    /// GET `target_url` through the relay chain and return its JSON body.
    pub fn fetch_json(&self, target_url: &str) -> std::result::Result<Value, TransportError> {
        log::debug!("Fetching {target_url} through {} relays", self.relays.len());

        first_success(&self.relays, |relay| {
            let url = relay.request_url(target_url, chrono::Utc::now().timestamp_millis());
            log::debug!("Trying relay {}", relay.endpoint_prefix);

            let response = self.http.get(&url)?;
            if !response.is_success() {
                return Err(ScriptHubError::RelayStatus {
                    status: response.status,
                });
            }
            relay.decode(&response.body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_url_appends_with_ampersand_after_query() {
        let relay = Relay::new("https://api.allorigins.win/get?url=", EnvelopeKind::Wrapped);
        let url = relay.request_url("https://scriptblox.com/api/script/fetch?page=1", 42);
        assert_eq!(
            url,
            "https://api.allorigins.win/get?url=https%3A%2F%2Fscriptblox.com%2Fapi%2Fscript%2Ffetch%3Fpage%3D1&_t=42"
        );
    }

    #[test]
    fn test_request_url_starts_query_when_prefix_has_none() {
        let relay = Relay::new("https://relay.example/", EnvelopeKind::Raw);
        let url = relay.request_url("https://a.b/c", 7);
        assert_eq!(url, "https://relay.example/https%3A%2F%2Fa.b%2Fc?_t=7");
    }

    #[test]
    fn test_wrapped_envelope_is_parsed_twice() -> Result<()> {
        let body = json!({ "contents": "{\"result\":{\"scripts\":[]}}" }).to_string();
        let relay = Relay::new("https://r/?", EnvelopeKind::Wrapped);
        assert_eq!(relay.decode(&body)?, json!({ "result": { "scripts": [] } }));
        Ok(())
    }

    #[test]
    fn test_wrapped_envelope_without_contents_is_rejected() {
        let envelope = RelayEnvelope::parse(EnvelopeKind::Wrapped, r#"{"contents":null}"#);
        assert!(matches!(envelope, Err(ScriptHubError::Parse { .. })));
    }

    #[test]
    fn test_wrapped_envelope_with_html_contents_is_rejected() {
        let body = json!({ "contents": "<html>rate limited</html>" }).to_string();
        let relay = Relay::new("https://r/?", EnvelopeKind::Wrapped);
        assert!(matches!(relay.decode(&body), Err(ScriptHubError::Parse { .. })));
    }

    #[test]
    fn test_raw_envelope_passes_value_through() -> Result<()> {
        let envelope = RelayEnvelope::parse(EnvelopeKind::Raw, r#"{"a":1}"#)?;
        assert_eq!(envelope, RelayEnvelope::Raw(json!({ "a": 1 })));
        Ok(())
    }

    #[test]
    fn test_first_success_stops_at_first_ok() {
        let mut tried = Vec::new();
        let result = first_success(&[1, 2, 3, 4], |n| {
            tried.push(*n);
            if *n == 3 {
                Ok(n * 10)
            } else {
                Err("nope")
            }
        });
        assert_eq!(result, Ok(30));
        assert_eq!(tried, vec![1, 2, 3]);
    }

    #[test]
    fn test_first_success_aggregates_failures() {
        let result: std::result::Result<(), _> = first_success(&["a", "b"], |_| Err("down"));
        assert_eq!(result, Err(TransportError::AllRelaysFailed { attempts: 2 }));
    }

    #[test]
    fn test_first_success_without_candidates() {
        let candidates: [u8; 0] = [];
        let result: std::result::Result<(), _> = first_success(&candidates, |_| Err("unused"));
        assert_eq!(result, Err(TransportError::NoRelays));
    }

    #[test]
    fn test_http_response_success_range() {
        assert!(HttpResponse::ok("").is_success());
        assert!(!HttpResponse {
            status: 429,
            body: String::new()
        }
        .is_success());
    }
}
