use script_hub::core::{
    config::HubConfig,
    error::TransportError,
    relay::{HttpResponse, RelayTransport},
};
use serde_json::json;
use std::rc::Rc;

mod common;
use common::fixtures::*;

#[cfg(test)]
mod relay_transport_tests {
    use super::*;

    fn default_chain(http: &Rc<ScriptedHttp>) -> RelayTransport {
        RelayTransport::new(HubConfig::default().relay_chain(), Box::new(Rc::clone(http)))
    }

    #[test]
    fn test_third_relay_answers_after_two_failures() -> anyhow::Result<()> {
        let http = ScriptedHttp::new();
        http.enqueue(unavailable());
        http.enqueue(HttpResponse::ok("<html>not json</html>"));
        http.enqueue(HttpResponse::ok(listing("a", 2).to_string()));

        let payload = default_chain(&http).fetch_json("https://scriptblox.com/api/script/fetch?page=1")?;

        assert_eq!(payload, listing("a", 2));
        let requests = http.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].starts_with("https://api.allorigins.win/get?url="));
        assert!(requests[1].starts_with("https://api.codetabs.com/v1/proxy?quest="));
        assert!(requests[2].starts_with("https://corsproxy.io/?"));
        Ok(())
    }

    #[test]
    fn test_first_relay_success_stops_the_chain() -> anyhow::Result<()> {
        let http = ScriptedHttp::new();
        let wrapped = json!({ "contents": listing("w", 1).to_string() });
        http.enqueue(HttpResponse::ok(wrapped.to_string()));

        let payload = default_chain(&http).fetch_json("https://scriptblox.com/api/script/trending?page=1")?;

        assert_eq!(payload, listing("w", 1));
        assert_eq!(http.request_count(), 1);
        Ok(())
    }

    #[test]
    fn test_all_relays_failing_is_one_error() {
        let http = ScriptedHttp::new();

        let result = default_chain(&http).fetch_json("https://scriptblox.com/api/script/fetch?page=1");

        assert_eq!(result, Err(TransportError::AllRelaysFailed { attempts: 3 }));
        assert_eq!(result.unwrap_err().to_string(), "All proxies failed");
        assert_eq!(http.request_count(), 3);
    }

    #[test]
    fn test_every_request_is_cache_busted() -> anyhow::Result<()> {
        let http = ScriptedHttp::new();
        http.enqueue(HttpResponse::ok("{}"));

        let transport = RelayTransport::new(single_relay_config().relay_chain(), Box::new(Rc::clone(&http)));
        transport.fetch_json("https://scriptblox.com/api/script/fetch?page=3")?;

        let requests = http.requests();
        assert!(requests[0].starts_with(RELAY_PREFIX));
        assert!(requests[0].contains("fetch?page=3&_t="));
        Ok(())
    }
}
