//! Relay (CORS proxy) rotation.
//!
//! A relay endpoint is a URL template with a `{url}` placeholder that is
//! replaced by the percent-encoded target URL. Relays are tried in order;
//! every attempt is bounded by the chain timeout and the first payload the
//! provider can parse wins.

use std::time::Duration;

use log::{debug, warn};

use crate::errors::MarketDataError;
use crate::provider::QuoteRequest;
use crate::transport::HttpTransport;

/// Default per-relay timeout.
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(5);

const URL_PLACEHOLDER: &str = "{url}";

/// One relay host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayEndpoint {
    pub name: String,
    pub template: String,
}

impl RelayEndpoint {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    /// Builds an endpoint from a bare template, naming it after its host.
    pub fn from_template(template: &str) -> Self {
        let name = template
            .split("://")
            .nth(1)
            .and_then(|rest| rest.split(['/', '?']).next())
            .unwrap_or(template);
        Self::new(name, template)
    }

    /// The relay URL for `target`. Templates without a placeholder get the
    /// encoded target appended.
    pub fn relay_url(&self, target: &str) -> String {
        let encoded = urlencoding::encode(target);
        if self.template.contains(URL_PLACEHOLDER) {
            self.template.replace(URL_PLACEHOLDER, &encoded)
        } else {
            format!("{}{}", self.template, encoded)
        }
    }
}

/// The relay hosts used when none are configured.
pub fn default_relays() -> Vec<RelayEndpoint> {
    vec![
        RelayEndpoint::new("allorigins", "https://api.allorigins.win/raw?url={url}"),
        RelayEndpoint::new("corsproxy", "https://corsproxy.io/?{url}"),
        RelayEndpoint::new("codetabs", "https://api.codetabs.com/v1/proxy?quest={url}"),
    ]
}

/// Ordered relay list with a per-attempt timeout.
#[derive(Clone, Debug)]
pub struct RelayChain {
    endpoints: Vec<RelayEndpoint>,
    timeout: Duration,
}

impl Default for RelayChain {
    fn default() -> Self {
        Self::new(default_relays(), DEFAULT_RELAY_TIMEOUT)
    }
}

impl RelayChain {
    pub fn new(endpoints: Vec<RelayEndpoint>, timeout: Duration) -> Self {
        Self { endpoints, timeout }
    }

    /// A chain with no relays. Relay-capable providers then only go direct.
    pub fn disabled() -> Self {
        Self::new(Vec::new(), DEFAULT_RELAY_TIMEOUT)
    }

    pub fn endpoints(&self) -> &[RelayEndpoint] {
        &self.endpoints
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Sends `request` through each relay in turn.
    ///
    /// An attempt that outlives the timeout is dropped and counts as a
    /// `Timeout`. Returns the parsed payload and the relay that served it,
    /// or `RelayFailed` once every relay has been tried.
    pub async fn fetch<T, P>(
        &self,
        transport: &dyn HttpTransport,
        request: &QuoteRequest,
        provider: &str,
        parse: P,
    ) -> Result<(T, String), MarketDataError>
    where
        P: Fn(&str) -> Result<T, MarketDataError>,
    {
        for endpoint in &self.endpoints {
            let relayed = request.with_url(endpoint.relay_url(&request.url));

            let outcome = tokio::time::timeout(
                self.timeout,
                transport.get(&relayed, self.timeout, provider),
            )
            .await
            .unwrap_or_else(|_| {
                Err(MarketDataError::Timeout {
                    provider: provider.to_string(),
                })
            });

            match outcome.and_then(|body| parse(&body)) {
                Ok(parsed) => {
                    debug!("{} answered via relay '{}'", provider, endpoint.name);
                    return Ok((parsed, endpoint.name.clone()));
                }
                Err(e) => {
                    warn!(
                        "Relay '{}' failed for {}: {}",
                        endpoint.name, provider, e
                    );
                }
            }
        }

        Err(MarketDataError::RelayFailed {
            provider: provider.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawQuote;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transport scripted per URL prefix; records every URL it sees.
    struct ScriptedTransport {
        script: Vec<(&'static str, Script)>,
        seen: Mutex<Vec<String>>,
    }

    #[derive(Clone)]
    enum Script {
        Body(&'static str),
        Fail,
        Hang,
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn get(
            &self,
            request: &QuoteRequest,
            _timeout: Duration,
            provider: &str,
        ) -> Result<String, MarketDataError> {
            self.seen.lock().unwrap().push(request.url.clone());
            let step = self
                .script
                .iter()
                .find(|(prefix, _)| request.url.starts_with(prefix))
                .map(|(_, s)| s.clone())
                .unwrap_or(Script::Fail);
            match step {
                Script::Body(body) => Ok(body.to_string()),
                Script::Fail => Err(MarketDataError::ProviderError {
                    provider: provider.to_string(),
                    message: "HTTP 502".to_string(),
                }),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
            }
        }
    }

    fn parse_price(body: &str) -> Result<RawQuote, MarketDataError> {
        body.parse::<f64>()
            .map(|p| RawQuote {
                price: Some(p),
                change: Some(0.0),
                ..Default::default()
            })
            .map_err(|_| MarketDataError::malformed("TEST", "not a number"))
    }

    fn chain() -> RelayChain {
        RelayChain::new(
            vec![
                RelayEndpoint::new("first", "https://first.test/?u={url}"),
                RelayEndpoint::new("second", "https://second.test/raw?url={url}"),
                RelayEndpoint::new("third", "https://third.test/{url}"),
            ],
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_relay_url_encodes_target() {
        let endpoint = RelayEndpoint::new("allorigins", "https://api.allorigins.win/raw?url={url}");
        assert_eq!(
            endpoint.relay_url("https://query1.finance.yahoo.com/v8/finance/chart/AAPL?range=1d"),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fquery1.finance.yahoo.com%2Fv8%2Ffinance%2Fchart%2FAAPL%3Frange%3D1d"
        );
    }

    #[test]
    fn test_template_without_placeholder_appends() {
        let endpoint = RelayEndpoint::new("plain", "https://relay.test/?");
        assert_eq!(endpoint.relay_url("https://a.b/c"), "https://relay.test/?https%3A%2F%2Fa.b%2Fc");
    }

    #[test]
    fn test_from_template_names_by_host() {
        let endpoint = RelayEndpoint::from_template("https://corsproxy.io/?{url}");
        assert_eq!(endpoint.name, "corsproxy.io");
    }

    #[test]
    fn test_default_relays_order() {
        let names: Vec<_> = default_relays().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["allorigins", "corsproxy", "codetabs"]);
    }

    #[tokio::test]
    async fn test_first_valid_payload_wins() {
        let transport = ScriptedTransport {
            script: vec![
                ("https://first.test", Script::Body("<html>captcha</html>")),
                ("https://second.test", Script::Body("101.5")),
                ("https://third.test", Script::Body("999")),
            ],
            seen: Mutex::new(Vec::new()),
        };
        let request = QuoteRequest::get("https://api.test/quote");

        let (raw, relay) = chain()
            .fetch(&transport, &request, "TEST", parse_price)
            .await
            .unwrap();

        assert_eq!(raw.price, Some(101.5));
        assert_eq!(relay, "second");
        assert_eq!(transport.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_relay_times_out_and_moves_on() {
        let transport = ScriptedTransport {
            script: vec![
                ("https://first.test", Script::Hang),
                ("https://second.test", Script::Fail),
                ("https://third.test", Script::Body("42")),
            ],
            seen: Mutex::new(Vec::new()),
        };
        let request = QuoteRequest::get("https://api.test/quote");

        let (raw, relay) = chain()
            .fetch(&transport, &request, "TEST", parse_price)
            .await
            .unwrap();

        assert_eq!(raw.price, Some(42.0));
        assert_eq!(relay, "third");
    }

    #[tokio::test]
    async fn test_all_relays_failing() {
        let transport = ScriptedTransport {
            script: vec![],
            seen: Mutex::new(Vec::new()),
        };
        let request = QuoteRequest::get("https://api.test/quote");

        let result = chain().fetch(&transport, &request, "TEST", parse_price).await;
        assert!(matches!(result, Err(MarketDataError::RelayFailed { .. })));
        assert_eq!(transport.seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_chain_fails_immediately() {
        let transport = ScriptedTransport {
            script: vec![],
            seen: Mutex::new(Vec::new()),
        };
        let request = QuoteRequest::get("https://api.test/quote");

        let result = RelayChain::disabled()
            .fetch(&transport, &request, "TEST", parse_price)
            .await;
        assert!(result.is_err());
        assert!(transport.seen.lock().unwrap().is_empty());
    }
}
