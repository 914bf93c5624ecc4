#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Hypercharts API client.
//!
//! This crate implements the [`FinancialsSource`] trait from
//! `hypercharts-core` on top of `reqwest`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hypercharts_client::{ClientConfig, HyperchartsClient};
//! use hypercharts_core::{FinancialsSource, Symbol};
//! use hypercharts_sink::TracingSink;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HyperchartsClient::new(ClientConfig::from_env()?, Arc::new(TracingSink))?;
//!     let payload = client.fetch_financials(&Symbol::new("AAPL")).await?;
//!     println!("{}", payload.as_value());
//!     Ok(())
//! }
//! ```

/// Client configuration.
pub mod config;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use async_trait::async_trait;
use hypercharts_core::{
    Credential, Event, EventKind, EventSink, FinancialsSource, HyperError, RawPayload, Result,
    Symbol,
};
use reqwest::{Client, StatusCode, Url};
use std::fmt;
use std::sync::Arc;

/// Client for the Hypercharts REST API.
///
/// Holds the API key, the base URL and the injected event sink; nothing else
/// survives between calls.
#[derive(Clone)]
pub struct HyperchartsClient {
    client: Client,
    base_url: Url,
    credential: Credential,
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for HyperchartsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperchartsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HyperchartsClient {
    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HyperError::InvalidParameter`] if the base URL does not parse,
    /// or [`HyperError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, sink: Arc<dyn EventSink>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HyperError::transport(e.to_string()))?;
        Self::with_client(client, config, sink)
    }

    /// Create a client with a custom HTTP client.
    ///
    /// The timeout in `config` is ignored; the given client's settings apply.
    ///
    /// # Errors
    ///
    /// Returns [`HyperError::InvalidParameter`] if the base URL does not parse.
    pub fn with_client(
        client: Client,
        config: ClientConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
            credential: config.credential,
            sink,
        })
    }

    /// Returns the base URL resources are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request URL for a resource, with symbol and API key appended.
    fn url(&self, resource: &str, symbol: Option<&Symbol>) -> Result<Url> {
        let mut url = self
            .base_url
            .join(resource.trim_start_matches('/'))
            .map_err(|e| HyperError::InvalidParameter(format!("resource {resource:?}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(symbol) = symbol {
                query.append_pair("symbol", symbol.as_str());
            }
            query.append_pair("apiKey", self.credential.expose());
        }
        Ok(url)
    }

    /// Issue the GET and classify the response.
    async fn request(&self, resource: &str, symbol: Option<&Symbol>) -> Result<RawPayload> {
        let url = self.url(resource, symbol)?;
        tracing::debug!(
            resource,
            symbol = symbol.map(Symbol::as_str),
            "Hypercharts request"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HyperError::transport(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| HyperError::Transport {
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        match status {
            StatusCode::OK => serde_json::from_str(&text)
                .map(RawPayload::new)
                .map_err(|e| HyperError::Decode(e.to_string())),
            StatusCode::NOT_FOUND => Err(HyperError::ResourceNotFound(resource.to_string())),
            StatusCode::BAD_REQUEST => Err(HyperError::BadRequest(api_error_message(&text))),
            _ => Err(HyperError::Transport {
                status: Some(status.as_u16()),
                message: if text.is_empty() {
                    status.to_string()
                } else {
                    text
                },
            }),
        }
    }

    /// Emit the single outcome event for a call.
    fn record(&self, resource: &str, symbol: Option<&Symbol>, result: &Result<RawPayload>) {
        let target = match symbol {
            Some(symbol) => format!("{resource} for {symbol}"),
            None => resource.to_string(),
        };
        match result {
            Ok(_) => self.sink.info(
                Event::new(EventKind::FetchSucceeded, format!("Fetched {target}")).with_status(200),
            ),
            Err(err @ HyperError::ResourceNotFound(_)) => self
                .sink
                .error(Event::new(EventKind::ResourceNotFound, err.to_string()).with_status(404)),
            Err(HyperError::BadRequest(message)) => self
                .sink
                .error(Event::new(EventKind::BadRequest, message.clone()).with_status(400)),
            Err(err) => {
                let event = Event::new(
                    EventKind::TransportFailed,
                    format!("Fetching {target} failed: {err}"),
                );
                let event = match err.status() {
                    Some(status) => event.with_status(status),
                    None => event,
                };
                self.sink.error(event);
            }
        }
    }
}

#[async_trait]
impl FinancialsSource for HyperchartsClient {
    fn name(&self) -> &str {
        "Hypercharts"
    }

    async fn fetch(&self, resource: &str, symbol: Option<&Symbol>) -> Result<RawPayload> {
        let result = self.request(resource, symbol).await;
        self.record(resource, symbol, &result);
        result
    }
}

/// Parse the base URL, making sure relative joins keep its last segment.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    let url = Url::parse(&normalized)
        .map_err(|e| HyperError::InvalidParameter(format!("base URL {base_url:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(HyperError::InvalidParameter(format!(
            "base URL {base_url:?} cannot be a base"
        )));
    }
    Ok(url)
}

/// Extract the `error` field of a 400 body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypercharts_sink::NoopSink;

    fn client(base_url: &str) -> HyperchartsClient {
        let credential = Credential::new("test_key", "API_KEY").unwrap();
        let config = ClientConfig::new(credential).with_base_url(base_url);
        HyperchartsClient::new(config, Arc::new(NoopSink)).unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = client(DEFAULT_BASE_URL);
        assert_eq!(
            client
                .url("financials", Some(&Symbol::new("aapl")))
                .unwrap()
                .as_str(),
            "https://api.hypercharts.co/v1/financials?symbol=AAPL&apiKey=test_key"
        );
        assert_eq!(
            client.url("financials", None).unwrap().as_str(),
            "https://api.hypercharts.co/v1/financials?apiKey=test_key"
        );
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let client = client("https://api.hypercharts.co/v1");
        assert_eq!(
            client.url("/financials", None).unwrap().as_str(),
            "https://api.hypercharts.co/v1/financials?apiKey=test_key"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let credential = Credential::new("test_key", "API_KEY").unwrap();
        let config = ClientConfig::new(credential).with_base_url("not a url");
        let err = HyperchartsClient::new(config, Arc::new(NoopSink)).unwrap_err();
        assert!(matches!(err, HyperError::InvalidParameter(_)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let credential = Credential::new("secret_key_12345", "API_KEY").unwrap();
        let client =
            HyperchartsClient::new(ClientConfig::new(credential), Arc::new(NoopSink)).unwrap();
        let debug_str = format!("{client:?}");
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(api_error_message(r#"{"error": "bad symbol"}"#), "bad symbol");
        assert_eq!(api_error_message("plain text"), "plain text");
        assert_eq!(api_error_message(r#"{"message": "x"}"#), r#"{"message": "x"}"#);
    }
}
