//! Client configuration.

use std::time::Duration;

use hypercharts_core::{Credential, HyperError, Result};

/// Base URL of the public Hypercharts API.
pub const DEFAULT_BASE_URL: &str = "https://api.hypercharts.co/v1/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "HYPERCHARTS_BASE_URL";
/// Environment variable overriding the timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "HYPERCHARTS_TIMEOUT_SECS";

/// Settings for [`HyperchartsClient`](crate::HyperchartsClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API root; resources are resolved relative to it.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// API key sent with every request.
    pub credential: Credential,
}

impl ClientConfig {
    /// Configuration for the public API with the default timeout.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            credential,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HyperError::MissingCredential`] if `API_KEY` is unset or empty,
    /// and [`HyperError::InvalidParameter`] if the timeout is not a number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let key = lookup(API_KEY_VAR)
            .ok_or_else(|| HyperError::MissingCredential(API_KEY_VAR.to_string()))?;
        let mut config = Self::new(Credential::new(key, API_KEY_VAR)?);

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|s| !s.trim().is_empty()) {
            config.base_url = base_url;
        }

        if let Some(secs) = lookup(TIMEOUT_VAR).filter(|s| !s.trim().is_empty()) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                HyperError::InvalidParameter(format!(
                    "{TIMEOUT_VAR} must be whole seconds, got {secs:?}"
                ))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |k| vars.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("API_KEY", "abc")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
        assert_eq!(config.credential.expose(), "abc");
    }

    #[test]
    fn test_missing_key() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, HyperError::MissingCredential("API_KEY".to_string()));

        let err = ClientConfig::from_lookup(lookup(&[("API_KEY", "")])).unwrap_err();
        assert_eq!(err, HyperError::MissingCredential("API_KEY".to_string()));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("API_KEY", "abc"),
            ("HYPERCHARTS_BASE_URL", "http://localhost:8080/v1"),
            ("HYPERCHARTS_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));

        let config = ClientConfig::from_lookup(lookup(&[
            ("API_KEY", "abc"),
            ("HYPERCHARTS_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("API_KEY", "abc"),
            ("HYPERCHARTS_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, HyperError::InvalidParameter(_)));
    }
}
