//! Source trait for fetching Hypercharts resources.
//!
//! [`FinancialsSource`] is the seam between the HTTP client and everything
//! downstream of it. The pipeline only needs something that can turn a
//! resource name and symbol into a [`RawPayload`], which keeps it testable
//! without a network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

use crate::{error::Result, types::Symbol};

/// Name of the quarterly financials resource.
pub const FINANCIALS_RESOURCE: &str = "financials";

/// A decoded JSON response body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(Value);

impl RawPayload {
    /// Wraps a JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the top-level value for `key`, if the body is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the payload and returns the JSON value.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Anything that can fetch Hypercharts resources.
#[async_trait]
pub trait FinancialsSource: Send + Sync + Debug {
    /// Returns the name of this source.
    fn name(&self) -> &str;

    /// Fetches a resource, optionally scoped to a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`HyperError::ResourceNotFound`](crate::HyperError::ResourceNotFound)
    /// on 404, [`HyperError::BadRequest`](crate::HyperError::BadRequest) on 400,
    /// and [`HyperError::Transport`](crate::HyperError::Transport) for anything
    /// else that is not a decodable 200.
    async fn fetch(&self, resource: &str, symbol: Option<&Symbol>) -> Result<RawPayload>;

    /// Fetches the quarterly financials for a symbol.
    async fn fetch_financials(&self, symbol: &Symbol) -> Result<RawPayload> {
        self.fetch(FINANCIALS_RESOURCE, Some(symbol)).await
    }
}
