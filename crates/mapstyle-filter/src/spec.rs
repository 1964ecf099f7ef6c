use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A filter as written in a style document.
///
/// The wrapped value is kept verbatim so documents round-trip unchanged;
/// use [`Filter::parse`](crate::Filter::parse) to interpret it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec(Value);

impl FilterSpec {
    /// Wrap a raw JSON filter.
    #[inline]
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// A filter that matches every feature.
    #[inline]
    pub fn always() -> Self {
        Self(Value::Bool(true))
    }

    /// Borrow the raw JSON.
    #[inline]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume and return the raw JSON.
    #[inline]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for FilterSpec {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
