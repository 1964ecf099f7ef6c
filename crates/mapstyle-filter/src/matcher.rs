//! The matcher seam between filter specifications and the document core.

use crate::{Filter, FilterSpec};
use serde_json::Value;

/// Decides whether a feature matches a filter.
///
/// The document core only ever calls this with a concrete filter and a single
/// feature record. Closures of the same shape implement the trait, which keeps
/// test doubles short.
pub trait FeatureMatcher {
    /// Returns true if `feature` matches `filter`.
    fn matches(&self, filter: &FilterSpec, feature: &Value) -> bool;

    /// Clone the features that do **not** match `filter`, preserving order.
    ///
    /// Implementations that can compile a filter once should override this.
    fn retain_unmatched(&self, filter: &FilterSpec, features: &[Value]) -> Vec<Value> {
        features
            .iter()
            .filter(|feature| !self.matches(filter, feature))
            .cloned()
            .collect()
    }
}

impl<F> FeatureMatcher for F
where
    F: Fn(&FilterSpec, &Value) -> bool,
{
    fn matches(&self, filter: &FilterSpec, feature: &Value) -> bool {
        self(filter, feature)
    }
}

/// Matcher for the style-spec filter language.
///
/// An invalid filter matches nothing, so a malformed removal request never
/// deletes data.
#[derive(Clone, Copy, Debug, Default)]
pub struct StyleFilterMatcher;

impl StyleFilterMatcher {
    fn compile(filter: &FilterSpec) -> Option<Filter> {
        match Filter::from_spec(filter) {
            Ok(compiled) => Some(compiled),
            Err(error) => {
                tracing::warn!(%error, filter = %filter.as_value(), "invalid feature filter");
                None
            }
        }
    }
}

impl FeatureMatcher for StyleFilterMatcher {
    fn matches(&self, filter: &FilterSpec, feature: &Value) -> bool {
        Self::compile(filter).is_some_and(|f| f.evaluate(feature))
    }

    fn retain_unmatched(&self, filter: &FilterSpec, features: &[Value]) -> Vec<Value> {
        match Self::compile(filter) {
            Some(compiled) => features
                .iter()
                .filter(|feature| !compiled.evaluate(feature))
                .cloned()
                .collect(),
            None => features.to_vec(),
        }
    }
}
