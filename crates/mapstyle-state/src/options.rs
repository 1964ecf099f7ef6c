//! Reducer configuration.

use serde::{Deserialize, Serialize};

/// When layer removal and update bump `layers_version`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerVersioning {
    /// Bump on every remove/update, even when no layer matched.
    #[default]
    Always,
    /// Bump only when at least one layer matched.
    OnMatch,
}

/// Whether `add_layer` accepts an id that is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerIdPolicy {
    /// Duplicates are stored; update/remove act on every match.
    #[default]
    AllowDuplicates,
    /// Adding a layer whose id exists fails with `DuplicateLayerId`.
    RejectDuplicates,
}

/// Options that change how transitions are interpreted.
///
/// The default reproduces the permissive behavior: duplicate layer ids are
/// allowed and layer removal/update always bump the counter.
///
/// # Examples
///
/// ```
/// use mapstyle_state::{LayerIdPolicy, LayerVersioning, ReduceOptions};
///
/// let options = ReduceOptions::default().with_layer_versioning(LayerVersioning::OnMatch);
/// assert_eq!(options.layer_ids, LayerIdPolicy::AllowDuplicates);
/// assert_eq!(ReduceOptions::strict().layer_ids, LayerIdPolicy::RejectDuplicates);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceOptions {
    /// Counter policy for layer removal and update.
    pub layer_versioning: LayerVersioning,
    /// Duplicate id policy for layer addition.
    pub layer_ids: LayerIdPolicy,
}

impl ReduceOptions {
    /// Counters bump only on real changes and layer ids must be unique.
    pub fn strict() -> Self {
        Self {
            layer_versioning: LayerVersioning::OnMatch,
            layer_ids: LayerIdPolicy::RejectDuplicates,
        }
    }

    /// Set the layer counter policy.
    pub fn with_layer_versioning(mut self, layer_versioning: LayerVersioning) -> Self {
        self.layer_versioning = layer_versioning;
        self
    }

    /// Set the duplicate id policy.
    pub fn with_layer_ids(mut self, layer_ids: LayerIdPolicy) -> Self {
        self.layer_ids = layer_ids;
        self
    }

    /// The counter increment for a layer removal/update that matched
    /// `matched` layers.
    pub(crate) fn layer_bump(&self, matched: bool) -> u64 {
        match (self.layer_versioning, matched) {
            (LayerVersioning::Always, _) | (LayerVersioning::OnMatch, true) => 1,
            (LayerVersioning::OnMatch, false) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layer_bump() {
        let permissive = ReduceOptions::default();
        assert_eq!(permissive.layer_bump(false), 1);
        assert_eq!(permissive.layer_bump(true), 1);

        let strict = ReduceOptions::strict();
        assert_eq!(strict.layer_bump(false), 0);
        assert_eq!(strict.layer_bump(true), 1);
    }

    #[test]
    fn test_options_deserialize_partially() {
        let options: ReduceOptions =
            serde_json::from_value(json!({"layer_versioning": "on_match"})).unwrap();
        assert_eq!(options.layer_versioning, LayerVersioning::OnMatch);
        assert_eq!(options.layer_ids, LayerIdPolicy::AllowDuplicates);
    }
}
