//! GeoJSON shapes as far as feature-data transitions need them.

use serde_json::{Map, Value};

/// `type` of a single GeoJSON feature.
pub const FEATURE: &str = "Feature";

/// `type` of a GeoJSON feature collection.
pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Classification of a source's `data` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataShape<'a> {
    /// Absent, not an object, or an object without a usable `type`.
    Untyped,
    /// A single `Feature`.
    Feature(&'a Value),
    /// A `FeatureCollection` with an array of features.
    Collection(&'a [Value]),
    /// Typed, but neither of the above (a bare geometry, or a collection
    /// whose `features` is not an array).
    Unsupported,
}

impl<'a> DataShape<'a> {
    /// Classify `data`.
    pub fn of(data: Option<&'a Value>) -> Self {
        let Some(data) = data else {
            return DataShape::Untyped;
        };
        match data.get("type") {
            None | Some(Value::Null) => DataShape::Untyped,
            Some(Value::String(kind)) if kind.is_empty() => DataShape::Untyped,
            Some(Value::String(kind)) if kind == FEATURE => DataShape::Feature(data),
            Some(Value::String(kind)) if kind == FEATURE_COLLECTION => {
                match data.get("features").and_then(Value::as_array) {
                    Some(features) => DataShape::Collection(features),
                    None => DataShape::Unsupported,
                }
            }
            Some(_) => DataShape::Unsupported,
        }
    }
}

/// Build the partial data object `{type: FeatureCollection, features}`.
pub fn feature_collection(features: Vec<Value>) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("type".into(), Value::String(FEATURE_COLLECTION.into()));
    data.insert("features".into(), Value::Array(features));
    data
}
