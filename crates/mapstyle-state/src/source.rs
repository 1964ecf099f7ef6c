//! Sources: named data providers consumed by layers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source type that never carries a feature-data lifecycle.
pub(crate) const RASTER: &str = "raster";

const OSM_TILES: [&str; 3] = [
    "https://a.tile.openstreetmap.org/{z}/{x}/{y}.png",
    "https://b.tile.openstreetmap.org/{z}/{x}/{y}.png",
    "https://c.tile.openstreetmap.org/{z}/{x}/{y}.png",
];

const OSM_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors.";

/// A data source.
///
/// `data` and `data_version` are only managed for sources that carry feature
/// data; see [`Source::carries_feature_data`]. Type-specific fields (`url`,
/// `tiles`, `tileSize`, ...) pass through in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Source type, e.g. `geojson` or `raster`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Inline GeoJSON, a URL, or an empty object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Incremented on every feature-data change.
    #[serde(
        rename = "_dataVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_version: Option<u64>,
    /// Type-specific fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Source {
    /// Create a source of the given type with no other fields.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// A GeoJSON source with inline data or a data URL.
    pub fn geojson(data: impl Into<Value>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::new("geojson")
        }
    }

    /// A raster tile source.
    pub fn raster_tiles<I, S>(tiles: I, tile_size: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tiles: Vec<Value> = tiles.into_iter().map(|t| Value::String(t.into())).collect();
        Self::new(RASTER)
            .with_field("tiles", tiles)
            .with_field("tileSize", tile_size)
    }

    /// The OpenStreetMap raster tile source.
    pub fn osm() -> Self {
        Self::raster_tiles(OSM_TILES, 256).with_field("attribution", OSM_ATTRIBUTION)
    }

    /// Set a type-specific field (builder pattern).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Check if this is a raster source.
    #[inline]
    pub fn is_raster(&self) -> bool {
        self.kind == RASTER
    }

    /// Check if this source has a feature-data lifecycle.
    #[inline]
    pub fn carries_feature_data(&self) -> bool {
        self.data_version.is_some()
    }

    /// The features held inline, if the data is a `FeatureCollection`.
    pub fn features(&self) -> Option<&[Value]> {
        match crate::geojson::DataShape::of(self.data.as_ref()) {
            crate::geojson::DataShape::Collection(features) => Some(features),
            _ => None,
        }
    }
}
