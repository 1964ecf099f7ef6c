//! The style document root.

use crate::{Layer, Source, StyleError, StyleResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Ordered layer list; each layer is shared independently.
pub type Layers = Arc<Vec<Arc<Layer>>>;

/// Sources keyed by name; each source is shared independently.
pub type Sources = Arc<BTreeMap<String, Arc<Source>>>;

/// The map style document.
///
/// Treated as immutable: transitions build a new value and reuse every `Arc`
/// they do not change, so consumers can detect change by pointer or by the
/// version counters without deep comparison.
///
/// Counters serialize as `_layersVersion`, `_sourcesVersion` (and
/// `_dataVersion` on sources) so previously saved documents hydrate as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style spec version. Opaque to the store.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Document name. Opaque to the store.
    #[serde(default = "default_name")]
    pub name: String,
    /// View center as `[lng, lat]`.
    #[serde(default)]
    pub center: [f64; 2],
    /// View zoom.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// View bearing in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    /// View pitch in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    /// Glyph URL template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    /// Sprite URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    /// Bumped whenever a source is added or removed.
    #[serde(rename = "_sourcesVersion", default)]
    pub sources_version: u64,
    /// Sources by name.
    #[serde(default)]
    pub sources: Sources,
    /// Bumped whenever layers are added, removed, or updated.
    #[serde(rename = "_layersVersion", default)]
    pub layers_version: u64,
    /// Layers in draw order.
    #[serde(default)]
    pub layers: Layers,
    /// Any other root keys, passed through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> u32 {
    8
}

fn default_name() -> String {
    "default".to_string()
}

fn default_zoom() -> f64 {
    3.0
}

impl Default for StyleDocument {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: default_name(),
            center: [0.0, 0.0],
            zoom: default_zoom(),
            bearing: None,
            pitch: None,
            glyphs: None,
            sprite: None,
            sources_version: 0,
            sources: Sources::default(),
            layers_version: 0,
            layers: Layers::default(),
            extra: Map::new(),
        }
    }
}

impl StyleDocument {
    /// Hydrate a document from its JSON text.
    pub fn from_json(text: &str) -> StyleResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Hydrate a document from a JSON value.
    pub fn from_value(value: Value) -> StyleResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> StyleResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> StyleResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Look up a source by name.
    #[inline]
    pub fn get_source(&self, name: &str) -> Option<&Source> {
        self.sources.get(name).map(Arc::as_ref)
    }

    /// Look up a source that the caller requires to exist.
    pub(crate) fn require_source(&self, name: &str) -> StyleResult<&Arc<Source>> {
        self.sources
            .get(name)
            .ok_or_else(|| StyleError::source_not_found(name))
    }

    /// The first layer with the given id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id).map(Arc::as_ref)
    }

    /// Iterate layers in draw order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter().map(Arc::as_ref)
    }

    /// Ids of all layers in draw order.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }
}

/// Typed partial update for the view fields of a document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPatch {
    /// New center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    /// New zoom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// New bearing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    /// New pitch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

impl ViewPatch {
    /// Create an empty view patch.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the center.
    pub fn with_center(mut self, center: [f64; 2]) -> Self {
        self.center = Some(center);
        self
    }

    /// Set the zoom.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Set the bearing.
    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = Some(bearing);
        self
    }

    /// Set the pitch.
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Write the listed fields onto `doc`.
    pub(crate) fn apply_to(&self, doc: &mut StyleDocument) {
        if let Some(center) = self.center {
            doc.center = center;
        }
        if let Some(zoom) = self.zoom {
            doc.zoom = zoom;
        }
        if self.bearing.is_some() {
            doc.bearing = self.bearing;
        }
        if self.pitch.is_some() {
            doc.pitch = self.pitch;
        }
    }
}
