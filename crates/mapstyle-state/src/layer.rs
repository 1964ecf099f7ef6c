//! Layers: ordered drawing instructions.
//!
//! The store only interprets `id`, `filter`, `paint`, and `layout.visibility`.
//! Everything else a style defines (`type`, `source`, `source-layer`, zoom
//! ranges, ...) lives in the flattened `extra` map and round-trips untouched.

use mapstyle_filter::FilterSpec;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Whether a layer is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Drawn.
    #[serde(rename = "visible")]
    Visible,
    /// Not drawn. Serialized as `"none"`.
    #[serde(rename = "none")]
    Hidden,
}

/// Layout properties of a layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Visibility, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// All other layout properties.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// A rendering layer.
///
/// Deserializing a partial record fills the layer defaults: no filter and an
/// empty paint map. Caller-provided fields always win.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer id. Not required to be unique.
    #[serde(default)]
    pub id: String,
    /// Feature filter, `null` when absent.
    #[serde(default)]
    pub filter: Option<FilterSpec>,
    /// Paint properties.
    #[serde(default)]
    pub paint: Map<String, Value>,
    /// Layout properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Style-defined fields the store passes through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Layer {
    /// Create a layer with the given id and default fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the filter (builder pattern).
    pub fn with_filter(mut self, filter: impl Into<FilterSpec>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set a paint property (builder pattern).
    pub fn with_paint(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.paint.insert(key.into(), value.into());
        self
    }

    /// Set a layout property (builder pattern).
    pub fn with_layout(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.layout
            .get_or_insert_with(Layout::default)
            .properties
            .insert(key.into(), value.into());
        self
    }

    /// Set a pass-through field such as `type` or `source` (builder pattern).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The style layer type (`fill`, `line`, `raster`, ...), if set.
    pub fn kind(&self) -> Option<&str> {
        self.extra.get("type").and_then(Value::as_str)
    }

    /// The source this layer draws from, if set.
    pub fn source(&self) -> Option<&str> {
        self.extra.get("source").and_then(Value::as_str)
    }

    /// The layer's visibility, if one was set.
    pub fn visibility(&self) -> Option<Visibility> {
        self.layout.as_ref().and_then(|layout| layout.visibility)
    }

    /// Return a copy of this layer with `patch` shallow-merged over it.
    ///
    /// Fields present in the patch replace the layer's; pass-through keys are
    /// merged one by one.
    pub fn patched(&self, patch: &LayerPatch) -> Self {
        let mut next = self.clone();
        if let Some(id) = &patch.id {
            next.id = id.clone();
        }
        if let Some(filter) = &patch.filter {
            next.filter = filter.clone();
        }
        if let Some(paint) = &patch.paint {
            next.paint = paint.clone();
        }
        if let Some(layout) = &patch.layout {
            next.layout = Some(layout.clone());
        }
        if let Some(metadata) = &patch.metadata {
            next.metadata = Some(metadata.clone());
        }
        for (key, value) in &patch.extra {
            next.extra.insert(key.clone(), value.clone());
        }
        next
    }

    /// Return a copy of this layer with `layout.visibility` replaced.
    pub(crate) fn with_visibility(&self, visibility: Visibility) -> Self {
        let mut next = self.clone();
        next.layout.get_or_insert_with(Layout::default).visibility = Some(visibility);
        next
    }
}

/// Typed partial update for a layer.
///
/// Only listed fields are merge targets. `filter` distinguishes "leave alone"
/// (`None`) from "clear" (`Some(None)`, serialized as `null`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerPatch {
    /// New id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// New filter, or `Some(None)` to clear it.
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub filter: Option<Option<FilterSpec>>,
    /// Replacement paint map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paint: Option<Map<String, Value>>,
    /// Replacement layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    /// Replacement metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Pass-through keys merged individually.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayerPatch {
    /// Create an empty patch.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the filter.
    pub fn with_filter(mut self, filter: impl Into<FilterSpec>) -> Self {
        self.filter = Some(Some(filter.into()));
        self
    }

    /// Clear the filter.
    pub fn clear_filter(mut self) -> Self {
        self.filter = Some(None);
        self
    }

    /// Replace the whole paint map.
    pub fn with_paint(mut self, paint: Map<String, Value>) -> Self {
        self.paint = Some(paint);
        self
    }

    /// Replace the whole layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Replace the metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set a pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.filter.is_none()
            && self.paint.is_none()
            && self.layout.is_none()
            && self.metadata.is_none()
            && self.extra.is_empty()
    }
}

/// A present key becomes `Some(..)`, even when its value is `null`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
