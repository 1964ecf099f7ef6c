//! Transitions: the closed set of document changes.

use crate::{Layer, LayerPatch, Source, StyleDocument, ViewPatch, Visibility};
use mapstyle_filter::FilterSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to change the document in one specific way.
///
/// Serialized with a `type` tag. Tags this build does not know deserialize to
/// [`Transition::Unknown`], which the reducer treats as the identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    /// Merge view fields onto the root.
    SetView {
        /// Fields to set.
        view: ViewPatch,
    },

    /// Append a layer.
    AddLayer {
        /// The layer; missing fields take layer defaults.
        layer_def: Layer,
    },

    /// Remove every layer with an id.
    RemoveLayer {
        /// Target id.
        layer_id: String,
    },

    /// Patch every layer with an id.
    UpdateLayer {
        /// Target id.
        layer_id: String,
        /// Fields to replace.
        layer_def: LayerPatch,
    },

    /// Insert or overwrite a source.
    AddSource {
        /// Key in `sources`.
        source_name: String,
        /// The source definition.
        source_def: Source,
    },

    /// Delete a source.
    RemoveSource {
        /// Key in `sources`.
        source_name: String,
    },

    /// Append features to a source's data.
    AddFeatures {
        /// Target source.
        source_name: String,
        /// GeoJSON features.
        features: Vec<Value>,
    },

    /// Delete the features of a source that match a filter.
    RemoveFeatures {
        /// Target source.
        source_name: String,
        /// Selects the features to delete.
        filter: FilterSpec,
    },

    /// Show or hide every layer with an id.
    SetLayerVisibility {
        /// Target id.
        layer_id: String,
        /// New visibility.
        visibility: Visibility,
    },

    /// Replace the whole document.
    ReceiveContext {
        /// The replacement.
        context: Box<StyleDocument>,
    },

    /// Set the glyph URL template.
    SetGlyphs {
        /// URL template.
        glyphs: String,
    },

    /// Set the sprite URL.
    SetSprite {
        /// URL.
        sprite: String,
    },

    /// Any tag this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl Transition {
    // Convenience constructors

    /// Create a SetView transition.
    pub fn set_view(view: ViewPatch) -> Self {
        Transition::SetView { view }
    }

    /// Create an AddLayer transition.
    pub fn add_layer(layer_def: Layer) -> Self {
        Transition::AddLayer { layer_def }
    }

    /// Create a RemoveLayer transition.
    pub fn remove_layer(layer_id: impl Into<String>) -> Self {
        Transition::RemoveLayer {
            layer_id: layer_id.into(),
        }
    }

    /// Create an UpdateLayer transition.
    pub fn update_layer(layer_id: impl Into<String>, layer_def: LayerPatch) -> Self {
        Transition::UpdateLayer {
            layer_id: layer_id.into(),
            layer_def,
        }
    }

    /// Create an AddSource transition.
    pub fn add_source(source_name: impl Into<String>, source_def: Source) -> Self {
        Transition::AddSource {
            source_name: source_name.into(),
            source_def,
        }
    }

    /// Create a RemoveSource transition.
    pub fn remove_source(source_name: impl Into<String>) -> Self {
        Transition::RemoveSource {
            source_name: source_name.into(),
        }
    }

    /// Create an AddFeatures transition.
    pub fn add_features(source_name: impl Into<String>, features: Vec<Value>) -> Self {
        Transition::AddFeatures {
            source_name: source_name.into(),
            features,
        }
    }

    /// Create a RemoveFeatures transition.
    pub fn remove_features(source_name: impl Into<String>, filter: impl Into<FilterSpec>) -> Self {
        Transition::RemoveFeatures {
            source_name: source_name.into(),
            filter: filter.into(),
        }
    }

    /// Create a SetLayerVisibility transition.
    pub fn set_layer_visibility(layer_id: impl Into<String>, visibility: Visibility) -> Self {
        Transition::SetLayerVisibility {
            layer_id: layer_id.into(),
            visibility,
        }
    }

    /// Create a ReceiveContext transition.
    pub fn receive_context(context: StyleDocument) -> Self {
        Transition::ReceiveContext {
            context: Box::new(context),
        }
    }

    /// Create a SetGlyphs transition.
    pub fn set_glyphs(glyphs: impl Into<String>) -> Self {
        Transition::SetGlyphs {
            glyphs: glyphs.into(),
        }
    }

    /// Create a SetSprite transition.
    pub fn set_sprite(sprite: impl Into<String>) -> Self {
        Transition::SetSprite {
            sprite: sprite.into(),
        }
    }

    /// Get the transition's tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Transition::SetView { .. } => "set_view",
            Transition::AddLayer { .. } => "add_layer",
            Transition::RemoveLayer { .. } => "remove_layer",
            Transition::UpdateLayer { .. } => "update_layer",
            Transition::AddSource { .. } => "add_source",
            Transition::RemoveSource { .. } => "remove_source",
            Transition::AddFeatures { .. } => "add_features",
            Transition::RemoveFeatures { .. } => "remove_features",
            Transition::SetLayerVisibility { .. } => "set_layer_visibility",
            Transition::ReceiveContext { .. } => "receive_context",
            Transition::SetGlyphs { .. } => "set_glyphs",
            Transition::SetSprite { .. } => "set_sprite",
            Transition::Unknown => "unknown",
        }
    }
}
