//! Visibility, view, and root resource mutations.

use super::{map_matching_layers, with_layers};
use crate::{StyleDocument, ViewPatch, Visibility};
use std::sync::Arc;

/// Set `layout.visibility` on every layer whose id is `layer_id`.
///
/// `layers_version` moves by exactly one when something matched. When nothing
/// matched the input document is returned.
pub fn set_visibility(
    doc: &Arc<StyleDocument>,
    layer_id: &str,
    visibility: Visibility,
) -> Arc<StyleDocument> {
    match map_matching_layers(&doc.layers, layer_id, |layer| {
        layer.with_visibility(visibility)
    }) {
        Some(layers) => with_layers(doc, Arc::new(layers), 1),
        None => Arc::clone(doc),
    }
}

/// Merge the listed view fields onto the document root. No counter moves.
pub fn set_view(doc: &Arc<StyleDocument>, view: &ViewPatch) -> Arc<StyleDocument> {
    let mut next = StyleDocument::clone(doc);
    view.apply_to(&mut next);
    Arc::new(next)
}

/// Set the glyph URL template. No counter moves.
pub fn set_glyphs(doc: &Arc<StyleDocument>, glyphs: impl Into<String>) -> Arc<StyleDocument> {
    Arc::new(StyleDocument {
        glyphs: Some(glyphs.into()),
        ..StyleDocument::clone(doc)
    })
}

/// Set the sprite URL. No counter moves.
pub fn set_sprite(doc: &Arc<StyleDocument>, sprite: impl Into<String>) -> Arc<StyleDocument> {
    Arc::new(StyleDocument {
        sprite: Some(sprite.into()),
        ..StyleDocument::clone(doc)
    })
}
