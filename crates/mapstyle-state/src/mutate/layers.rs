//! Layer mutations.

use super::{map_matching_layers, with_layers};
use crate::{Layer, LayerIdPolicy, LayerPatch, ReduceOptions, StyleDocument, StyleError, StyleResult};
use std::sync::Arc;

/// Append `layer_def` and bump `layers_version`.
///
/// Defaults (`filter: null`, `paint: {}`) are already carried by [`Layer`];
/// whatever the caller set wins. Fails only when `options` reject duplicate
/// ids and the id is taken.
pub fn add_layer(
    doc: &Arc<StyleDocument>,
    layer_def: Layer,
    options: &ReduceOptions,
) -> StyleResult<Arc<StyleDocument>> {
    if options.layer_ids == LayerIdPolicy::RejectDuplicates && doc.layer(&layer_def.id).is_some() {
        return Err(StyleError::duplicate_layer_id(layer_def.id));
    }

    let mut layers = Vec::with_capacity(doc.layers.len() + 1);
    layers.extend(doc.layers.iter().cloned());
    layers.push(Arc::new(layer_def));
    Ok(with_layers(doc, Arc::new(layers), 1))
}

/// Remove every layer whose id is `layer_id`.
pub fn remove_layer(
    doc: &Arc<StyleDocument>,
    layer_id: &str,
    options: &ReduceOptions,
) -> Arc<StyleDocument> {
    let matched = doc.layers.iter().any(|l| l.id == layer_id);
    let bump = options.layer_bump(matched);
    if !matched {
        if bump == 0 {
            return Arc::clone(doc);
        }
        return with_layers(doc, Arc::clone(&doc.layers), bump);
    }

    let layers: Vec<Arc<Layer>> = doc
        .layers
        .iter()
        .filter(|l| l.id != layer_id)
        .cloned()
        .collect();
    with_layers(doc, Arc::new(layers), bump)
}

/// Shallow-merge `patch` over every layer whose id is `layer_id`.
pub fn update_layer(
    doc: &Arc<StyleDocument>,
    layer_id: &str,
    patch: &LayerPatch,
    options: &ReduceOptions,
) -> Arc<StyleDocument> {
    match map_matching_layers(&doc.layers, layer_id, |layer| layer.patched(patch)) {
        Some(layers) => with_layers(doc, Arc::new(layers), options.layer_bump(true)),
        None => match options.layer_bump(false) {
            0 => Arc::clone(doc),
            bump => with_layers(doc, Arc::clone(&doc.layers), bump),
        },
    }
}
