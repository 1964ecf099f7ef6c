//! Pure document mutations.
//!
//! Every function takes the current document by `&Arc` and returns the next
//! one. A mutation that changes nothing returns `Arc::clone(doc)`, so callers
//! can detect no-ops with `Arc::ptr_eq`. New allocations are limited to the
//! changed path: the root, the changed collection, and the changed entry.

mod features;
mod layers;
mod sources;
mod view;

pub use features::{add_features, remove_features};
pub use layers::{add_layer, remove_layer, update_layer};
pub use sources::{add_source, remove_source};
pub use view::{set_glyphs, set_sprite, set_view, set_visibility};

pub(crate) use sources::change_data;

use crate::document::{Layers, Sources};
use crate::{Layer, Source, StyleDocument};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Replace the whole document with `context`, counters included.
pub fn set_context(context: StyleDocument) -> Arc<StyleDocument> {
    Arc::new(context)
}

/// New root sharing everything but `layers`; bumps `layers_version` by `bump`.
fn with_layers(doc: &StyleDocument, layers: Layers, bump: u64) -> Arc<StyleDocument> {
    Arc::new(StyleDocument {
        layers_version: doc.layers_version.saturating_add(bump),
        layers,
        ..doc.clone()
    })
}

/// New root sharing everything but `sources`; bumps `sources_version` by `bump`.
fn with_sources(doc: &StyleDocument, sources: Sources, bump: u64) -> Arc<StyleDocument> {
    Arc::new(StyleDocument {
        sources_version: doc.sources_version.saturating_add(bump),
        sources,
        ..doc.clone()
    })
}

/// Map matching layers through `f`, keeping every other layer's `Arc`.
///
/// Returns `None` when no layer has `layer_id`.
fn map_matching_layers(
    layers: &[Arc<Layer>],
    layer_id: &str,
    f: impl Fn(&Layer) -> Layer,
) -> Option<Vec<Arc<Layer>>> {
    if !layers.iter().any(|l| l.id == layer_id) {
        return None;
    }
    Some(
        layers
            .iter()
            .map(|layer| {
                if layer.id == layer_id {
                    Arc::new(f(layer))
                } else {
                    Arc::clone(layer)
                }
            })
            .collect(),
    )
}

/// Copy of `sources` with `name` set to `source`.
fn insert_source(
    sources: &BTreeMap<String, Arc<Source>>,
    name: String,
    source: Source,
) -> Sources {
    let mut next = sources.clone();
    next.insert(name, Arc::new(source));
    Arc::new(next)
}
