//! Change detection between two document revisions.
//!
//! Renderers need to know what to re-upload after a transition. The version
//! counters answer that without deep comparison; `ChangeSet` collects them.

use crate::StyleDocument;
use std::collections::BTreeSet;
use std::sync::Arc;

/// What differs between two revisions of a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Root metadata moved: view fields, glyphs, sprite, or passthrough keys.
    pub view: bool,
    /// `layers_version` moved.
    pub layers: bool,
    /// `sources_version` moved.
    pub sources: bool,
    /// Sources present in both revisions whose `data_version` moved.
    pub data: BTreeSet<String>,
}

impl ChangeSet {
    /// Compare two revisions.
    ///
    /// Identical pointers short-circuit to an empty set. Counters are the
    /// primary signal; `Arc` identity catches a wholesale replacement that
    /// lands on equal counters. Mutations never swap a collection or source
    /// `Arc` without moving the matching counter.
    pub fn between(before: &StyleDocument, after: &StyleDocument) -> Self {
        if std::ptr::eq(before, after) {
            return Self::default();
        }

        let view = before.center != after.center
            || before.zoom != after.zoom
            || before.bearing != after.bearing
            || before.pitch != after.pitch
            || before.glyphs != after.glyphs
            || before.sprite != after.sprite
            || before.name != after.name
            || before.version != after.version
            || before.extra != after.extra;

        let layers = before.layers_version != after.layers_version
            || !Arc::ptr_eq(&before.layers, &after.layers);

        let mut sources = before.sources_version != after.sources_version
            || before.sources.len() != after.sources.len();
        let mut data = BTreeSet::new();
        for (name, source) in after.sources.iter() {
            let Some(old) = before.sources.get(name) else {
                sources = true;
                continue;
            };
            if Arc::ptr_eq(old, source) {
                continue;
            }
            if old.data_version != source.data_version {
                data.insert(name.clone());
            } else {
                // Same counter on a different record: the source was replaced.
                sources = true;
                if old.data != source.data {
                    data.insert(name.clone());
                }
            }
        }

        Self {
            view,
            layers,
            sources,
            data,
        }
    }

    /// True if nothing changed.
    pub fn is_empty(&self) -> bool {
        !self.view && !self.layers && !self.sources && self.data.is_empty()
    }

    /// True if the named source's feature data changed.
    #[inline]
    pub fn data_changed(&self, source: &str) -> bool {
        self.data.contains(source)
    }
}
