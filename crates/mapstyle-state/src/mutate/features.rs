//! Feature collection mutations.
//!
//! Both operations normalize a source's data to a `FeatureCollection` and
//! install the result through [`change_data`], which bumps `data_version`.

use super::change_data;
use crate::geojson::{feature_collection, DataShape};
use crate::{StyleDocument, StyleResult};
use mapstyle_filter::{FeatureMatcher, FilterSpec};
use serde_json::Value;
use std::sync::Arc;

/// Append `features` to the data of source `name`.
///
/// | existing data        | result                                  |
/// |----------------------|-----------------------------------------|
/// | absent / untyped     | collection of the incoming features     |
/// | `Feature`            | collection of `[old, ...incoming]`      |
/// | `FeatureCollection`  | collection of `[...old, ...incoming]`   |
/// | anything else        | document unchanged                      |
pub fn add_features(
    doc: &Arc<StyleDocument>,
    name: &str,
    features: Vec<Value>,
) -> StyleResult<Arc<StyleDocument>> {
    let source = doc.require_source(name)?;

    let combined = match DataShape::of(source.data.as_ref()) {
        DataShape::Untyped => features,
        DataShape::Feature(single) => {
            let mut all = Vec::with_capacity(features.len() + 1);
            all.push(single.clone());
            all.extend(features);
            all
        }
        DataShape::Collection(existing) => {
            let mut all = Vec::with_capacity(existing.len() + features.len());
            all.extend_from_slice(existing);
            all.extend(features);
            all
        }
        DataShape::Unsupported => {
            tracing::trace!(source = name, "add_features: unsupported data shape, unchanged");
            return Ok(Arc::clone(doc));
        }
    };

    change_data(doc, name, feature_collection(combined))
}

/// Remove every feature of source `name` that matches `filter`.
///
/// The filter selects what to delete. A single matching `Feature` becomes an
/// empty collection; a single non-matching one, untyped data, and unsupported
/// shapes leave the document unchanged. A `FeatureCollection` is always
/// rewritten, even if nothing matched.
pub fn remove_features<M>(
    doc: &Arc<StyleDocument>,
    name: &str,
    filter: &FilterSpec,
    matcher: &M,
) -> StyleResult<Arc<StyleDocument>>
where
    M: FeatureMatcher + ?Sized,
{
    let source = doc.require_source(name)?;

    let remaining = match DataShape::of(source.data.as_ref()) {
        DataShape::Feature(single) if matcher.matches(filter, single) => Vec::new(),
        DataShape::Collection(existing) => matcher.retain_unmatched(filter, existing),
        _ => {
            tracing::trace!(source = name, "remove_features: nothing to remove, unchanged");
            return Ok(Arc::clone(doc));
        }
    };

    change_data(doc, name, feature_collection(remaining))
}
