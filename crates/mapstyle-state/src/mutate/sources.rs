//! Source mutations and the single feature-data write path.

use super::{insert_source, with_sources};
use crate::{Source, StyleDocument, StyleError, StyleResult};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Insert (or overwrite) the source `name` and bump `sources_version`.
///
/// Non-raster sources start with `data: {}` and `data_version: 0` unless the
/// definition sets them.
pub fn add_source(
    doc: &Arc<StyleDocument>,
    name: impl Into<String>,
    source_def: Source,
) -> Arc<StyleDocument> {
    let source = if source_def.is_raster() {
        source_def
    } else {
        Source {
            data: source_def
                .data
                .or_else(|| Some(Value::Object(Map::new()))),
            data_version: source_def.data_version.or(Some(0)),
            ..source_def
        }
    };
    with_sources(doc, insert_source(&doc.sources, name.into(), source), 1)
}

/// Delete the source `name` and bump `sources_version`, whether or not it
/// existed.
pub fn remove_source(doc: &Arc<StyleDocument>, name: &str) -> Arc<StyleDocument> {
    let sources = if doc.sources.contains_key(name) {
        let mut next = (*doc.sources).clone();
        next.remove(name);
        Arc::new(next)
    } else {
        Arc::clone(&doc.sources)
    };
    with_sources(doc, sources, 1)
}

/// Shallow-merge `partial` into the data of source `name` and bump its
/// `data_version` by one.
///
/// This is the only place `data_version` changes. `sources_version` is left
/// alone: a data edit is not an add/remove of a source.
pub(crate) fn change_data(
    doc: &Arc<StyleDocument>,
    name: &str,
    partial: Map<String, Value>,
) -> StyleResult<Arc<StyleDocument>> {
    let source = doc.require_source(name)?;
    let data_version = source
        .data_version
        .ok_or_else(|| StyleError::no_feature_data(name))?;

    let data = match &source.data {
        Some(Value::Object(existing)) => {
            let mut merged: Map<String, Value> = existing
                .iter()
                .filter(|(key, _)| !partial.contains_key(*key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            merged.extend(partial);
            merged
        }
        _ => partial,
    };

    let next = Source {
        data: Some(Value::Object(data)),
        data_version: Some(data_version.saturating_add(1)),
        ..Source::clone(source)
    };
    Ok(with_sources(
        doc,
        insert_source(&doc.sources, name.to_string(), next),
        0,
    ))
}
