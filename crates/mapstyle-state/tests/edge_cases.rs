//! Edge cases: missing targets, raster sources, strict options, hydration.

use mapstyle_state::{
    reduce, Layer, LayerPatch, Reducer, ReduceOptions, Source, StyleDocument, StyleError,
    Transition, Visibility,
};
use serde_json::json;
use std::sync::Arc;

fn empty() -> Arc<StyleDocument> {
    Arc::new(StyleDocument::default())
}

// ============================================================================
// Missing targets
// ============================================================================

#[test]
fn test_features_on_missing_source_fail() {
    let doc = empty();

    let err = reduce(&doc, Transition::add_features("nope", vec![])).unwrap_err();
    assert!(matches!(err, StyleError::SourceNotFound { ref source_name } if source_name == "nope"));
    assert!(err.to_string().contains("nope"));

    let err = reduce(&doc, Transition::remove_features("nope", json!(true))).unwrap_err();
    assert!(matches!(err, StyleError::SourceNotFound { .. }));
}

#[test]
fn test_remove_missing_layer_over_signals_by_default() {
    let doc = empty();
    let next = reduce(&doc, Transition::remove_layer("nope")).unwrap();
    assert_eq!(next.layers_version, 1);
    assert!(next.layers.is_empty());

    let next = reduce(
        &next,
        Transition::update_layer("nope", LayerPatch::new().with_field("type", "fill")),
    )
    .unwrap();
    assert_eq!(next.layers_version, 2);
}

#[test]
fn test_remove_missing_source_still_bumps() {
    let doc = empty();
    let next = reduce(&doc, Transition::remove_source("nope")).unwrap();
    assert_eq!(next.sources_version, 1);
    assert!(Arc::ptr_eq(&next.sources, &doc.sources));
}

// ============================================================================
// Raster sources
// ============================================================================

#[test]
fn test_raster_source_has_no_data_lifecycle() {
    let doc = reduce(
        &empty(),
        Transition::add_source("tiles", Source::raster_tiles(["https://t.example/{z}/{x}/{y}.png"], 512)),
    )
    .unwrap();

    let tiles = doc.get_source("tiles").unwrap();
    assert_eq!(tiles.data, None);
    assert_eq!(tiles.data_version, None);
    assert_eq!(tiles.extra["tileSize"], 512);

    let err = reduce(&doc, Transition::add_features("tiles", vec![json!({"type": "Feature"})]))
        .unwrap_err();
    assert!(matches!(err, StyleError::NoFeatureData { .. }));

    // Untyped data short-circuits before the data write path.
    let same = reduce(&doc, Transition::remove_features("tiles", json!(true))).unwrap();
    assert!(Arc::ptr_eq(&same, &doc));
}

// ============================================================================
// Duplicate layer ids
// ============================================================================

#[test]
fn test_duplicate_ids_act_on_every_match() {
    let doc = [Layer::new("dup").with_paint("fill-color", "#f00"), Layer::new("other"), Layer::new("dup")]
        .into_iter()
        .fold(empty(), |doc, layer| reduce(&doc, Transition::add_layer(layer)).unwrap());

    let hidden = reduce(&doc, Transition::set_layer_visibility("dup", Visibility::Hidden)).unwrap();
    let hidden_count = hidden
        .layers()
        .filter(|l| l.visibility() == Some(Visibility::Hidden))
        .count();
    assert_eq!(hidden_count, 2);
    assert_eq!(hidden.layers_version, doc.layers_version + 1);

    let removed = reduce(&doc, Transition::remove_layer("dup")).unwrap();
    assert_eq!(removed.layer_ids(), vec!["other"]);
}

#[test]
fn test_strict_options() {
    let reducer = Reducer::new().with_options(ReduceOptions::strict());
    let doc = reducer.apply(&empty(), Transition::add_layer(Layer::new("a"))).unwrap();

    let err = reducer
        .apply(&doc, Transition::add_layer(Layer::new("a")))
        .unwrap_err();
    assert!(matches!(err, StyleError::DuplicateLayerId { .. }));

    let same = reducer.apply(&doc, Transition::remove_layer("zzz")).unwrap();
    assert!(Arc::ptr_eq(&same, &doc));

    let same = reducer
        .apply(&doc, Transition::update_layer("zzz", LayerPatch::new().clear_filter()))
        .unwrap();
    assert!(Arc::ptr_eq(&same, &doc));
}

// ============================================================================
// Layer patches
// ============================================================================

#[test]
fn test_update_replaces_listed_fields_only() {
    let doc = reduce(
        &empty(),
        Transition::add_layer(
            Layer::new("roads")
                .with_filter(json!(["==", "class", "primary"]))
                .with_paint("line-color", "#333")
                .with_field("type", "line"),
        ),
    )
    .unwrap();

    let patch: LayerPatch = serde_json::from_value(json!({
        "filter": null,
        "paint": {"line-width": 2}
    }))
    .unwrap();
    let next = reduce(&doc, Transition::update_layer("roads", patch)).unwrap();

    let roads = next.layer("roads").unwrap();
    assert_eq!(roads.filter, None);
    assert_eq!(roads.paint.get("line-color"), None);
    assert_eq!(roads.paint["line-width"], 2);
    assert_eq!(roads.kind(), Some("line"));
}

// ============================================================================
// Hydration
// ============================================================================

#[test]
fn test_receive_context_from_json() {
    let saved = r#"{
        "version": 8,
        "name": "saved",
        "center": [-15, 30],
        "zoom": 2,
        "_sourcesVersion": 7,
        "sources": {
            "pts": {
                "type": "geojson",
                "data": {"type": "FeatureCollection", "features": []},
                "_dataVersion": 12
            }
        },
        "_layersVersion": 3,
        "layers": [{"id": "pts-circles", "type": "circle", "source": "pts"}]
    }"#;

    let context = StyleDocument::from_json(saved).unwrap();
    let doc = reduce(&empty(), Transition::receive_context(context)).unwrap();
    assert_eq!(doc.sources_version, 7);
    assert_eq!(doc.layers_version, 3);

    let doc = reduce(
        &doc,
        Transition::add_features("pts", vec![json!({"type": "Feature", "properties": {}})]),
    )
    .unwrap();
    assert_eq!(doc.get_source("pts").unwrap().data_version, Some(13));
}

#[test]
fn test_transition_from_json_dispatch() {
    let transitions: Vec<Transition> = serde_json::from_value(json!([
        {"type": "add_source", "source_name": "pts", "source_def": {"type": "geojson"}},
        {"type": "add_features", "source_name": "pts", "features": [{"type": "Feature", "properties": {"v": 1}}]},
        {"type": "add_layer", "layer_def": {"id": "pts", "type": "circle", "source": "pts"}},
        {"type": "set_layer_visibility", "layer_id": "pts", "visibility": "none"},
        {"type": "toggle_everything"}
    ]))
    .unwrap();

    let doc = Reducer::new().apply_all(&empty(), transitions).unwrap();
    assert_eq!(doc.sources_version, 1);
    assert_eq!(doc.layers_version, 2);
    assert_eq!(doc.get_source("pts").unwrap().data_version, Some(1));
    assert_eq!(doc.layer("pts").unwrap().visibility(), Some(Visibility::Hidden));
}
