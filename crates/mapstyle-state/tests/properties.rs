//! Property tests over arbitrary transition sequences.

use mapstyle_state::{
    reduce, FeatureMatcher, FilterSpec, Layer, LayerPatch, Reducer, ReduceOptions, Source,
    StyleDocument, StyleFilterMatcher, Transition, ViewPatch, Visibility,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

const LAYER_IDS: [&str; 4] = ["a", "b", "c", "d"];
const SOURCE_NAMES: [&str; 3] = ["pts", "lines", "osm"];

fn feature(n: i64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [n, n]},
        "properties": {"n": n}
    })
}

fn layer_id() -> impl Strategy<Value = String> {
    prop::sample::select(LAYER_IDS.to_vec()).prop_map(str::to_string)
}

fn source_name() -> impl Strategy<Value = String> {
    prop::sample::select(SOURCE_NAMES.to_vec()).prop_map(str::to_string)
}

/// Any transition except `ReceiveContext`, which resets counters.
fn transition() -> impl Strategy<Value = Transition> {
    prop_oneof![
        (0.0f64..20.0).prop_map(|z| Transition::set_view(ViewPatch::new().with_zoom(z))),
        layer_id().prop_map(|id| Transition::add_layer(Layer::new(id))),
        layer_id().prop_map(|id| Transition::remove_layer(id)),
        layer_id().prop_map(|id| {
            Transition::update_layer(id, LayerPatch::new().with_field("type", "circle"))
        }),
        source_name().prop_map(|name| {
            let def = if name == "osm" {
                Source::osm()
            } else {
                Source::new("geojson")
            };
            Transition::add_source(name, def)
        }),
        source_name().prop_map(|name| Transition::remove_source(name)),
        (source_name(), prop::collection::vec(0i64..10, 0..4)).prop_map(|(name, ns)| {
            Transition::add_features(name, ns.into_iter().map(feature).collect())
        }),
        (source_name(), 0i64..10).prop_map(|(name, n)| {
            Transition::remove_features(name, json!(["<", "n", n]))
        }),
        (layer_id(), any::<bool>()).prop_map(|(id, hidden)| {
            let visibility = if hidden {
                Visibility::Hidden
            } else {
                Visibility::Visible
            };
            Transition::set_layer_visibility(id, visibility)
        }),
        Just(Transition::Unknown),
    ]
}

/// Apply a transition, treating caller-contract failures as "not applied".
fn step(reducer: &Reducer, doc: &Arc<StyleDocument>, t: Transition) -> Arc<StyleDocument> {
    reducer.apply(doc, t).unwrap_or_else(|_| Arc::clone(doc))
}

proptest! {
    #[test]
    fn counters_never_decrease(
        transitions in prop::collection::vec(transition(), 0..40),
        strict in any::<bool>(),
    ) {
        let options = if strict { ReduceOptions::strict() } else { ReduceOptions::default() };
        let reducer = Reducer::new().with_options(options);
        let mut doc = Arc::new(StyleDocument::default());

        for t in transitions {
            let next = step(&reducer, &doc, t);
            prop_assert!(next.layers_version >= doc.layers_version);
            prop_assert!(next.sources_version >= doc.sources_version);
            prop_assert!(next.layers_version - doc.layers_version <= 1);
            prop_assert!(next.sources_version - doc.sources_version <= 1);

            for (name, source) in next.sources.iter() {
                let Some(before) = doc.sources.get(name) else { continue };
                // A re-added source may carry a fresh counter.
                if next.sources_version != doc.sources_version {
                    continue;
                }
                match (before.data_version, source.data_version) {
                    (Some(old), Some(new)) => prop_assert!(new == old || new == old + 1),
                    (old, new) => prop_assert_eq!(old, new),
                }
            }
            doc = next;
        }
    }

    #[test]
    fn add_layer_appends_at_end(
        existing in prop::collection::vec(layer_id(), 0..8),
        id in layer_id(),
    ) {
        let doc = existing.iter().fold(Arc::new(StyleDocument::default()), |doc, id| {
            reduce(&doc, Transition::add_layer(Layer::new(id.as_str()))).unwrap()
        });
        let next = reduce(&doc, Transition::add_layer(Layer::new(id.as_str()))).unwrap();

        let mut expected: Vec<&str> = doc.layer_ids();
        expected.push(id.as_str());
        prop_assert_eq!(next.layer_ids(), expected);
        prop_assert_eq!(next.layers_version, doc.layers_version + 1);
    }

    #[test]
    fn receive_context_round_trips(
        transitions in prop::collection::vec(transition(), 0..20),
        zoom in 0.0f64..20.0,
        layers_version in 0u64..1000,
    ) {
        let reducer = Reducer::new();
        let doc = transitions
            .into_iter()
            .fold(Arc::new(StyleDocument::default()), |doc, t| step(&reducer, &doc, t));

        let replacement = StyleDocument {
            zoom,
            layers_version,
            name: "replacement".into(),
            ..StyleDocument::default()
        };
        let next = reduce(&doc, Transition::receive_context(replacement.clone())).unwrap();
        prop_assert_eq!(&*next, &replacement);
    }

    #[test]
    fn unknown_is_identity(transitions in prop::collection::vec(transition(), 0..20)) {
        let reducer = Reducer::new();
        let doc = transitions
            .into_iter()
            .fold(Arc::new(StyleDocument::default()), |doc, t| step(&reducer, &doc, t));
        let next = reduce(&doc, Transition::Unknown).unwrap();
        prop_assert!(Arc::ptr_eq(&next, &doc));
    }

    #[test]
    fn remove_features_leaves_only_non_matching(
        ns in prop::collection::vec(0i64..10, 0..30),
        threshold in 0i64..10,
    ) {
        let features: Vec<Value> = ns.iter().copied().map(feature).collect();
        let doc = reduce(
            &Arc::new(StyleDocument::default()),
            Transition::add_source("pts", Source::new("geojson")),
        )
        .unwrap();
        let doc = reduce(&doc, Transition::add_features("pts", features.clone())).unwrap();

        let filter = FilterSpec::new(json!([">=", "n", threshold]));
        let next = reduce(&doc, Transition::remove_features("pts", filter.clone())).unwrap();
        let remaining = next.get_source("pts").unwrap().features().unwrap();

        let matched = features
            .iter()
            .filter(|f| StyleFilterMatcher.matches(&filter, f))
            .count();
        prop_assert_eq!(remaining.len(), features.len() - matched);
        prop_assert!(remaining.iter().all(|f| !StyleFilterMatcher.matches(&filter, f)));
        prop_assert_eq!(
            next.get_source("pts").unwrap().data_version,
            doc.get_source("pts").unwrap().data_version.map(|v| v + 1)
        );
    }
}
