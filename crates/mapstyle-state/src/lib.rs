//! Immutable, versioned map style document with pure transitions.
//!
//! `mapstyle-state` owns one in-memory style document (view parameters, data
//! sources, and rendering layers) and evolves it through a closed set of
//! transitions. Every transition yields a new document value; nothing is ever
//! mutated in place.
//!
//! # Core Concepts
//!
//! - **StyleDocument**: the root value, shared through `Arc`
//! - **Transition**: a tagged request describing one kind of change
//! - **Reducer**: the pure dispatch function `(document, transition) -> document'`
//! - **Version counters**: `layers_version`, `sources_version`, and per-source
//!   `data_version`, the cheap change signal consumers compare instead of
//!   deep-diffing
//! - **ChangeSet**: counters turned into a diff between two revisions
//!
//! # Deterministic Transitions
//!
//! ```text
//! Document' = reduce(Document, Transition)
//! ```
//!
//! - Same `(Document, Transition)` always produces the same `Document'`
//! - Substructures a transition does not touch keep their `Arc` identity
//! - A transition that changes nothing returns the input `Arc`
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use mapstyle_state::{reduce, Layer, Source, StyleDocument, Transition, Visibility};
//! use serde_json::json;
//!
//! let doc = Arc::new(StyleDocument::default());
//!
//! let doc = reduce(&doc, Transition::add_source("pts", Source::new("geojson"))).unwrap();
//! let doc = reduce(&doc, Transition::add_features("pts", vec![json!({
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
//!     "properties": {}
//! })]))
//! .unwrap();
//! let doc = reduce(&doc, Transition::add_layer(Layer::new("pts-circles"))).unwrap();
//! let doc = reduce(&doc, Transition::set_layer_visibility("pts-circles", Visibility::Hidden)).unwrap();
//!
//! assert_eq!(doc.sources_version, 1);
//! assert_eq!(doc.layers_version, 2);
//! assert_eq!(doc.get_source("pts").unwrap().data_version, Some(1));
//! ```

mod change;
mod document;
mod error;
pub mod geojson;
mod layer;
pub mod mutate;
mod options;
mod reducer;
mod source;
mod transition;

pub use change::ChangeSet;
pub use document::{Layers, Sources, StyleDocument, ViewPatch};
pub use error::{StyleError, StyleResult};
pub use layer::{Layer, LayerPatch, Layout, Visibility};
pub use options::{LayerIdPolicy, LayerVersioning, ReduceOptions};
pub use reducer::{reduce, Reducer};
pub use source::Source;
pub use transition::Transition;

pub use mapstyle_filter::{FeatureMatcher, FilterSpec, StyleFilterMatcher};

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
