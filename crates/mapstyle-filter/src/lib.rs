//! Feature filter evaluation for map style documents.
//!
//! Style layers and feature-removal transitions carry a [`FilterSpec`]: an
//! opaque JSON predicate written in the style-spec filter language. This crate
//! owns the only code that interprets it.
//!
//! # Core Concepts
//!
//! - **FilterSpec**: the raw, serializable predicate as it appears in a document
//! - **Filter**: a parsed predicate tree that can be evaluated many times
//! - **FeatureMatcher**: the seam the document core calls; swap it to plug in a
//!   different filter language
//!
//! # Quick Start
//!
//! ```
//! use mapstyle_filter::{FeatureMatcher, FilterSpec, StyleFilterMatcher};
//! use serde_json::json;
//!
//! let filter = FilterSpec::new(json!(["==", "kind", "park"]));
//! let feature = json!({
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
//!     "properties": {"kind": "park"}
//! });
//!
//! assert!(StyleFilterMatcher.matches(&filter, &feature));
//! ```

mod error;
mod filter;
mod matcher;
mod spec;

pub use error::{FilterError, FilterResult};
pub use filter::{CompareOp, Filter, Key};
pub use matcher::{FeatureMatcher, StyleFilterMatcher};
pub use spec::FilterSpec;
