//! Transition dispatch.

use crate::mutate;
use crate::{ReduceOptions, StyleDocument, StyleResult, Transition};
use mapstyle_filter::{FeatureMatcher, StyleFilterMatcher};
use std::sync::Arc;

/// The pure transition function, bundled with its filter matcher and options.
///
/// `apply` never mutates its input and never fails for an unknown transition;
/// it fails only on caller-contract violations such as a missing source.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use mapstyle_state::{Reducer, StyleDocument, Transition};
///
/// let reducer = Reducer::new();
/// let doc = Arc::new(StyleDocument::default());
///
/// let next = reducer.apply(&doc, Transition::remove_layer("nothing-here")).unwrap();
/// assert_eq!(next.layers_version, 1);
///
/// let same = reducer.apply(&next, Transition::Unknown).unwrap();
/// assert!(Arc::ptr_eq(&same, &next));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Reducer<M = StyleFilterMatcher> {
    matcher: M,
    options: ReduceOptions,
}

impl Reducer {
    /// Create a reducer with the style-spec filter matcher and default options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: FeatureMatcher> Reducer<M> {
    /// Create a reducer with a custom filter matcher.
    pub fn with_matcher(matcher: M) -> Self {
        Self {
            matcher,
            options: ReduceOptions::default(),
        }
    }

    /// Replace the options (builder pattern).
    pub fn with_options(mut self, options: ReduceOptions) -> Self {
        self.options = options;
        self
    }

    /// The active options.
    #[inline]
    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    /// The filter matcher used by `remove_features`.
    #[inline]
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Apply one transition.
    pub fn apply(
        &self,
        doc: &Arc<StyleDocument>,
        transition: Transition,
    ) -> StyleResult<Arc<StyleDocument>> {
        let next = match transition {
            Transition::SetView { view } => mutate::set_view(doc, &view),
            Transition::AddLayer { layer_def } => {
                mutate::add_layer(doc, layer_def, &self.options)?
            }
            Transition::RemoveLayer { layer_id } => {
                mutate::remove_layer(doc, &layer_id, &self.options)
            }
            Transition::UpdateLayer {
                layer_id,
                layer_def,
            } => mutate::update_layer(doc, &layer_id, &layer_def, &self.options),
            Transition::AddSource {
                source_name,
                source_def,
            } => mutate::add_source(doc, source_name, source_def),
            Transition::RemoveSource { source_name } => mutate::remove_source(doc, &source_name),
            Transition::AddFeatures {
                source_name,
                features,
            } => mutate::add_features(doc, &source_name, features)?,
            Transition::RemoveFeatures {
                source_name,
                filter,
            } => mutate::remove_features(doc, &source_name, &filter, &self.matcher)?,
            Transition::SetLayerVisibility {
                layer_id,
                visibility,
            } => mutate::set_visibility(doc, &layer_id, visibility),
            Transition::ReceiveContext { context } => mutate::set_context(*context),
            Transition::SetGlyphs { glyphs } => mutate::set_glyphs(doc, glyphs),
            Transition::SetSprite { sprite } => mutate::set_sprite(doc, sprite),
            Transition::Unknown => {
                tracing::trace!("unknown transition, document unchanged");
                Arc::clone(doc)
            }
        };
        Ok(next)
    }

    /// Apply transitions in order, stopping at the first failure.
    ///
    /// The input document is untouched either way.
    pub fn apply_all(
        &self,
        doc: &Arc<StyleDocument>,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> StyleResult<Arc<StyleDocument>> {
        transitions
            .into_iter()
            .try_fold(Arc::clone(doc), |acc, transition| self.apply(&acc, transition))
    }
}

/// Apply one transition with the default reducer.
pub fn reduce(doc: &Arc<StyleDocument>, transition: Transition) -> StyleResult<Arc<StyleDocument>> {
    Reducer::new().apply(doc, transition)
}
