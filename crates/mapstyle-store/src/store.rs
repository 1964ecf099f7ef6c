//! StyleStore holds the current document and publishes each revision.
//!
//! The store is the single writer: every transition goes through the
//! reducer under one write lock, and readers receive immutable revisions they
//! may keep as long as they like.

use crate::{StoreError, StoreResult};
use mapstyle_state::{
    ChangeSet, FeatureMatcher, Reducer, StyleDocument, StyleFilterMatcher, Transition,
};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// The outcome of a successful dispatch.
#[derive(Debug, Clone)]
pub struct Revision {
    /// The document after the transition(s).
    pub document: Arc<StyleDocument>,
    /// What differs from the previous document.
    pub changes: ChangeSet,
}

impl Revision {
    /// Check if the dispatch changed anything.
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Single-writer holder for one style document.
///
/// # Example
///
/// ```ignore
/// use mapstyle_state::{Source, StyleDocument, Transition};
/// use mapstyle_store::StyleStore;
///
/// let store = StyleStore::new(StyleDocument::default());
/// let mut updates = store.subscribe();
///
/// let revision = store
///     .dispatch(Transition::add_source("pts", Source::new("geojson")))
///     .await?;
/// assert!(revision.changes.sources);
///
/// updates.changed().await?;
/// assert_eq!(updates.borrow().sources_version, 1);
/// ```
pub struct StyleStore<M = StyleFilterMatcher> {
    reducer: Arc<Reducer<M>>,
    current: Arc<RwLock<Arc<StyleDocument>>>,
    updates: Arc<watch::Sender<Arc<StyleDocument>>>,
}

impl StyleStore {
    /// Create a store with the default reducer.
    pub fn new(initial: StyleDocument) -> Self {
        Self::with_reducer(initial, Reducer::new())
    }
}

impl<M: FeatureMatcher> StyleStore<M> {
    /// Create a store with a configured reducer.
    pub fn with_reducer(initial: StyleDocument, reducer: Reducer<M>) -> Self {
        let initial = Arc::new(initial);
        let (updates, _) = watch::channel(Arc::clone(&initial));
        Self {
            reducer: Arc::new(reducer),
            current: Arc::new(RwLock::new(initial)),
            updates: Arc::new(updates),
        }
    }

    /// Get the current document.
    pub async fn snapshot(&self) -> Arc<StyleDocument> {
        Arc::clone(&*self.current.read().await)
    }

    /// Subscribe to published revisions.
    ///
    /// The receiver starts at the current document. No-op dispatches are not
    /// published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StyleDocument>> {
        self.updates.subscribe()
    }

    /// The reducer this store dispatches through.
    pub fn reducer(&self) -> &Reducer<M> {
        &self.reducer
    }

    /// Apply one transition.
    pub async fn dispatch(&self, transition: Transition) -> StoreResult<Revision> {
        let kind = transition.kind();
        let mut current = self.current.write().await;

        let next = match self.reducer.apply(&current, transition) {
            Ok(next) => next,
            Err(error) => {
                tracing::warn!(kind, %error, "transition rejected");
                return Err(StoreError::Transition(error));
            }
        };

        let revision = self.commit(&mut current, next);
        tracing::debug!(
            kind,
            layers_version = revision.document.layers_version,
            sources_version = revision.document.sources_version,
            changed = !revision.is_unchanged(),
            "transition applied"
        );
        Ok(revision)
    }

    /// Apply transitions in order as one unit.
    ///
    /// Either every transition applies and a single revision is published, or
    /// the first failure is returned and the store is left untouched.
    pub async fn dispatch_batch(
        &self,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> StoreResult<Revision> {
        let mut current = self.current.write().await;

        let mut next = Arc::clone(&*current);
        let mut count = 0usize;
        for (index, transition) in transitions.into_iter().enumerate() {
            let kind = transition.kind();
            next = self.reducer.apply(&next, transition).map_err(|source| {
                tracing::warn!(index, kind, error = %source, "batch transition rejected");
                StoreError::Batch { index, source }
            })?;
            count += 1;
        }

        let revision = self.commit(&mut current, next);
        tracing::debug!(
            count,
            layers_version = revision.document.layers_version,
            sources_version = revision.document.sources_version,
            changed = !revision.is_unchanged(),
            "batch applied"
        );
        Ok(revision)
    }

    /// Install `next` as the current document and publish it if it is new.
    fn commit(&self, current: &mut Arc<StyleDocument>, next: Arc<StyleDocument>) -> Revision {
        let changes = ChangeSet::between(current, &next);
        if !Arc::ptr_eq(current, &next) {
            *current = Arc::clone(&next);
            self.updates.send_replace(Arc::clone(&next));
        }
        Revision {
            document: next,
            changes,
        }
    }
}

impl<M> Clone for StyleStore<M> {
    fn clone(&self) -> Self {
        Self {
            reducer: Arc::clone(&self.reducer),
            current: Arc::clone(&self.current),
            updates: Arc::clone(&self.updates),
        }
    }
}
