//! Single-writer async store for a map style document.
//!
//! `mapstyle-store` wraps the pure reducer from `mapstyle-state` for programs
//! that share one document between tasks:
//!
//! - **StyleStore**: holds the current revision behind a write lock, so
//!   dispatches are serialized
//! - **Revision**: the new document plus its [`ChangeSet`] against the previous
//!   one
//! - **Subscriptions**: a `watch` channel that always holds the latest document
//!
//! No history is kept. A reader that needs an older revision simply keeps the
//! `Arc` it was handed.
//!
//! [`ChangeSet`]: mapstyle_state::ChangeSet

mod error;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::{Revision, StyleStore};
