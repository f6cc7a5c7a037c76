//! Persisted application state
//!
//! Loading, upgrading and saving the single state tree.

pub mod state_store;
pub mod upgrade;

pub use state_store::{local_today, stored_version_of, StateStore, StoreError, STATE_KEY};
