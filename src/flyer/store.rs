//! # Form State Store
//!
//! The single durable source of truth for all flyer fields. Mutation happens
//! only through normalizing setters; every change is written back to the
//! injected repository.

use crate::storage::Repository;

use super::{Field, FlyerState};

/// Persisted form state with normalizing setters.
pub struct FormStore<R: Repository> {
    state: FlyerState,
    repo: R,
}

impl<R: Repository> FormStore<R> {
    /// Open the store, merging any persisted document over the defaults.
    pub fn open(repo: R) -> Self {
        let state = repo.load().unwrap_or_default();
        Self { state, repo }
    }

    pub fn state(&self) -> &FlyerState {
        &self.state
    }

    /// Apply raw input through the field's normalizer and persist.
    pub fn set(&mut self, field: Field, raw: &str) {
        self.state.apply(field, raw);
        self.repo.save(&self.state);
    }

    /// Restore the built-in default record and drop the persisted document.
    pub fn reset(&mut self) {
        self.state = FlyerState::default();
        self.repo.clear();
    }
}
