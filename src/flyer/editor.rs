//! # Editor Facade
//!
//! Composes the form state store, the draft buffers and the file staging
//! area behind one front door, and makes the draft resynchronization
//! contract explicit: drafts re-seed from the store on every mutation path
//! except a draft's own commit.

use crate::storage::Repository;

use super::draft::{DraftEditor, DraftField};
use super::files::{FileSlot, FileStaging};
use super::payload::{PayloadPart, build_payload};
use super::store::FormStore;
use super::{Field, FlyerState};

/// The complete editing session: durable state plus its transient
/// front-ends.
pub struct FlyerEditor<R: Repository> {
    store: FormStore<R>,
    drafts: DraftEditor,
    files: FileStaging,
}

impl<R: Repository> FlyerEditor<R> {
    /// Open an editor over the given repository, seeding drafts from the
    /// loaded (or default) state.
    pub fn open(repo: R) -> Self {
        let store = FormStore::open(repo);
        let drafts = DraftEditor::seeded_from(store.state());
        Self {
            store,
            drafts,
            files: FileStaging::new(),
        }
    }

    pub fn state(&self) -> &FlyerState {
        self.store.state()
    }

    pub fn drafts(&self) -> &DraftEditor {
        &self.drafts
    }

    pub fn files(&self) -> &FileStaging {
        &self.files
    }

    /// Non-draft mutation path: normalize, persist, and re-seed all drafts.
    pub fn set(&mut self, field: Field, raw: &str) {
        self.store.set(field, raw);
        self.drafts.sync(self.store.state());
    }

    /// Draft mutation path: buffer the raw input and commit it through the
    /// store without resynchronizing (the draft keeps the raw text).
    pub fn edit(&mut self, field: DraftField, input: &str) {
        let (target, committed) = self.drafts.edit(field, input);
        self.store.set(target, &committed);
    }

    /// Stage a blob into a slot.
    pub fn assign_file(&mut self, slot: FileSlot, filename: impl Into<String>, bytes: Vec<u8>) {
        self.files.assign(slot, filename, bytes);
    }

    /// Clear one slot.
    pub fn clear_file(&mut self, slot: FileSlot) {
        self.files.clear(slot);
    }

    /// Restore the default record, clear all staged files and re-seed
    /// drafts.
    pub fn reset(&mut self) {
        self.store.reset();
        self.files.clear_all();
        self.drafts.sync(self.store.state());
    }

    /// Assemble the transport payload for the PDF endpoint.
    pub fn payload(&self) -> Vec<PayloadPart> {
        build_payload(self.store.state(), &self.files)
    }
}
