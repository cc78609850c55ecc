//! # Draft/Commit Text Editing
//!
//! Decouples raw keystroke buffering from committed, normalized form values.
//! A draft may transiently hold text outside the store's normalized form
//! (an in-progress "1." for a numeric field, trailing whitespace in the
//! description). Commits go through the store's normalizers; drafts are
//! re-seeded from the store whenever it changes through any path other than
//! the draft's own commit.

use std::collections::BTreeMap;

use super::normalize::count_words;
use super::{DESCRIPTION_MAX, Field, FlyerState};

/// Fields edited as free text or numbers through a draft buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Text1,
    Text2,
    Text3,
    Text4,
    Price,
    Rooms,
    Bathrooms,
    Description,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        DraftField::Text1,
        DraftField::Text2,
        DraftField::Text3,
        DraftField::Text4,
        DraftField::Price,
        DraftField::Rooms,
        DraftField::Bathrooms,
        DraftField::Description,
    ];

    /// The store field this draft commits to. The store side applies the
    /// parser hook (identity for strings, numeric coercion for counts).
    pub fn target(self) -> Field {
        match self {
            DraftField::Text1 => Field::Text1,
            DraftField::Text2 => Field::Text2,
            DraftField::Text3 => Field::Text3,
            DraftField::Text4 => Field::Text4,
            DraftField::Price => Field::Price,
            DraftField::Rooms => Field::Rooms,
            DraftField::Bathrooms => Field::Bathrooms,
            DraftField::Description => Field::Description,
        }
    }
}

/// Per-field draft buffers.
#[derive(Debug, Default)]
pub struct DraftEditor {
    drafts: BTreeMap<DraftField, String>,
}

impl DraftEditor {
    /// Editor seeded from the current store values.
    pub fn seeded_from(state: &FlyerState) -> Self {
        let mut editor = Self::default();
        editor.sync(state);
        editor
    }

    /// Re-seed every draft from the store. Called whenever the store changes
    /// through any path other than a draft commit (external set, reset,
    /// initial load).
    pub fn sync(&mut self, state: &FlyerState) {
        for field in DraftField::ALL {
            self.drafts.insert(field, state.get(field.target()));
        }
    }

    /// Record a keystroke-level update and return the commit to apply to the
    /// store. The description is truncated to [`DESCRIPTION_MAX`] characters
    /// at this boundary; no other validation happens here.
    pub fn edit(&mut self, field: DraftField, input: &str) -> (Field, String) {
        let value = if field == DraftField::Description {
            input.chars().take(DESCRIPTION_MAX).collect()
        } else {
            input.to_string()
        };
        self.drafts.insert(field, value.clone());
        (field.target(), value)
    }

    /// Current raw draft text for a field.
    pub fn draft(&self, field: DraftField) -> &str {
        self.drafts.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Word count of the raw description draft (not the normalized text).
    pub fn description_words(&self) -> usize {
        count_words(self.draft(DraftField::Description))
    }

    /// Character count of the raw description draft.
    pub fn description_chars(&self) -> usize {
        self.draft(DraftField::Description).chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_formats_store_values() {
        let state = FlyerState::default();
        let editor = DraftEditor::seeded_from(&state);
        assert_eq!(editor.draft(DraftField::Text1), "Tipo negocio");
        assert_eq!(editor.draft(DraftField::Rooms), "1");
        assert_eq!(editor.draft(DraftField::Description), "");
    }

    #[test]
    fn test_edit_keeps_raw_draft_and_commits_target() {
        let mut editor = DraftEditor::seeded_from(&FlyerState::default());
        let (target, committed) = editor.edit(DraftField::Rooms, "1.");
        assert_eq!(target, Field::Rooms);
        assert_eq!(committed, "1.");
        // The draft holds the in-progress text even though the store will
        // coerce it numerically.
        assert_eq!(editor.draft(DraftField::Rooms), "1.");
    }

    #[test]
    fn test_description_truncated_at_input_boundary() {
        let mut editor = DraftEditor::seeded_from(&FlyerState::default());
        let long = "y".repeat(1600);
        let (_, committed) = editor.edit(DraftField::Description, &long);
        assert_eq!(committed.chars().count(), DESCRIPTION_MAX);
        assert_eq!(editor.description_chars(), DESCRIPTION_MAX);
    }

    #[test]
    fn test_counts_use_raw_draft() {
        let mut editor = DraftEditor::seeded_from(&FlyerState::default());
        editor.edit(DraftField::Description, "  dos   palabras  ");
        assert_eq!(editor.description_words(), 2);
        // Character count includes the un-collapsed whitespace.
        assert_eq!(editor.description_chars(), 18);
    }

    #[test]
    fn test_sync_overwrites_stale_drafts() {
        let mut state = FlyerState::default();
        let mut editor = DraftEditor::seeded_from(&state);
        editor.edit(DraftField::Price, "in progress");
        state.apply(Field::Price, "200.000€");
        editor.sync(&state);
        assert_eq!(editor.draft(DraftField::Price), "200.000€");
    }
}
