//! # Form State Persistence
//!
//! The flyer record is persisted as a flat key/value JSON document under a
//! fixed storage location and rewritten after every state change. Loading is
//! lenient: a malformed document is discarded wholesale, a partial one is
//! merged field-by-field over the defaults, and every present value is routed
//! back through its normalizer, so image-adjustment fields are individually
//! re-normalized. Persistence failures are logged and never surfaced.
//!
//! File slots are never persisted.

use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;

use crate::flyer::{Field, FlyerState};

/// Default file name for the persisted document (the `newhome-form` storage
/// key).
pub const DEFAULT_STATE_FILE: &str = "newhome-form.json";

/// Storage port for the form state store. Injected rather than ambient so
/// tests can substitute an in-memory fake.
pub trait Repository {
    /// Load the persisted state, if any. Malformed documents yield `None`.
    fn load(&self) -> Option<FlyerState>;
    /// Persist the state. Best effort; failures are logged, not surfaced.
    fn save(&self, state: &FlyerState);
    /// Remove the persisted document.
    fn clear(&self);
}

impl<R: Repository + ?Sized> Repository for &R {
    fn load(&self) -> Option<FlyerState> {
        (**self).load()
    }

    fn save(&self, state: &FlyerState) {
        (**self).save(state)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// Serialize the full record as a flat key/value document.
pub fn encode_state(state: &FlyerState) -> String {
    let mut doc = serde_json::Map::new();
    for field in Field::all() {
        doc.insert(field.key().to_string(), Value::String(state.get(field)));
    }
    // Map serialization over string keys cannot fail.
    serde_json::to_string_pretty(&Value::Object(doc)).unwrap_or_default()
}

/// Decode a persisted document, merging present keys over the default record.
///
/// Accepts both the string-valued documents written by [`encode_state`] and
/// documents with typed JSON scalars; every value goes back through
/// [`FlyerState::apply`].
pub fn decode_state(text: &str) -> Option<FlyerState> {
    let doc: Value = serde_json::from_str(text).ok()?;
    let doc = doc.as_object()?;
    let mut state = FlyerState::default();
    for field in Field::all() {
        let Some(value) = doc.get(field.key()) else {
            continue;
        };
        let raw = match value {
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            _ => continue,
        };
        state.apply(field, &raw);
    }
    Some(state)
}

/// File-backed repository.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Repository for JsonFileRepository {
    fn load(&self) -> Option<FlyerState> {
        let text = std::fs::read_to_string(&self.path).ok()?;
        decode_state(&text)
    }

    fn save(&self, state: &FlyerState) {
        if let Err(e) = std::fs::write(&self.path, encode_state(state)) {
            eprintln!("[storage] Failed to write {}: {}", self.path.display(), e);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                eprintln!("[storage] Failed to remove {}: {}", self.path.display(), e)
            }
        }
    }
}

/// In-memory repository for tests. Stores the encoded document, so loads go
/// through the same merge path as the file-backed repository.
#[derive(Default)]
pub struct MemoryRepository {
    doc: Mutex<Option<String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stored document directly (e.g. a partial or malformed one).
    pub fn with_document(text: &str) -> Self {
        Self {
            doc: Mutex::new(Some(text.to_string())),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.doc.lock().expect("repository lock poisoned").clone()
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> Option<FlyerState> {
        let doc = self.doc.lock().expect("repository lock poisoned");
        doc.as_deref().and_then(decode_state)
    }

    fn save(&self, state: &FlyerState) {
        let mut doc = self.doc.lock().expect("repository lock poisoned");
        *doc = Some(encode_state(state));
    }

    fn clear(&self) {
        let mut doc = self.doc.lock().expect("repository lock poisoned");
        *doc = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::{ImageSlot, SlotField};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_decode_round_trip() {
        let mut state = FlyerState::default();
        state.apply(Field::Text1, "Venta");
        state.apply(Field::GlobalImageScale, "0.5");
        state.apply(Field::Image(ImageSlot::Three, SlotField::OffsetY), "42");
        state.apply(Field::Description, "Piso  luminoso");

        let decoded = decode_state(&encode_state(&state)).expect("decodes");
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_decode_malformed_document() {
        assert!(decode_state("not json").is_none());
        assert!(decode_state("[1, 2]").is_none());
    }

    #[test]
    fn test_decode_partial_document_merges_over_defaults() {
        let state = decode_state(r#"{"texto1": "Alquiler", "habitaciones": 3}"#).expect("decodes");
        assert_eq!(state.text1, "Alquiler");
        assert_eq!(state.rooms, 3);
        // Everything else keeps its default.
        assert_eq!(state.price, "154.900€");
        assert_eq!(state.global_image_scale, 0.93);
    }

    #[test]
    fn test_decode_renormalizes_adjustment_fields() {
        let doc = r#"{
            "escala_imagenes": 4.2,
            "imagen1_modo": "diagonal",
            "imagen1_custom_ancho": 9999,
            "imagen2_offset_x": -400
        }"#;
        let state = decode_state(doc).expect("decodes");
        assert_eq!(state.global_image_scale, 1.0);
        assert_eq!(
            state.image(ImageSlot::One).mode,
            crate::flyer::ImageMode::Contain
        );
        assert_eq!(state.image(ImageSlot::One).custom_width, 200.0);
        assert_eq!(state.image(ImageSlot::Two).offset_x, -100.0);
    }

    #[test]
    fn test_memory_repository_round_trip() {
        let repo = MemoryRepository::new();
        assert!(repo.load().is_none());

        let mut state = FlyerState::default();
        state.apply(Field::Price, "99.000€");
        repo.save(&state);
        assert_eq!(repo.load().expect("loads"), state);

        repo.clear();
        assert!(repo.load().is_none());
    }
}
