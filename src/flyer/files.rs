//! # File Staging
//!
//! Holds up to five optional binary attachments (four images + one QR code)
//! and derives a transient preview URL per staged blob. Assigning to a slot
//! replaces it wholesale and releases the previous preview handle; clearing
//! a slot additionally bumps its input epoch so the owning file-picker
//! control re-mounts (selecting "no file" cannot be expressed as an input
//! value). Slots never share a blob and are never persisted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

use super::ImageSlot;

/// One of the five fixed attachment positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileSlot {
    Image(ImageSlot),
    Qr,
}

impl FileSlot {
    pub const ALL: [FileSlot; 5] = [
        FileSlot::Image(ImageSlot::One),
        FileSlot::Image(ImageSlot::Two),
        FileSlot::Image(ImageSlot::Three),
        FileSlot::Image(ImageSlot::Four),
        FileSlot::Qr,
    ];

    /// Wire key for the payload part.
    pub fn key(self) -> &'static str {
        match self {
            FileSlot::Image(slot) => slot.key(),
            FileSlot::Qr => "qr_imagen",
        }
    }

    pub fn from_key(key: &str) -> Option<FileSlot> {
        FileSlot::ALL.iter().copied().find(|s| s.key() == key)
    }

    fn index(self) -> usize {
        match self {
            FileSlot::Image(slot) => slot.index(),
            FileSlot::Qr => 4,
        }
    }
}

/// Ephemeral preview handle for a staged blob. Acquired when the blob is
/// staged, released exactly once: when superseded, cleared, or dropped with
/// the staging area. A handle never outlives its blob.
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    released: Arc<AtomicBool>,
}

impl PreviewHandle {
    fn acquire() -> Self {
        Self {
            url: format!("memory://preview/{}", Uuid::new_v4()),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Token observing this handle's lifetime, for callers that hold the URL
    /// past the blob (they must check before use).
    pub fn token(&self) -> PreviewToken {
        PreviewToken(Arc::clone(&self.released))
    }

    fn release(&self) {
        self.released.store(true, Ordering::Release);
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Cloneable observer for a preview handle's release.
#[derive(Debug, Clone)]
pub struct PreviewToken(Arc<AtomicBool>);

impl PreviewToken {
    pub fn is_released(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A staged binary attachment with its preview handle.
#[derive(Debug)]
pub struct StagedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    preview: PreviewHandle,
}

impl StagedFile {
    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }
}

/// The five independent staging slots.
#[derive(Debug, Default)]
pub struct FileStaging {
    slots: [Option<StagedFile>; 5],
    epochs: [u64; 5],
}

impl FileStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a slot's blob, releasing any prior preview handle and
    /// deriving a fresh one.
    pub fn assign(&mut self, slot: FileSlot, filename: impl Into<String>, bytes: Vec<u8>) {
        if let Some(old) = self.slots[slot.index()].take() {
            old.preview.release();
        }
        self.slots[slot.index()] = Some(StagedFile {
            filename: filename.into(),
            bytes,
            preview: PreviewHandle::acquire(),
        });
    }

    /// Empty a slot and bump its input epoch to force consumer re-mount.
    pub fn clear(&mut self, slot: FileSlot) {
        if let Some(old) = self.slots[slot.index()].take() {
            old.preview.release();
        }
        self.epochs[slot.index()] += 1;
    }

    /// Empty every slot (reset path).
    pub fn clear_all(&mut self) {
        for slot in FileSlot::ALL {
            self.clear(slot);
        }
    }

    pub fn file(&self, slot: FileSlot) -> Option<&StagedFile> {
        self.slots[slot.index()].as_ref()
    }

    pub fn preview_url(&self, slot: FileSlot) -> Option<&str> {
        self.file(slot).map(|f| f.preview.url())
    }

    /// Monotonic counter bumped on every clear of this slot.
    pub fn input_epoch(&self, slot: FileSlot) -> u64 {
        self.epochs[slot.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_derives_preview_url() {
        let mut staging = FileStaging::new();
        staging.assign(FileSlot::Qr, "qr.png", vec![1, 2, 3]);
        let url = staging.preview_url(FileSlot::Qr).expect("url").to_string();
        assert!(url.starts_with("memory://preview/"));
        assert_eq!(staging.file(FileSlot::Qr).expect("file").bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_reassign_releases_previous_handle() {
        let mut staging = FileStaging::new();
        let slot = FileSlot::Image(ImageSlot::One);
        staging.assign(slot, "a.jpg", vec![1]);
        let first = staging.file(slot).expect("file").preview().token();
        let first_url = staging.preview_url(slot).expect("url").to_string();

        staging.assign(slot, "b.jpg", vec![2]);
        assert!(first.is_released());
        let second = staging.file(slot).expect("file").preview().token();
        assert!(!second.is_released());
        assert_ne!(staging.preview_url(slot).expect("url"), first_url);
    }

    #[test]
    fn test_clear_releases_and_bumps_epoch() {
        let mut staging = FileStaging::new();
        let slot = FileSlot::Image(ImageSlot::Two);
        staging.assign(slot, "a.jpg", vec![1]);
        let token = staging.file(slot).expect("file").preview().token();
        assert_eq!(staging.input_epoch(slot), 0);

        staging.clear(slot);
        assert!(token.is_released());
        assert!(staging.file(slot).is_none());
        assert_eq!(staging.input_epoch(slot), 1);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut staging = FileStaging::new();
        staging.assign(FileSlot::Image(ImageSlot::One), "a.jpg", vec![1]);
        staging.assign(FileSlot::Qr, "qr.png", vec![2]);
        staging.clear(FileSlot::Image(ImageSlot::One));
        assert!(staging.file(FileSlot::Qr).is_some());
    }

    #[test]
    fn test_handles_release_on_drop() {
        let mut staging = FileStaging::new();
        staging.assign(FileSlot::Qr, "qr.png", vec![1]);
        let token = staging.file(FileSlot::Qr).expect("file").preview().token();
        drop(staging);
        assert!(token.is_released());
    }

    #[test]
    fn test_slot_keys() {
        assert_eq!(FileSlot::Image(ImageSlot::One).key(), "imagen1");
        assert_eq!(FileSlot::Qr.key(), "qr_imagen");
        assert_eq!(FileSlot::from_key("qr_imagen"), Some(FileSlot::Qr));
        assert_eq!(FileSlot::from_key("imagen9"), None);
    }
}
