//! # NewHome - Real Estate Flyer Generator Library
//!
//! NewHome is a Rust library for editing a real-estate flyer form and
//! rendering it to PDF. It provides:
//!
//! - **Form state**: a single normalized record with one mutation path
//! - **Image adjustments**: clamped per-slot scale, offsets, and fit modes
//! - **Energy gauge**: marker positioning for the seven-band EPC scale
//! - **PDF rendering**: a single-page A4 flyer with embedded photos
//! - **HTTP endpoints**: login validation and multipart PDF generation
//!
//! ## Quick Start
//!
//! ```no_run
//! use newhome::{
//!     flyer::{Field, FlyerEditor},
//!     storage::JsonFileRepository,
//! };
//!
//! // Open the editor over the saved document (defaults if absent)
//! let repo = JsonFileRepository::new("newhome-form.json");
//! let mut editor = FlyerEditor::open(repo);
//!
//! // Every write is normalized and persisted
//! editor.set(Field::Price, "129.000€");
//! editor.set(Field::GlobalImageScale, "2.5");
//! assert_eq!(editor.state().global_image_scale, 1.0);
//!
//! // Assemble the multipart payload for the PDF endpoint
//! let parts = editor.payload();
//! # let _ = parts;
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`flyer`] | Form state, normalizers, drafts, staging, payload |
//! | [`pdf`] | Flyer PDF renderer |
//! | [`server`] | Login and PDF HTTP endpoints |
//! | [`api`] | Client for a running backend |
//! | [`storage`] | Saved-form repositories |
//! | [`error`] | Error types |

pub mod api;
pub mod error;
pub mod flyer;
pub mod pdf;
pub mod server;
pub mod storage;

// Re-exports for convenience
pub use api::ApiClient;
pub use error::NewHomeError;
pub use flyer::{FlyerEditor, FlyerState};
pub use storage::{JsonFileRepository, MemoryRepository, Repository};
