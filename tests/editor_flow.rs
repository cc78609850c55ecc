//! # Editor Flow Tests
//!
//! End-to-end coverage of the editor over a real repository: persistence
//! round-trips, draft commits, payload assembly, and PDF rendering from the
//! same state the editor produced.

use pretty_assertions::assert_eq;

use newhome::flyer::{
    adjust, energy, normalize::normalize_text, Field, FileSlot, FlyerEditor, FlyerState,
    ImageSlot, PartBody,
};
use newhome::pdf::{render_flyer, FlyerImages};
use newhome::storage::MemoryRepository;

#[test]
fn round_trip_through_repository() {
    let repo = MemoryRepository::new();
    {
        let mut editor = FlyerEditor::open(&repo);
        editor.set(Field::Text1, "  Chalet   en  venta ");
        editor.set(Field::Price, "249.000€");
        editor.set(Field::Rooms, "4");
        editor.set(
            Field::Image(ImageSlot::Two, newhome::flyer::SlotField::Scale),
            "0.5",
        );
    }

    // A fresh editor over the same repository sees the committed record.
    // Text fields are stored raw; whitespace collapse happens at render time.
    let editor = FlyerEditor::open(&repo);
    assert_eq!(editor.state().text1, "  Chalet   en  venta ");
    assert_eq!(normalize_text(&editor.state().text1), "Chalet en venta");
    assert_eq!(editor.state().price, "249.000€");
    assert_eq!(editor.state().rooms, 4);
    assert_eq!(editor.state().images[1].scale, 0.5);
}

#[test]
fn reset_restores_defaults_and_clears_files() {
    let repo = MemoryRepository::new();
    let mut editor = FlyerEditor::open(&repo);
    editor.set(Field::Text1, "Piso céntrico");
    editor.assign_file(FileSlot::Image(ImageSlot::One), "casa.jpg", vec![1, 2, 3]);
    assert!(!editor.files().is_empty());

    editor.reset();
    assert_eq!(*editor.state(), FlyerState::default());
    assert!(editor.files().is_empty());
    assert!(repo.document().is_none());

    // Drafts resynced to the defaults too.
    assert_eq!(
        editor.drafts().draft(newhome::flyer::DraftField::Text1),
        "Tipo negocio"
    );
}

#[test]
fn out_of_range_adjustments_land_clamped_in_the_marker_math() {
    let repo = MemoryRepository::new();
    let mut editor = FlyerEditor::open(&repo);

    // A global scale beyond the cap clamps to 1, so a per-image 2 also
    // clamps and the composed result stays at 1.
    editor.set(Field::GlobalImageScale, "2");
    editor.set(
        Field::Image(ImageSlot::One, newhome::flyer::SlotField::Scale),
        "2",
    );
    let adj = adjust::resolve(editor.state(), ImageSlot::One);
    assert_eq!(adj.scale, 1.0);

    editor.set(Field::Energy, "a");
    let marker = energy::marker(editor.state().energy);
    assert!((marker.top_pct - (0.5 * 100.0 / 7.0 + 6.5)).abs() < 1e-9);
    assert_eq!(marker.nudge_px, -15.0);
}

#[test]
fn description_commits_truncated_at_limit() {
    let repo = MemoryRepository::new();
    let mut editor = FlyerEditor::open(&repo);
    let long = "x".repeat(1600);
    editor.edit(newhome::flyer::DraftField::Description, &long);
    assert_eq!(editor.state().description.chars().count(), 1500);

    // The persisted document holds the truncated text as well.
    let reloaded = FlyerEditor::open(&repo);
    assert_eq!(reloaded.state().description.chars().count(), 1500);
}

#[test]
fn payload_covers_every_field_and_staged_file() {
    let repo = MemoryRepository::new();
    let mut editor = FlyerEditor::open(&repo);
    editor.assign_file(FileSlot::Qr, "qr.png", vec![9, 9]);

    let parts = editor.payload();
    let text_parts = parts
        .iter()
        .filter(|p| matches!(p.body, PartBody::Text(_)))
        .count();
    assert_eq!(text_parts, Field::all().len());

    let blob = parts
        .iter()
        .find(|p| p.name == "qr_imagen")
        .expect("qr part present");
    match &blob.body {
        PartBody::Blob { filename, bytes } => {
            assert_eq!(filename, "qr.png");
            assert_eq!(bytes, &vec![9, 9]);
        }
        PartBody::Text(_) => panic!("qr part must be a blob"),
    }

    // Empty slots contribute nothing.
    assert!(!parts.iter().any(|p| p.name == "imagen1"));
}

#[test]
fn editor_state_renders_to_pdf() {
    let repo = MemoryRepository::new();
    let mut editor = FlyerEditor::open(&repo);
    editor.set(Field::Text1, "Ático con terraza");
    editor.set(Field::Energy, "B");

    let pdf = render_flyer(editor.state(), &FlyerImages::default()).expect("renders");
    assert!(pdf.starts_with(b"%PDF-1.7"));
    assert!(pdf.ends_with(b"%%EOF\n") || pdf.ends_with(b"%%EOF"));
}
