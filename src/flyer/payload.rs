//! # Payload Assembler
//!
//! Serializes the committed form state plus staged files into the single
//! multipart payload the PDF endpoint consumes. Key naming is deterministic:
//! one text part per state field in [`Field::all`] order, then one blob part
//! per non-empty slot in slot order. Empty slots are omitted entirely —
//! absence, not an empty value.

use super::files::{FileSlot, FileStaging};
use super::{Field, FlyerState};

/// Body of one payload part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    Text(String),
    Blob { filename: String, bytes: Vec<u8> },
}

/// One named part of the transport payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    pub name: &'static str,
    pub body: PartBody,
}

/// Assemble the full payload: every field stringified, every staged blob.
pub fn build_payload(state: &FlyerState, files: &FileStaging) -> Vec<PayloadPart> {
    let mut parts: Vec<PayloadPart> = Field::all()
        .into_iter()
        .map(|field| PayloadPart {
            name: field.key(),
            body: PartBody::Text(state.get(field)),
        })
        .collect();
    for slot in FileSlot::ALL {
        if let Some(file) = files.file(slot) {
            parts.push(PayloadPart {
                name: slot.key(),
                body: PartBody::Blob {
                    filename: file.filename.clone(),
                    bytes: file.bytes.clone(),
                },
            });
        }
    }
    parts
}

/// Convert assembled parts into a multipart form for the HTTP client.
pub fn into_multipart(parts: Vec<PayloadPart>) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part.body {
            PartBody::Text(value) => form.text(part.name, value),
            PartBody::Blob { filename, bytes } => form.part(
                part.name,
                reqwest::multipart::Part::bytes(bytes).file_name(filename),
            ),
        };
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::ImageSlot;

    #[test]
    fn test_payload_has_one_part_per_field() {
        let parts = build_payload(&FlyerState::default(), &FileStaging::new());
        assert_eq!(parts.len(), Field::all().len());
        assert_eq!(parts[0].name, "texto1");
        assert_eq!(parts[0].body, PartBody::Text("Tipo negocio".to_string()));
    }

    #[test]
    fn test_booleans_and_numbers_stringified() {
        let parts = build_payload(&FlyerState::default(), &FileStaging::new());
        let text_of = |name: &str| {
            parts
                .iter()
                .find(|p| p.name == name)
                .map(|p| match &p.body {
                    PartBody::Text(v) => v.clone(),
                    PartBody::Blob { .. } => panic!("expected text part"),
                })
                .expect("part present")
        };
        assert_eq!(text_of("rebajado"), "true");
        assert_eq!(text_of("habitaciones"), "1");
        assert_eq!(text_of("escala_imagenes"), "0.93");
        assert_eq!(text_of("imagen1_escala"), "1");
        assert_eq!(text_of("imagen1_modo"), "contain");
    }

    #[test]
    fn test_empty_slots_omitted_entirely() {
        let mut files = FileStaging::new();
        files.assign(FileSlot::Image(ImageSlot::Two), "foto.jpg", vec![0xFF]);
        let parts = build_payload(&FlyerState::default(), &files);
        assert_eq!(parts.len(), Field::all().len() + 1);
        let blob = parts.last().expect("blob part");
        assert_eq!(blob.name, "imagen2");
        assert!(parts.iter().all(|p| p.name != "imagen1" || matches!(p.body, PartBody::Text(_))));
        assert!(parts.iter().all(|p| p.name != "qr_imagen"));
    }

    #[test]
    fn test_payload_order_is_deterministic() {
        let mut files = FileStaging::new();
        files.assign(FileSlot::Qr, "qr.png", vec![1]);
        files.assign(FileSlot::Image(ImageSlot::One), "a.jpg", vec![2]);
        let a = build_payload(&FlyerState::default(), &files);
        let b = build_payload(&FlyerState::default(), &files);
        assert_eq!(a, b);
        // Blob order follows slot order, not assignment order.
        let blobs: Vec<&str> = a
            .iter()
            .filter(|p| matches!(p.body, PartBody::Blob { .. }))
            .map(|p| p.name)
            .collect();
        assert_eq!(blobs, vec!["imagen1", "qr_imagen"]);
    }
}
