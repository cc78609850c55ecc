//! PDF generation API handler.
//!
//! Accepts the full flyer record plus uploads as one multipart form and
//! responds with the rendered PDF as a file attachment. Every text field goes
//! through the same normalizers the editor uses, so a hand-crafted request
//! with out-of-range adjustments still renders with clamped values.

use axum::{
    extract::Multipart,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::api::PDF_FILENAME;
use crate::flyer::{Field, FileSlot, FlyerState};
use crate::pdf::{render_flyer, FlyerImages};

/// POST /api/pdf - Render the flyer from a multipart submission.
pub async fn generate(mut multipart: Multipart) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut state = FlyerState::default();
    let mut images = FlyerImages::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if let Some(slot) = FileSlot::from_key(&name) {
            let bytes = field.bytes().await.map_err(|e| {
                (StatusCode::BAD_REQUEST, format!("Failed to read {}: {}", name, e))
            })?;
            if bytes.is_empty() {
                continue;
            }
            match slot {
                FileSlot::Image(image_slot) => {
                    images.slots[image_slot.index()] = Some(bytes.to_vec());
                }
                FileSlot::Qr => images.qr = Some(bytes.to_vec()),
            }
        } else if let Some(form_field) = Field::from_key(&name) {
            let value = field.text().await.map_err(|e| {
                (StatusCode::BAD_REQUEST, format!("Failed to read {}: {}", name, e))
            })?;
            state.apply(form_field, &value);
        }
        // Unknown part names are ignored.
    }

    println!(
        "[server] rendering flyer ({} images, qr: {})",
        staged_image_count(&images),
        images.qr.is_some()
    );

    let pdf = render_flyer(&state, &images)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", PDF_FILENAME),
            ),
        ],
        pdf,
    ))
}

fn staged_image_count(images: &FlyerImages) -> usize {
    images.slots.iter().filter(|s| s.is_some()).count()
}
