//! # Image Adjustment Resolver
//!
//! Combines the global image scale with a slot's own settings into a single
//! renderable descriptor. Adjustments are resolved on demand, never stored.

use super::normalize::{ImageMode, clamp_dimension, clamp_offset, clamp_scale};
use super::{FlyerState, ImageSlot};

/// How the preview/renderer fits the image into its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    Contain,
    Cover,
    /// Stretch to the rendered box. Both `expand` and `custom` map here.
    Fill,
}

/// Render descriptor for one image slot. All values are within their
/// declared bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAdjustment {
    pub mode: ImageMode,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub custom_width: f64,
    pub custom_height: f64,
}

/// Resolve the renderable adjustment for one slot.
///
/// Global and per-slot scales compose multiplicatively and the product is
/// re-clamped to `[0.01, 1]`, so composition can never escape the visual
/// bound (0.01 × 0.01 resolves to 0.01, not 0.0001).
pub fn resolve(state: &FlyerState, slot: ImageSlot) -> ImageAdjustment {
    let base = clamp_scale(state.global_image_scale);
    let settings = state.image(slot);
    let individual = clamp_scale(settings.scale);
    ImageAdjustment {
        mode: settings.mode,
        scale: clamp_scale(base * individual),
        offset_x: clamp_offset(settings.offset_x),
        offset_y: clamp_offset(settings.offset_y),
        custom_width: clamp_dimension(settings.custom_width),
        custom_height: clamp_dimension(settings.custom_height),
    }
}

impl ImageAdjustment {
    /// Rendering-facing fit: `expand` and `custom` both fill the box.
    pub fn fit(&self) -> FitMode {
        match self.mode {
            ImageMode::Contain => FitMode::Contain,
            ImageMode::Cover => FitMode::Cover,
            ImageMode::Expand | ImageMode::Custom => FitMode::Fill,
        }
    }

    /// Rendered width as a percentage of the cell. The custom dimension
    /// applies only in custom mode.
    pub fn rendered_width(&self) -> f64 {
        if self.mode == ImageMode::Custom {
            self.custom_width
        } else {
            100.0
        }
    }

    /// Rendered height as a percentage of the cell.
    pub fn rendered_height(&self) -> f64 {
        if self.mode == ImageMode::Custom {
            self.custom_height
        } else {
            100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::{Field, SlotField};

    fn state_with_scales(global: f64, slot_scale: f64) -> FlyerState {
        let mut state = FlyerState::default();
        state.global_image_scale = global;
        state.images[0].scale = slot_scale;
        state
    }

    #[test]
    fn test_scale_composition_is_commutative() {
        let a = resolve(&state_with_scales(0.5, 0.8), ImageSlot::One).scale;
        let b = resolve(&state_with_scales(0.8, 0.5), ImageSlot::One).scale;
        assert_eq!(a, b);
        assert_eq!(a, 0.4);
    }

    #[test]
    fn test_scale_stays_within_bound_under_extremes() {
        assert_eq!(
            resolve(&state_with_scales(1.0, 1.0), ImageSlot::One).scale,
            1.0
        );
        // The product re-clamps: 0.01 * 0.01 resolves to 0.01, not 0.0001.
        assert_eq!(
            resolve(&state_with_scales(0.01, 0.01), ImageSlot::One).scale,
            0.01
        );
        let adj = resolve(&state_with_scales(f64::NAN, 5.0), ImageSlot::One);
        assert!(adj.scale >= 0.01 && adj.scale <= 1.0);
    }

    #[test]
    fn test_fit_derivation() {
        let mut state = FlyerState::default();
        state.apply(Field::Image(ImageSlot::One, SlotField::Mode), "expand");
        assert_eq!(resolve(&state, ImageSlot::One).fit(), FitMode::Fill);
        state.apply(Field::Image(ImageSlot::One, SlotField::Mode), "custom");
        assert_eq!(resolve(&state, ImageSlot::One).fit(), FitMode::Fill);
        state.apply(Field::Image(ImageSlot::One, SlotField::Mode), "cover");
        assert_eq!(resolve(&state, ImageSlot::One).fit(), FitMode::Cover);
    }

    #[test]
    fn test_custom_dimensions_apply_only_in_custom_mode() {
        let mut state = FlyerState::default();
        state.apply(Field::Image(ImageSlot::One, SlotField::CustomWidth), "60");
        state.apply(Field::Image(ImageSlot::One, SlotField::CustomHeight), "140");

        let adj = resolve(&state, ImageSlot::One);
        assert_eq!(adj.rendered_width(), 100.0);
        assert_eq!(adj.rendered_height(), 100.0);

        state.apply(Field::Image(ImageSlot::One, SlotField::Mode), "custom");
        let adj = resolve(&state, ImageSlot::One);
        assert_eq!(adj.rendered_width(), 60.0);
        assert_eq!(adj.rendered_height(), 140.0);
    }
}
