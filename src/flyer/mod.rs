//! # Flyer Domain Core
//!
//! The canonical flyer record and everything that derives render-safe view
//! state from it:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`normalize`] | Pure, default-on-failure field normalizers |
//! | [`adjust`] | Per-slot image adjustment resolver |
//! | [`energy`] | Energy-rating gauge marker positioner |
//! | [`store`] | Persisted form state store |
//! | [`draft`] | Draft/commit text editing |
//! | [`files`] | Binary attachment staging with preview handles |
//! | [`payload`] | Multipart payload assembly |
//! | [`editor`] | Facade composing store, drafts and staging |
//!
//! [`FlyerState`] is the single durable source of truth. It is mutated only
//! through [`FlyerState::apply`], which routes every raw value through the
//! matching normalizer, so bounded fields never hold out-of-range values.

pub mod adjust;
pub mod draft;
pub mod editor;
pub mod energy;
pub mod files;
pub mod normalize;
pub mod payload;
pub mod store;

pub use adjust::{FitMode, ImageAdjustment};
pub use draft::{DraftEditor, DraftField};
pub use editor::FlyerEditor;
pub use energy::{EnergyMarker, EnergyRating};
pub use files::{FileSlot, FileStaging, StagedFile};
pub use normalize::ImageMode;
pub use payload::{PartBody, PayloadPart, build_payload};
pub use store::FormStore;

use std::fmt;

use normalize::{parse_dimension, parse_offset, parse_scale};

/// Hard maximum length for the description field, enforced at the input
/// boundary by truncation (never rejection).
pub const DESCRIPTION_MAX: usize = 1500;

/// Legal disclaimer rendered verbatim on every flyer. Not user-editable.
pub const LEGAL_TEXT: &str = "En cumplimiento del decreto de la Junta de Andalucía 218/2005 del 11 de octubre, se informa al cliente que los gastos notariales, registrales, ITP y otros gastos inherentes a la compraventa no están incluidos en la venta.";

/// One of the four image positions on the flyer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageSlot {
    One,
    Two,
    Three,
    Four,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 4] = [
        ImageSlot::One,
        ImageSlot::Two,
        ImageSlot::Three,
        ImageSlot::Four,
    ];

    /// Zero-based grid index.
    pub fn index(self) -> usize {
        match self {
            ImageSlot::One => 0,
            ImageSlot::Two => 1,
            ImageSlot::Three => 2,
            ImageSlot::Four => 3,
        }
    }

    /// Wire key prefix (`imagen1` .. `imagen4`).
    pub fn key(self) -> &'static str {
        match self {
            ImageSlot::One => "imagen1",
            ImageSlot::Two => "imagen2",
            ImageSlot::Three => "imagen3",
            ImageSlot::Four => "imagen4",
        }
    }
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// CSS-style border for the feature icon row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyle {
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "dashed" => BorderStyle::Dashed,
            "dotted" => BorderStyle::Dotted,
            "double" => BorderStyle::Double,
            "groove" => BorderStyle::Groove,
            "ridge" => BorderStyle::Ridge,
            "inset" => BorderStyle::Inset,
            "outset" => BorderStyle::Outset,
            _ => BorderStyle::Solid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
            BorderStyle::Groove => "groove",
            BorderStyle::Ridge => "ridge",
            BorderStyle::Inset => "inset",
            BorderStyle::Outset => "outset",
        }
    }

    /// Rendered border width: double is heaviest, the relief styles get a
    /// medium weight, everything else a hairline.
    pub fn width(self) -> f64 {
        match self {
            BorderStyle::Double => 3.0,
            BorderStyle::Groove | BorderStyle::Ridge | BorderStyle::Inset | BorderStyle::Outset => {
                2.0
            }
            _ => 1.0,
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-slot image settings as stored. The renderable descriptor is resolved
/// from these plus the global scale by [`adjust::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSettings {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub mode: ImageMode,
    pub custom_width: f64,
    pub custom_height: f64,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            mode: ImageMode::Contain,
            custom_width: 100.0,
            custom_height: 100.0,
        }
    }
}

/// The canonical, persisted flyer record.
///
/// Field names on the wire (payload and persisted document) are the original
/// Spanish keys; see [`Field::key`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlyerState {
    pub text1: String,
    pub text_color1: String,
    pub text2: String,
    pub text_color2: String,
    pub text3: String,
    pub text_color3: String,
    pub text4: String,
    pub text_color4: String,
    pub reduced_price: bool,
    /// Unclamped by design: the source imposes no bounds on room counts.
    pub rooms: i64,
    pub bathrooms: i64,
    pub garden: bool,
    pub garage: bool,
    pub pool: bool,
    pub border_style: BorderStyle,
    pub border_color: String,
    pub description: String,
    pub description_color: String,
    pub price: String,
    pub price_color: String,
    pub energy: EnergyRating,
    pub global_image_scale: f64,
    pub images: [ImageSettings; 4],
}

impl Default for FlyerState {
    fn default() -> Self {
        Self {
            text1: "Tipo negocio".to_string(),
            text_color1: "#ffffff".to_string(),
            text2: "Calle".to_string(),
            text_color2: "#000000".to_string(),
            text3: "números m² construidos".to_string(),
            text_color3: "#000000".to_string(),
            text4: "REBAJADO".to_string(),
            text_color4: "#ffffff".to_string(),
            reduced_price: true,
            rooms: 1,
            bathrooms: 1,
            garden: true,
            garage: true,
            pool: true,
            border_style: BorderStyle::Solid,
            border_color: "#111111".to_string(),
            description: String::new(),
            description_color: "#000000".to_string(),
            price: "154.900€".to_string(),
            price_color: "#b9cdb8".to_string(),
            energy: EnergyRating::E,
            global_image_scale: 0.93,
            images: [
                ImageSettings::default(),
                ImageSettings::default(),
                ImageSettings::default(),
                ImageSettings::default(),
            ],
        }
    }
}

/// One numeric/textual setting of an image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotField {
    Scale,
    OffsetX,
    OffsetY,
    Mode,
    CustomWidth,
    CustomHeight,
}

impl SlotField {
    pub const ALL: [SlotField; 6] = [
        SlotField::Scale,
        SlotField::OffsetX,
        SlotField::OffsetY,
        SlotField::Mode,
        SlotField::CustomWidth,
        SlotField::CustomHeight,
    ];
}

/// Every settable field of [`FlyerState`], one variant per wire key.
///
/// This is the explicit field-to-normalizer table: [`FlyerState::apply`]
/// matches on it rather than inspecting key suffixes at runtime, so each
/// field's normalization is statically auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Text1,
    TextColor1,
    Text2,
    TextColor2,
    Text3,
    TextColor3,
    Text4,
    TextColor4,
    ReducedPrice,
    Rooms,
    Bathrooms,
    Garden,
    Garage,
    Pool,
    BorderStyle,
    BorderColor,
    Description,
    DescriptionColor,
    Price,
    PriceColor,
    Energy,
    GlobalImageScale,
    Image(ImageSlot, SlotField),
}

impl Field {
    /// Wire key for this field (payload key and persisted-document key).
    pub fn key(self) -> &'static str {
        use SlotField::*;
        match self {
            Field::Text1 => "texto1",
            Field::TextColor1 => "color_texto1",
            Field::Text2 => "texto2",
            Field::TextColor2 => "color_texto2",
            Field::Text3 => "texto3",
            Field::TextColor3 => "color_texto3",
            Field::Text4 => "texto4",
            Field::TextColor4 => "color_texto4",
            Field::ReducedPrice => "rebajado",
            Field::Rooms => "habitaciones",
            Field::Bathrooms => "banos",
            Field::Garden => "jardin",
            Field::Garage => "garaje",
            Field::Pool => "piscina",
            Field::BorderStyle => "borde_caracteristicas",
            Field::BorderColor => "color_borde_caracteristicas",
            Field::Description => "descripcion",
            Field::DescriptionColor => "color_descripcion",
            Field::Price => "precio",
            Field::PriceColor => "color_precio",
            Field::Energy => "energia",
            Field::GlobalImageScale => "escala_imagenes",
            Field::Image(slot, sub) => match (slot, sub) {
                (ImageSlot::One, Scale) => "imagen1_escala",
                (ImageSlot::One, OffsetX) => "imagen1_offset_x",
                (ImageSlot::One, OffsetY) => "imagen1_offset_y",
                (ImageSlot::One, Mode) => "imagen1_modo",
                (ImageSlot::One, CustomWidth) => "imagen1_custom_ancho",
                (ImageSlot::One, CustomHeight) => "imagen1_custom_alto",
                (ImageSlot::Two, Scale) => "imagen2_escala",
                (ImageSlot::Two, OffsetX) => "imagen2_offset_x",
                (ImageSlot::Two, OffsetY) => "imagen2_offset_y",
                (ImageSlot::Two, Mode) => "imagen2_modo",
                (ImageSlot::Two, CustomWidth) => "imagen2_custom_ancho",
                (ImageSlot::Two, CustomHeight) => "imagen2_custom_alto",
                (ImageSlot::Three, Scale) => "imagen3_escala",
                (ImageSlot::Three, OffsetX) => "imagen3_offset_x",
                (ImageSlot::Three, OffsetY) => "imagen3_offset_y",
                (ImageSlot::Three, Mode) => "imagen3_modo",
                (ImageSlot::Three, CustomWidth) => "imagen3_custom_ancho",
                (ImageSlot::Three, CustomHeight) => "imagen3_custom_alto",
                (ImageSlot::Four, Scale) => "imagen4_escala",
                (ImageSlot::Four, OffsetX) => "imagen4_offset_x",
                (ImageSlot::Four, OffsetY) => "imagen4_offset_y",
                (ImageSlot::Four, Mode) => "imagen4_modo",
                (ImageSlot::Four, CustomWidth) => "imagen4_custom_ancho",
                (ImageSlot::Four, CustomHeight) => "imagen4_custom_alto",
            },
        }
    }

    /// Look up a field by its wire key.
    pub fn from_key(key: &str) -> Option<Field> {
        use SlotField::*;
        Some(match key {
            "texto1" => Field::Text1,
            "color_texto1" => Field::TextColor1,
            "texto2" => Field::Text2,
            "color_texto2" => Field::TextColor2,
            "texto3" => Field::Text3,
            "color_texto3" => Field::TextColor3,
            "texto4" => Field::Text4,
            "color_texto4" => Field::TextColor4,
            "rebajado" => Field::ReducedPrice,
            "habitaciones" => Field::Rooms,
            "banos" => Field::Bathrooms,
            "jardin" => Field::Garden,
            "garaje" => Field::Garage,
            "piscina" => Field::Pool,
            "borde_caracteristicas" => Field::BorderStyle,
            "color_borde_caracteristicas" => Field::BorderColor,
            "descripcion" => Field::Description,
            "color_descripcion" => Field::DescriptionColor,
            "precio" => Field::Price,
            "color_precio" => Field::PriceColor,
            "energia" => Field::Energy,
            "escala_imagenes" => Field::GlobalImageScale,
            "imagen1_escala" => Field::Image(ImageSlot::One, Scale),
            "imagen1_offset_x" => Field::Image(ImageSlot::One, OffsetX),
            "imagen1_offset_y" => Field::Image(ImageSlot::One, OffsetY),
            "imagen1_modo" => Field::Image(ImageSlot::One, Mode),
            "imagen1_custom_ancho" => Field::Image(ImageSlot::One, CustomWidth),
            "imagen1_custom_alto" => Field::Image(ImageSlot::One, CustomHeight),
            "imagen2_escala" => Field::Image(ImageSlot::Two, Scale),
            "imagen2_offset_x" => Field::Image(ImageSlot::Two, OffsetX),
            "imagen2_offset_y" => Field::Image(ImageSlot::Two, OffsetY),
            "imagen2_modo" => Field::Image(ImageSlot::Two, Mode),
            "imagen2_custom_ancho" => Field::Image(ImageSlot::Two, CustomWidth),
            "imagen2_custom_alto" => Field::Image(ImageSlot::Two, CustomHeight),
            "imagen3_escala" => Field::Image(ImageSlot::Three, Scale),
            "imagen3_offset_x" => Field::Image(ImageSlot::Three, OffsetX),
            "imagen3_offset_y" => Field::Image(ImageSlot::Three, OffsetY),
            "imagen3_modo" => Field::Image(ImageSlot::Three, Mode),
            "imagen3_custom_ancho" => Field::Image(ImageSlot::Three, CustomWidth),
            "imagen3_custom_alto" => Field::Image(ImageSlot::Three, CustomHeight),
            "imagen4_escala" => Field::Image(ImageSlot::Four, Scale),
            "imagen4_offset_x" => Field::Image(ImageSlot::Four, OffsetX),
            "imagen4_offset_y" => Field::Image(ImageSlot::Four, OffsetY),
            "imagen4_modo" => Field::Image(ImageSlot::Four, Mode),
            "imagen4_custom_ancho" => Field::Image(ImageSlot::Four, CustomWidth),
            "imagen4_custom_alto" => Field::Image(ImageSlot::Four, CustomHeight),
            _ => return None,
        })
    }

    /// All fields, in the order they appear in the payload and the persisted
    /// document.
    pub fn all() -> Vec<Field> {
        let mut fields = vec![
            Field::Text1,
            Field::TextColor1,
            Field::Text2,
            Field::TextColor2,
            Field::Text3,
            Field::TextColor3,
            Field::Text4,
            Field::TextColor4,
            Field::ReducedPrice,
            Field::Rooms,
            Field::Bathrooms,
            Field::Garden,
            Field::Garage,
            Field::Pool,
            Field::BorderStyle,
            Field::BorderColor,
            Field::Description,
            Field::DescriptionColor,
            Field::Price,
            Field::PriceColor,
            Field::Energy,
            Field::GlobalImageScale,
        ];
        for slot in ImageSlot::ALL {
            for sub in SlotField::ALL {
                fields.push(Field::Image(slot, sub));
            }
        }
        fields
    }
}

/// Parse a lenient boolean ("1", "true", "yes", "si", "sí", "on").
pub(crate) fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "si" | "sí" | "on"
    )
}

fn parse_count(raw: &str) -> i64 {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .unwrap_or_else(|_| trimmed.parse::<f64>().map(|v| v as i64).unwrap_or(0))
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

impl FlyerState {
    /// Route raw input through the field's normalizer and store the result.
    ///
    /// This is the only mutation path; invalid input is absorbed into safe
    /// defaults and never surfaces as an error.
    pub fn apply(&mut self, field: Field, raw: &str) {
        match field {
            Field::Text1 => self.text1 = raw.to_string(),
            Field::TextColor1 => self.text_color1 = raw.to_string(),
            Field::Text2 => self.text2 = raw.to_string(),
            Field::TextColor2 => self.text_color2 = raw.to_string(),
            Field::Text3 => self.text3 = raw.to_string(),
            Field::TextColor3 => self.text_color3 = raw.to_string(),
            Field::Text4 => self.text4 = raw.to_string(),
            Field::TextColor4 => self.text_color4 = raw.to_string(),
            Field::ReducedPrice => self.reduced_price = parse_bool(raw),
            Field::Rooms => self.rooms = parse_count(raw),
            Field::Bathrooms => self.bathrooms = parse_count(raw),
            Field::Garden => self.garden = parse_bool(raw),
            Field::Garage => self.garage = parse_bool(raw),
            Field::Pool => self.pool = parse_bool(raw),
            Field::BorderStyle => self.border_style = BorderStyle::from_raw(raw),
            Field::BorderColor => self.border_color = raw.to_string(),
            Field::Description => self.description = truncate_chars(raw, DESCRIPTION_MAX),
            Field::DescriptionColor => self.description_color = raw.to_string(),
            Field::Price => self.price = raw.to_string(),
            Field::PriceColor => self.price_color = raw.to_string(),
            Field::Energy => self.energy = EnergyRating::from_raw(raw),
            Field::GlobalImageScale => self.global_image_scale = parse_scale(raw),
            Field::Image(slot, sub) => {
                let settings = &mut self.images[slot.index()];
                match sub {
                    SlotField::Scale => settings.scale = parse_scale(raw),
                    SlotField::OffsetX => settings.offset_x = parse_offset(raw),
                    SlotField::OffsetY => settings.offset_y = parse_offset(raw),
                    SlotField::Mode => settings.mode = ImageMode::from_raw(raw),
                    SlotField::CustomWidth => settings.custom_width = parse_dimension(raw),
                    SlotField::CustomHeight => settings.custom_height = parse_dimension(raw),
                }
            }
        }
    }

    /// Stringified value of a field, as it appears on the wire.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Text1 => self.text1.clone(),
            Field::TextColor1 => self.text_color1.clone(),
            Field::Text2 => self.text2.clone(),
            Field::TextColor2 => self.text_color2.clone(),
            Field::Text3 => self.text3.clone(),
            Field::TextColor3 => self.text_color3.clone(),
            Field::Text4 => self.text4.clone(),
            Field::TextColor4 => self.text_color4.clone(),
            Field::ReducedPrice => self.reduced_price.to_string(),
            Field::Rooms => self.rooms.to_string(),
            Field::Bathrooms => self.bathrooms.to_string(),
            Field::Garden => self.garden.to_string(),
            Field::Garage => self.garage.to_string(),
            Field::Pool => self.pool.to_string(),
            Field::BorderStyle => self.border_style.to_string(),
            Field::BorderColor => self.border_color.clone(),
            Field::Description => self.description.clone(),
            Field::DescriptionColor => self.description_color.clone(),
            Field::Price => self.price.clone(),
            Field::PriceColor => self.price_color.clone(),
            Field::Energy => self.energy.to_string(),
            Field::GlobalImageScale => self.global_image_scale.to_string(),
            Field::Image(slot, sub) => {
                let settings = &self.images[slot.index()];
                match sub {
                    SlotField::Scale => settings.scale.to_string(),
                    SlotField::OffsetX => settings.offset_x.to_string(),
                    SlotField::OffsetY => settings.offset_y.to_string(),
                    SlotField::Mode => settings.mode.to_string(),
                    SlotField::CustomWidth => settings.custom_width.to_string(),
                    SlotField::CustomHeight => settings.custom_height.to_string(),
                }
            }
        }
    }

    /// Per-slot settings.
    pub fn image(&self, slot: ImageSlot) -> &ImageSettings {
        &self.images[slot.index()]
    }
}
