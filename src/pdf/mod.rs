//! # Flyer PDF Renderer
//!
//! Renders the committed flyer record plus uploaded images to a single-page
//! A4 PDF. Image placement goes through the same [`ImageAdjustment`]
//! resolution the live preview uses, and the energy marker through the same
//! gauge positioner, so the server output and the preview derive from one
//! set of rules.
//!
//! [`ImageAdjustment`]: crate::flyer::ImageAdjustment

mod writer;

use crate::error::NewHomeError;
use crate::flyer::normalize::{format_superscript, normalize_text};
use crate::flyer::{
    BorderStyle, FitMode, FlyerState, ImageMode, ImageSlot, LEGAL_TEXT, adjust, energy,
};

use writer::{Content, Font, PdfBuilder, Rgb, deflate, parse_hex_color, text_width};

const MM: f64 = 72.0 / 25.4;
const PAGE_W: f64 = 595.28;
const PAGE_H: f64 = 841.89;

/// Header band background.
const HEADER_COLOR: &str = "#213502";
/// Subheader band background.
const SUBHEADER_COLOR: &str = "#c9e0cb";
/// Reduced-price band background.
const BAND_COLOR: &str = "#b71c1c";
/// Gauge band colors, A (best) to G (worst).
const GAUGE_COLORS: [&str; 7] = [
    "#009640", "#52ae32", "#c8d400", "#ffed00", "#fbba00", "#ec6608", "#e30613",
];

/// Decoded upload bytes per slot, as received by the PDF endpoint.
#[derive(Debug, Default)]
pub struct FlyerImages {
    pub slots: [Option<Vec<u8>>; 4],
    pub qr: Option<Vec<u8>>,
}

impl FlyerImages {
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none) && self.qr.is_none()
    }
}

struct EmbeddedImage {
    resource: String,
    width: u32,
    height: u32,
}

fn embed_image(
    pdf: &mut PdfBuilder,
    resource: String,
    bytes: &[u8],
) -> Result<(EmbeddedImage, usize), NewHomeError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| NewHomeError::Image(e.to_string()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());
    let compressed = deflate(rgb.as_raw());
    let id = pdf.add_stream(
        &format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode",
            width, height
        ),
        &compressed,
    );
    Ok((
        EmbeddedImage {
            resource,
            width,
            height,
        },
        id,
    ))
}

/// Greedy word wrap against the estimated glyph widths.
fn wrap_text(text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

/// Draw one grid cell's image, clipped to the cell, placed per the resolved
/// adjustment (ported from the original generator's mode math).
#[allow(clippy::too_many_arguments)]
fn draw_cell_image(
    content: &mut Content,
    img: &EmbeddedImage,
    state: &FlyerState,
    slot: ImageSlot,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) {
    let adj = adjust::resolve(state, slot);
    let img_ratio = img.width as f64 / img.height as f64;
    let box_ratio = w / h;

    let (mut draw_w, mut draw_h) = match adj.fit() {
        FitMode::Cover => {
            if img_ratio > box_ratio {
                (h * img_ratio, h)
            } else {
                (w, w / img_ratio)
            }
        }
        FitMode::Contain => {
            if img_ratio > box_ratio {
                (w, w / img_ratio)
            } else {
                (h * img_ratio, h)
            }
        }
        FitMode::Fill => (w, h),
    };

    if adj.mode == ImageMode::Custom {
        draw_w *= adj.custom_width / 100.0;
        draw_h *= adj.custom_height / 100.0;
    } else {
        draw_w *= adj.scale;
        draw_h *= adj.scale;
    }

    let base_x = x + (w - draw_w) / 2.0;
    let base_y = y + (h - draw_h) / 2.0;
    let shift_x = (w - draw_w).abs() / 2.0 * (adj.offset_x / 100.0);
    let shift_y = (h - draw_h).abs() / 2.0 * (adj.offset_y / 100.0);

    content.save();
    content.clip_rect(x, y, w, h);
    content.image(&img.resource, base_x + shift_x, base_y + shift_y, draw_w, draw_h);
    content.restore();
}

fn draw_feature_border(content: &mut Content, state: &FlyerState, x: f64, y: f64, w: f64, h: f64) {
    content.save();
    content.stroke_color(parse_hex_color(&state.border_color, Rgb::BLACK));
    content.line_width(state.border_style.width());
    match state.border_style {
        BorderStyle::Dashed => content.dash(&[5.0, 3.0]),
        BorderStyle::Dotted => content.dash(&[1.0, 2.0]),
        _ => content.solid(),
    }
    if state.border_style == BorderStyle::Double {
        content.line_width(1.0);
        content.rect_stroke(x, y, w, h);
        content.rect_stroke(x + 2.0, y + 2.0, w - 4.0, h - 4.0);
    } else {
        content.rect_stroke(x, y, w, h);
    }
    content.restore();
}

fn draw_energy_gauge(
    content: &mut Content,
    state: &FlyerState,
    x: f64,
    top: f64,
    w: f64,
    h: f64,
) {
    let band_h = h / 7.0;
    for (i, hex) in GAUGE_COLORS.iter().enumerate() {
        let band_top = top - i as f64 * band_h;
        content.fill_color(parse_hex_color(hex, Rgb::BLACK));
        // Bands narrow toward A, like the certificate artwork.
        let band_w = w * (0.55 + 0.075 * i as f64);
        content.rect_fill(x, band_top - band_h, band_w, band_h - 1.0);
        content.fill_color(Rgb::WHITE);
        content.text(
            Font::Bold,
            7.0,
            x + 2.0,
            band_top - band_h + (band_h - 7.0) / 2.0,
            energy::EnergyRating::ALL[i].as_str(),
        );
    }

    // Marker placed by the gauge positioner; the nudge is in pixels, used
    // 1:1 as points here.
    let marker = energy::marker(state.energy);
    let marker_y = top - h * marker.top_pct / 100.0;
    let tip_x = x + w + 2.0 + marker.nudge_px;
    content.fill_color(Rgb::BLACK);
    content.polygon_fill(&[
        (tip_x, marker_y),
        (tip_x + 8.0, marker_y + 4.0),
        (tip_x + 8.0, marker_y - 4.0),
    ]);
}

/// Render the flyer to PDF bytes.
pub fn render_flyer(state: &FlyerState, images: &FlyerImages) -> Result<Vec<u8>, NewHomeError> {
    let mut pdf = PdfBuilder::new();
    let catalog = pdf.reserve();
    let pages = pdf.reserve();
    let page = pdf.reserve();
    let font_object = |font: Font| {
        format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
            font.base_font()
        )
        .into_bytes()
    };
    let f1 = pdf.add(font_object(Font::Regular));
    let f2 = pdf.add(font_object(Font::Bold));

    let mut xobject_entries = String::new();
    let mut slot_images: [Option<EmbeddedImage>; 4] = [None, None, None, None];
    for slot in ImageSlot::ALL {
        if let Some(bytes) = &images.slots[slot.index()] {
            let resource = format!("/Im{}", slot.index() + 1);
            let (img, id) = embed_image(&mut pdf, resource, bytes)?;
            xobject_entries.push_str(&format!("{} {} 0 R ", img.resource, id));
            slot_images[slot.index()] = Some(img);
        }
    }
    let qr_image = match &images.qr {
        Some(bytes) => {
            let (img, id) = embed_image(&mut pdf, "/Im5".to_string(), bytes)?;
            xobject_entries.push_str(&format!("{} {} 0 R ", img.resource, id));
            Some(img)
        }
        None => None,
    };

    let mut content = Content::new();

    // Background
    content.fill_color(Rgb::WHITE);
    content.rect_fill(0.0, 0.0, PAGE_W, PAGE_H);

    // Header band
    let header_h = 20.0 * MM;
    content.fill_color(parse_hex_color(HEADER_COLOR, Rgb::BLACK));
    content.rect_fill(0.0, PAGE_H - header_h, PAGE_W, header_h);
    content.fill_color(parse_hex_color(&state.text_color1, Rgb::WHITE));
    let header_y = PAGE_H - header_h / 2.0 - 8.0;
    content.text(
        Font::Bold,
        22.0,
        12.0 * MM,
        header_y,
        &non_empty(&state.text1, "TEXTO 1").to_uppercase(),
    );

    // Subheader band
    let sub_h = 12.0 * MM;
    content.fill_color(parse_hex_color(SUBHEADER_COLOR, Rgb::WHITE));
    content.rect_fill(0.0, PAGE_H - header_h - sub_h, PAGE_W, sub_h);
    let sub_y = PAGE_H - header_h - sub_h / 2.0 - 6.0;
    content.fill_color(parse_hex_color(&state.text_color2, Rgb::BLACK));
    content.text(Font::Bold, 14.0, 12.0 * MM, sub_y, non_empty(&state.text2, "TEXTO 2"));
    content.fill_color(parse_hex_color(&state.text_color3, Rgb::BLACK));
    content.text_right(
        Font::Bold,
        13.0,
        PAGE_W - 12.0 * MM,
        sub_y,
        &format_superscript(non_empty(&state.text3, "TEXTO 3")),
    );

    // Image grid, 2x2
    let grid_x = 10.0 * MM;
    let grid_w = PAGE_W - 20.0 * MM;
    let grid_h = 110.0 * MM;
    let grid_gap = 4.0 * MM;
    let grid_top = PAGE_H - header_h - sub_h - 6.0 * MM;
    let cell_w = (grid_w - grid_gap) / 2.0;
    let cell_h = (grid_h - grid_gap) / 2.0;
    for slot in ImageSlot::ALL {
        let col = slot.index() % 2;
        let row = slot.index() / 2;
        let cell_x = grid_x + col as f64 * (cell_w + grid_gap);
        let cell_top = grid_top - row as f64 * (cell_h + grid_gap);
        let cell_y = cell_top - cell_h;
        match &slot_images[slot.index()] {
            Some(img) => draw_cell_image(&mut content, img, state, slot, cell_x, cell_y, cell_w, cell_h),
            None => {
                content.fill_color(parse_hex_color("#f1f3ee", Rgb::WHITE));
                content.rect_fill(cell_x, cell_y, cell_w, cell_h);
                content.fill_color(parse_hex_color("#8a8f85", Rgb::BLACK));
                content.text_centered(
                    Font::Regular,
                    11.0,
                    cell_x + cell_w / 2.0,
                    cell_y + cell_h / 2.0 - 4.0,
                    &format!("Imagen {}", slot.index() + 1),
                );
            }
        }
    }

    // Reduced-price band across the grid
    if state.reduced_price {
        let band_h = 12.0 * MM;
        let band_y = grid_top - grid_h / 2.0 - band_h / 2.0;
        content.fill_color(parse_hex_color(BAND_COLOR, Rgb::BLACK));
        content.rect_fill(grid_x, band_y, grid_w, band_h);
        content.fill_color(parse_hex_color(&state.text_color4, Rgb::WHITE));
        content.text_centered(
            Font::Bold,
            16.0,
            PAGE_W / 2.0,
            band_y + band_h / 2.0 - 6.0,
            &non_empty(&state.text4, "REBAJADO").to_uppercase(),
        );
    }

    // Feature row
    let icons_h = 14.0 * MM;
    let icons_top = grid_top - grid_h - 12.0 * MM;
    draw_feature_border(&mut content, state, grid_x, icons_top - icons_h, grid_w, icons_h);
    let yes_no = |flag: bool| if flag { "Sí" } else { "No" };
    content.fill_color(Rgb::BLACK);
    content.text_centered(
        Font::Regular,
        11.0,
        PAGE_W / 2.0,
        icons_top - icons_h / 2.0 - 4.0,
        &format!(
            "Habitaciones {} · Baños {} · Jardín {} · Garaje {} · Piscina {}",
            state.rooms,
            state.bathrooms,
            yes_no(state.garden),
            yes_no(state.garage),
            yes_no(state.pool)
        ),
    );

    // Details area: QR left, description center, energy gauge right
    let details_top = icons_top - icons_h - 10.0 * MM;
    if let Some(img) = &qr_image {
        let qr_size = 28.0 * MM;
        // Contain-fit inside the square box.
        let ratio = img.width as f64 / img.height as f64;
        let (qw, qh) = if ratio > 1.0 {
            (qr_size, qr_size / ratio)
        } else {
            (qr_size * ratio, qr_size)
        };
        content.image(
            &img.resource,
            grid_x + (qr_size - qw) / 2.0,
            details_top - qr_size + (qr_size - qh) / 2.0,
            qw,
            qh,
        );
    }

    let gauge_w = 22.0 * MM;
    let gauge_h = 40.0 * MM;
    let gauge_x = grid_x + grid_w - gauge_w - 12.0 * MM;
    draw_energy_gauge(&mut content, state, gauge_x, details_top, gauge_w, gauge_h);

    // Description, normalized only for rendering; the stored draft keeps its
    // whitespace.
    let description = normalize_text(&state.description);
    if !description.is_empty() {
        let desc_size = if description.chars().count() > 1000 { 9.0 } else { 10.0 };
        let desc_x = grid_x + 32.0 * MM;
        let desc_w = grid_w - 32.0 * MM - gauge_w - 16.0 * MM;
        content.fill_color(parse_hex_color(&state.description_color, Rgb::BLACK));
        let mut line_y = details_top - desc_size;
        for line in wrap_text(&description, Font::Regular, desc_size, desc_w) {
            if line_y < 30.0 * MM {
                break;
            }
            content.text(Font::Regular, desc_size, desc_x, line_y, &line);
            line_y -= desc_size * 1.25;
        }
    }

    // Price block
    content.fill_color(parse_hex_color("#555555", Rgb::BLACK));
    content.text(Font::Regular, 10.0, grid_x, 30.0 * MM, "Precio");
    content.fill_color(parse_hex_color(&state.price_color, Rgb::BLACK));
    content.text(
        Font::Bold,
        20.0,
        grid_x,
        22.0 * MM,
        non_empty(&state.price, "0€"),
    );

    // Legal disclaimer, verbatim
    content.fill_color(parse_hex_color("#555555", Rgb::BLACK));
    let mut legal_y = 14.0 * MM;
    for line in wrap_text(LEGAL_TEXT, Font::Regular, 6.5, grid_w) {
        content.text(Font::Regular, 6.5, grid_x, legal_y, &line);
        legal_y -= 6.5 * 1.3;
    }

    let content_id = pdf.add_stream("", &content.finish());

    let mut resources = format!("/Font << /F1 {} 0 R /F2 {} 0 R >>", f1, f2);
    if !xobject_entries.is_empty() {
        resources.push_str(&format!(" /XObject << {}>>", xobject_entries));
    }
    pdf.set(
        page,
        format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources << {} >> /Contents {} 0 R >>",
            pages, PAGE_W, PAGE_H, resources, content_id
        )
        .into_bytes(),
    );
    pdf.set(
        pages,
        format!("<< /Type /Pages /Kids [{} 0 R] /Count 1 >>", page).into_bytes(),
    );
    pdf.set(
        catalog,
        format!("<< /Type /Catalog /Pages {} 0 R >>", pages).into_bytes(),
    );

    Ok(pdf.finish(catalog))
}
