//! Minimal PDF 1.7 writer: object table, xref, content-stream ops.
//!
//! Only what the flyer page needs: the two built-in Helvetica fonts with
//! WinAnsi encoding (covers the Spanish text, `€` and `²`) and Flate-encoded
//! RGB image XObjects.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;

/// Accumulates numbered PDF objects, then serializes header, bodies, xref
/// and trailer.
pub(crate) struct PdfBuilder {
    objects: Vec<Option<Vec<u8>>>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Allocate an object number to be filled in later (for dictionaries
    /// that reference objects created afterwards).
    pub fn reserve(&mut self) -> usize {
        self.objects.push(None);
        self.objects.len()
    }

    pub fn set(&mut self, id: usize, body: Vec<u8>) {
        self.objects[id - 1] = Some(body);
    }

    pub fn add(&mut self, body: Vec<u8>) -> usize {
        let id = self.reserve();
        self.set(id, body);
        id
    }

    /// Add a stream object with the given extra dictionary entries.
    pub fn add_stream(&mut self, extra_dict: &str, data: &[u8]) -> usize {
        let mut body = format!("<< /Length {} {} >>\nstream\n", data.len(), extra_dict).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.add(body)
    }

    pub fn finish(self, root_id: usize) -> Vec<u8> {
        let mut out = b"%PDF-1.7\n".to_vec();
        let mut offsets = Vec::with_capacity(self.objects.len());
        for (i, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body.as_deref().unwrap_or(b"null"));
            out.extend_from_slice(b"\nendobj\n");
        }
        let xref_pos = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", self.objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
                self.objects.len() + 1,
                root_id,
                xref_pos
            )
            .as_bytes(),
        );
        out
    }
}

/// Zlib-compress raw data for a Flate stream.
pub(crate) fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    // Writing to a Vec cannot fail.
    let _ = encoder.write_all(data);
    encoder.finish().unwrap_or_default()
}

/// RGB color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rgb(pub f64, pub f64, pub f64);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
}

/// Parse `#rgb`/`#rrggbb`; anything else yields the fallback (input errors
/// are absorbed, like every other normalizer).
pub(crate) fn parse_hex_color(raw: &str, fallback: Rgb) -> Rgb {
    let hex = raw.trim().strip_prefix('#').unwrap_or_else(|| raw.trim());
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return fallback,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0),
        _ => fallback,
    }
}

/// The two page fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
}

impl Font {
    pub fn resource(self) -> &'static str {
        match self {
            Font::Regular => "/F1",
            Font::Bold => "/F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Rough average glyph advance in em units, enough for alignment and
    /// greedy wrapping with built-in fonts.
    fn mean_advance(self) -> f64 {
        match self {
            Font::Regular => 0.50,
            Font::Bold => 0.55,
        }
    }
}

/// Estimated rendered width of a string in points.
pub(crate) fn text_width(text: &str, font: Font, size: f64) -> f64 {
    text.chars().count() as f64 * size * font.mean_advance()
}

/// Map a char to its WinAnsi byte. Latin-1 passes through except the
/// 0x80–0x9F window, where WinAnsi places typographic characters.
fn winansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '€' => 0x80,
        '…' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
        _ => b'?',
    }
}

fn encode_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        let b = winansi_byte(c);
        if b == b'(' || b == b')' || b == b'\\' {
            out.push(b'\\');
        }
        out.push(b);
    }
    out.push(b')');
    out
}

/// Page content stream builder. Coordinates are PDF points, origin at the
/// bottom-left.
pub(crate) struct Content {
    ops: Vec<u8>,
}

impl Content {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    fn op(&mut self, text: String) {
        self.ops.extend_from_slice(text.as_bytes());
        self.ops.push(b'\n');
    }

    pub fn save(&mut self) {
        self.op("q".to_string());
    }

    pub fn restore(&mut self) {
        self.op("Q".to_string());
    }

    pub fn fill_color(&mut self, color: Rgb) {
        self.op(format!("{:.3} {:.3} {:.3} rg", color.0, color.1, color.2));
    }

    pub fn stroke_color(&mut self, color: Rgb) {
        self.op(format!("{:.3} {:.3} {:.3} RG", color.0, color.1, color.2));
    }

    pub fn line_width(&mut self, width: f64) {
        self.op(format!("{:.2} w", width));
    }

    pub fn dash(&mut self, pattern: &[f64]) {
        let entries: Vec<String> = pattern.iter().map(|v| format!("{:.2}", v)).collect();
        self.op(format!("[{}] 0 d", entries.join(" ")));
    }

    pub fn solid(&mut self) {
        self.op("[] 0 d".to_string());
    }

    pub fn rect_fill(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.op(format!("{:.2} {:.2} {:.2} {:.2} re f", x, y, w, h));
    }

    pub fn rect_stroke(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.op(format!("{:.2} {:.2} {:.2} {:.2} re S", x, y, w, h));
    }

    /// Clip subsequent drawing to a rectangle. Pair with save/restore.
    pub fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.op(format!("{:.2} {:.2} {:.2} {:.2} re W n", x, y, w, h));
    }

    /// Fill a closed polygon.
    pub fn polygon_fill(&mut self, points: &[(f64, f64)]) {
        if points.is_empty() {
            return;
        }
        let mut path = format!("{:.2} {:.2} m", points[0].0, points[0].1);
        for (x, y) in &points[1..] {
            path.push_str(&format!(" {:.2} {:.2} l", x, y));
        }
        path.push_str(" h f");
        self.op(path);
    }

    pub fn text(&mut self, font: Font, size: f64, x: f64, y: f64, text: &str) {
        self.ops.extend_from_slice(
            format!("BT {} {:.2} Tf {:.2} {:.2} Td ", font.resource(), size, x, y).as_bytes(),
        );
        self.ops.extend_from_slice(&encode_string(text));
        self.ops.extend_from_slice(b" Tj ET\n");
    }

    /// Draw text so its estimated right edge lands at `right_x`.
    pub fn text_right(&mut self, font: Font, size: f64, right_x: f64, y: f64, text: &str) {
        let x = right_x - text_width(text, font, size);
        self.text(font, size, x, y, text);
    }

    /// Draw text centered on `center_x`.
    pub fn text_centered(&mut self, font: Font, size: f64, center_x: f64, y: f64, text: &str) {
        let x = center_x - text_width(text, font, size) / 2.0;
        self.text(font, size, x, y, text);
    }

    /// Paint an image XObject into the given rectangle.
    pub fn image(&mut self, resource: &str, x: f64, y: f64, w: f64, h: f64) {
        self.op(format!(
            "q {:.2} 0 0 {:.2} {:.2} {:.2} cm {} Do Q",
            w, h, x, y, resource
        ));
    }

    pub fn finish(self) -> Vec<u8> {
        self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_produces_valid_skeleton() {
        let mut pdf = PdfBuilder::new();
        let catalog = pdf.reserve();
        let pages = pdf.add(b"<< /Type /Pages /Kids [] /Count 0 >>".to_vec());
        pdf.set(
            catalog,
            format!("<< /Type /Catalog /Pages {} 0 R >>", pages).into_bytes(),
        );
        let bytes = pdf.finish(catalog);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.7"));
        assert!(text.contains("1 0 obj"));
        assert!(text.contains("xref"));
        assert!(text.contains("/Root 1 0 R"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut pdf = PdfBuilder::new();
        pdf.add(b"<< >>".to_vec());
        pdf.add(b"<< >>".to_vec());
        let bytes = pdf.finish(1);
        let text = String::from_utf8_lossy(&bytes);
        for (i, line) in text.lines().skip_while(|l| *l != "0000000000 65535 f ").skip(1).take(2).enumerate() {
            let offset: usize = line.split(' ').next().expect("offset").parse().expect("number");
            assert!(
                text[offset..].starts_with(&format!("{} 0 obj", i + 1)),
                "offset {} should point at object {}",
                offset,
                i + 1
            );
        }
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(parse_hex_color("#ffffff", Rgb::BLACK), Rgb::WHITE);
        assert_eq!(parse_hex_color("#000", Rgb::WHITE), Rgb::BLACK);
        assert_eq!(parse_hex_color("garbage", Rgb::WHITE), Rgb::WHITE);
        let c = parse_hex_color("#213502", Rgb::BLACK);
        assert!((c.0 - 0x21 as f64 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_string_encoding_escapes_and_winansi() {
        let encoded = encode_string("a(b)\\ 30m² 1€");
        let text: Vec<u8> = encoded;
        assert_eq!(text[0], b'(');
        assert!(text.windows(2).any(|w| w == b"\\("));
        assert!(text.contains(&0xB2)); // ²
        assert!(text.contains(&0x80)); // €
    }

    #[test]
    fn test_deflate_round_trips() {
        let data = vec![7u8; 4096];
        let compressed = deflate(&data);
        assert!(!compressed.is_empty());
        assert!(compressed.len() < data.len());
    }
}
