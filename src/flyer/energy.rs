//! # Energy Indicator Positioner
//!
//! Maps an energy rating (A–G) to the marker position on the 7-band gauge
//! graphic: a vertical position as a percentage of the gauge height plus a
//! horizontal pixel nudge.
//!
//! The correction tables are empirical constants tied to one specific gauge
//! artwork. They must be preserved exactly, not re-derived.

use std::fmt;

/// Energy-efficiency rating, best (A) to worst (G).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum EnergyRating {
    A,
    B,
    C,
    D,
    #[default]
    E,
    F,
    G,
}

/// Vertical correction per rating, in percentage points of gauge height.
/// Compensates for the non-uniform visual weight of the gauge artwork.
const VERTICAL_CORRECTION: [f64; 7] = [6.5, 4.8, 1.2, 0.0, 0.0, -4.2, -7.8];

/// Horizontal nudge per rating, in pixels.
const HORIZONTAL_NUDGE: [f64; 7] = [-15.0, -10.0, 0.0, -2.0, -2.0, 6.0, 8.0];

impl EnergyRating {
    pub const ALL: [EnergyRating; 7] = [
        EnergyRating::A,
        EnergyRating::B,
        EnergyRating::C,
        EnergyRating::D,
        EnergyRating::E,
        EnergyRating::F,
        EnergyRating::G,
    ];

    /// Normalize raw input. Anything outside A–G falls back to E.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "A" => EnergyRating::A,
            "B" => EnergyRating::B,
            "C" => EnergyRating::C,
            "D" => EnergyRating::D,
            "E" => EnergyRating::E,
            "F" => EnergyRating::F,
            "G" => EnergyRating::G,
            _ => EnergyRating::E,
        }
    }

    /// Zero-based band index on the gauge.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyRating::A => "A",
            EnergyRating::B => "B",
            EnergyRating::C => "C",
            EnergyRating::D => "D",
            EnergyRating::E => "E",
            EnergyRating::F => "F",
            EnergyRating::G => "G",
        }
    }
}

impl fmt::Display for EnergyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker position on the gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyMarker {
    /// Vertical position, percentage of gauge height from the top.
    pub top_pct: f64,
    /// Horizontal nudge in pixels.
    pub nudge_px: f64,
}

/// Compute the marker position for a rating.
///
/// The base position centers the marker within its band on a 7-band linear
/// gauge; the per-rating correction tables are then added on top.
pub fn marker(rating: EnergyRating) -> EnergyMarker {
    let index = rating.index();
    let base = (index as f64 + 0.5) * (100.0 / 7.0);
    EnergyMarker {
        top_pct: base + VERTICAL_CORRECTION[index],
        nudge_px: HORIZONTAL_NUDGE[index],
    }
}
