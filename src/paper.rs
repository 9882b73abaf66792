//! Paper catalog: physical sheet dimensions per paper size.

use serde::{Deserialize, Serialize};

/// Standard sheet sizes a poster can be printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    Letter,
}

impl PaperSize {
    pub const ALL: [PaperSize; 3] = [PaperSize::A4, PaperSize::A3, PaperSize::Letter];

    /// Portrait dimensions in millimeters, width first (width < height).
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::Letter => (215.9, 279.4),
        }
    }

    /// Dimensions with the sheet turned to `orientation`.
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        orientation.apply(self.dimensions_mm())
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A3 => "A3",
            PaperSize::Letter => "Letter",
        }
    }
}

/// How each sheet is turned relative to its catalog (portrait) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    /// Sheet rotated 90 degrees: catalog width and height swap.
    Landscape,
}

impl Orientation {
    pub fn apply(self, (width, height): (f64, f64)) -> (f64, f64) {
        match self {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }
}
