//! User-facing poster settings, loadable from JSON.

use crate::advisor::suggest_initial_grid;
use crate::layout::GridShape;
use crate::paper::{Orientation, PaperSize};
use crate::{PosterError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterSettings {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub rows: u32,
    pub cols: u32,
    /// Accepted and stored, but no layout computation reads it.
    pub overlap_mm: f64,
}

/// Settings file contents where every key is optional. Keys that are absent
/// keep whatever the session already has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct SettingsOverlay {
    pub paper: Option<PaperSize>,
    pub orientation: Option<Orientation>,
    pub rows: Option<u32>,
    pub cols: Option<u32>,
    pub overlap_mm: Option<f64>,
}

impl SettingsOverlay {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Not validated; the caller validates the merged result once.
    pub fn apply(&self, base: PosterSettings) -> PosterSettings {
        PosterSettings {
            paper: self.paper.unwrap_or(base.paper),
            orientation: self.orientation.unwrap_or(base.orientation),
            rows: self.rows.unwrap_or(base.rows),
            cols: self.cols.unwrap_or(base.cols),
            overlap_mm: self.overlap_mm.unwrap_or(base.overlap_mm),
        }
    }
}

impl Default for PosterSettings {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Portrait,
            rows: 3,
            cols: 2,
            overlap_mm: 0.0,
        }
    }
}

impl PosterSettings {
    /// Default paper with the advisor's grid and orientation for `image_aspect`.
    pub fn suggested(image_aspect: f64) -> Self {
        let (grid, orientation) = suggest_initial_grid(image_aspect);
        Self { orientation, rows: grid.rows, cols: grid.cols, ..Self::default() }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn grid(&self) -> Result<GridShape> {
        GridShape::new(self.rows, self.cols)
    }

    pub fn validate(&self) -> Result<()> {
        self.grid()?;
        if !self.overlap_mm.is_finite() || self.overlap_mm < 0.0 {
            return Err(PosterError::InvalidSettings(format!(
                "overlap must be a non-negative number of millimeters, got {}",
                self.overlap_mm
            )));
        }
        if self.overlap_mm > 0.0 {
            log::warn!("overlap of {}mm is not applied to the layout", self.overlap_mm);
        }
        Ok(())
    }
}
