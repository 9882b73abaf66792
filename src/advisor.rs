//! Initial grid suggestion for a freshly loaded image.

use crate::layout::GridShape;
use crate::paper::Orientation;

/// Wide images start on 2 rows × 3 landscape sheets, everything else on
/// 3 rows × 2 portrait sheets.
pub fn suggest_initial_grid(image_aspect: f64) -> (GridShape, Orientation) {
    if image_aspect > 1.0 {
        (GridShape { rows: 2, cols: 3 }, Orientation::Landscape)
    } else {
        (GridShape { rows: 3, cols: 2 }, Orientation::Portrait)
    }
}
