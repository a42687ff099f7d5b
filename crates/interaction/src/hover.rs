//! Hover lookup: the data value under the cursor.
//!
//! Two strategies are available. Pixel readback matches the painted color
//! against the palette and converts the nearest index back to a value; it is
//! approximate by nature since many values share one palette entry. Face hit
//! testing walks the painted faces from nearest to farthest and returns the
//! averaged value of the first face containing the cursor.

use renderer::{index_to_value, ColorMapper, Face, Palette, ValueRange};
use serde::Serialize;
use surface_common::Color;

const TOOLTIP_OFFSET_X: f64 = 15.0;
const TOOLTIP_OFFSET_Y: f64 = -30.0;

/// Tooltip shown next to the cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl Tooltip {
    /// Tooltip offset from the cursor, with its anchor kept on a
    /// `width` x `height` canvas.
    pub fn at(mouse_x: f64, mouse_y: f64, value: f64, (width, height): (u32, u32)) -> Self {
        Self {
            text: format!("Value: {:.2}", value),
            x: (mouse_x + TOOLTIP_OFFSET_X).clamp(0.0, width as f64),
            y: (mouse_y + TOOLTIP_OFFSET_Y).clamp(0.0, height as f64),
            value,
        }
    }
}

/// Whether `color` is within `threshold` of the background on every channel.
pub fn is_near_background(color: Color, background: Color, threshold: u8) -> bool {
    color.is_close_to(&background, threshold)
}

/// Value for a read-back pixel. A failed read or a pixel near `background`
/// is "not hovering".
pub fn hover_from_pixel<M: ColorMapper + ?Sized>(
    pixel: Option<Color>,
    palette: &Palette,
    range: ValueRange,
    background: Color,
    threshold: u8,
    mapper: &M,
) -> Option<f64> {
    let color = pixel?;
    if is_near_background(color, background, threshold) {
        return None;
    }
    let index = mapper.nearest(color, palette);
    Some(index_to_value(index, palette.len(), range))
}

/// Value of the nearest painted face containing `(x, y)`.
///
/// `faces` must be in paint order (farthest first). Faces with a NaN value
/// report no hover.
pub fn hover_from_faces(faces: &[Face], x: f64, y: f64) -> Option<f64> {
    faces
        .iter()
        .rev()
        .find(|face| face.contains(x, y))
        .map(|face| face.value)
        .filter(|value| value.is_finite())
}
