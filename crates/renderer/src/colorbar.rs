//! Vertical colorbar legend.
//!
//! Layout on a colorbar canvas of height `h`:
//! - bar: 30 px wide, `0.7·h` tall, left edge at x = 35, vertically centered
//! - palette drawn top = high value
//! - 1 px border and five 5 px ticks in the text color
//! - tick labels one decimal place, 12 px monospace, right of the ticks
//! - title 13 px, rotated -90° with its baseline at x = 12, vertically centered

use serde::Serialize;
use surface_common::Color;

use crate::canvas::RasterSurface;
use crate::colormap::{Palette, ValueRange};
use crate::text::{draw_label, draw_vertical_title};

/// Width of the colorbar canvas.
pub const COLORBAR_CANVAS_WIDTH: u32 = 150;

const BAR_X: f64 = 35.0;
const BAR_WIDTH: f64 = 30.0;
const BAR_HEIGHT_FRACTION: f64 = 0.7;
const TICK_COUNT: usize = 5;
const TICK_LENGTH: f64 = 5.0;
const LABEL_GAP: f64 = 3.0;
const TITLE_X: f64 = 12.0;
const LABEL_FONT_SIZE: f32 = 12.0;
const TITLE_FONT_SIZE: f32 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One tick mark and its label anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub y: f64,
    pub value: f64,
    pub label: String,
    /// Left edge of the label text, vertically centered on `y`.
    pub label_x: f64,
}

/// Title anchor; text is centered on `(x, y)` and rotated by `rotation_deg`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleAnchor {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorbarLayout {
    pub bar: BarRect,
    /// Top to bottom, so `ticks[0]` shows `vmax`.
    pub ticks: Vec<Tick>,
    pub title: Option<TitleAnchor>,
}

impl ColorbarLayout {
    pub fn compute(height: u32, range: ValueRange, title: &str) -> Self {
        let height = height as f64;
        let bar_height = height * BAR_HEIGHT_FRACTION;
        let bar_y = (height - bar_height) / 2.0;

        let ticks = (0..TICK_COUNT)
            .map(|i| {
                let t = i as f64 / (TICK_COUNT - 1) as f64;
                let value = range.vmax - t * range.span();
                Tick {
                    y: bar_y + t * bar_height,
                    value,
                    label: format!("{:.1}", value),
                    label_x: BAR_X + BAR_WIDTH + TICK_LENGTH + LABEL_GAP,
                }
            })
            .collect();

        let title = (!title.is_empty()).then(|| TitleAnchor {
            text: title.to_string(),
            x: TITLE_X,
            y: height / 2.0,
            rotation_deg: -90.0,
        });

        Self {
            bar: BarRect {
                x: BAR_X,
                y: bar_y,
                width: BAR_WIDTH,
                height: bar_height,
            },
            ticks,
            title,
        }
    }
}

/// Paint the colorbar: background, reversed palette strip, border, ticks,
/// tick labels and the title.
pub fn render_colorbar<S: RasterSurface + ?Sized>(
    surface: &mut S,
    palette: &Palette,
    layout: &ColorbarLayout,
    background: Color,
    text_color: Color,
) {
    surface.clear(background);

    let bar = &layout.bar;
    let len = palette.len();
    let step = bar.height / len as f64;
    for (i, &color) in palette.colors().iter().rev().enumerate() {
        let y = bar.y + i as f64 * step;
        // Overlap by a pixel so fractional steps leave no gaps.
        surface.fill_rect(
            bar.x as f32,
            y as f32,
            bar.width as f32,
            (step + 1.0).min(bar.y + bar.height - y) as f32,
            color,
        );
    }

    // One-pixel lines sit on pixel centers so they cover exactly one row or column.
    let snap = |v: f64| (v.floor() + 0.5) as f32;
    let (x0, y0) = (snap(bar.x), snap(bar.y));
    let (x1, y1) = (snap(bar.x + bar.width), snap(bar.y + bar.height));
    for (from, to) in [
        ((x0, y0), (x1, y0)),
        ((x1, y0), (x1, y1)),
        ((x1, y1), (x0, y1)),
        ((x0, y1), (x0, y0)),
    ] {
        surface.stroke_line(from, to, text_color, 1.0);
    }

    for tick in &layout.ticks {
        let y = snap(tick.y);
        surface.stroke_line((x1, y), (x1 + TICK_LENGTH as f32, y), text_color, 1.0);
        draw_label(surface, &tick.label, tick.label_x, tick.y, LABEL_FONT_SIZE, text_color);
    }

    if let Some(title) = &layout.title {
        draw_vertical_title(surface, &title.text, title.x, title.y, TITLE_FONT_SIZE, text_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_geometry() {
        let layout = ColorbarLayout::compute(800, ValueRange::new(-1.0, 1.0), "Value");
        assert_eq!(layout.bar.x, 35.0);
        assert_eq!(layout.bar.width, 30.0);
        assert!((layout.bar.height - 560.0).abs() < 1e-9);
        assert!((layout.bar.y - 120.0).abs() < 1e-9);
        assert_eq!(layout.ticks.len(), 5);
        assert_eq!(layout.ticks[0].label, "1.0");
        assert_eq!(layout.ticks[2].label, "0.0");
        assert_eq!(layout.ticks[4].label, "-1.0");
        let title = layout.title.unwrap();
        assert_eq!((title.x, title.y, title.rotation_deg), (12.0, 400.0, -90.0));
    }

    #[test]
    fn test_empty_title_has_no_anchor() {
        let layout = ColorbarLayout::compute(100, ValueRange::default(), "");
        assert!(layout.title.is_none());
    }
}
