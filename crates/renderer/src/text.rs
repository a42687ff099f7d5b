//! Text rasterization for colorbar labels and titles.
//!
//! Glyphs are drawn with `rusttype` through `imageproc` into a grayscale
//! coverage image, then painted onto a [`RasterSurface`] without blending:
//! pixels at half coverage or more take the text color, the rest are left
//! untouched.

use image::{imageops, GrayImage, Luma};
use imageproc::drawing::draw_text_mut;
use once_cell::sync::Lazy;
use rusttype::{point, Font, Scale};
use surface_common::Color;
use tracing::warn;

use crate::canvas::RasterSurface;

// Embedded font data (DejaVu Sans Mono)
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

const COVERAGE_CUTOFF: u8 = 128;

static FONT: Lazy<Option<Font<'static>>> = Lazy::new(|| {
    let font = Font::try_from_bytes(FONT_DATA);
    if font.is_none() {
        warn!("Failed to load embedded font, text will not be drawn");
    }
    font
});

/// Horizontal run of text rasterized to a coverage mask.
#[derive(Debug, Clone)]
pub struct GlyphMask {
    pub coverage: GrayImage,
    /// Distance from the top of the mask to the baseline.
    pub ascent: i32,
}

impl GlyphMask {
    pub fn width(&self) -> u32 {
        self.coverage.width()
    }

    pub fn height(&self) -> u32 {
        self.coverage.height()
    }

    /// Same glyphs turned to read bottom to top.
    pub fn rotated_ccw(&self) -> GrayImage {
        imageops::rotate270(&self.coverage)
    }
}

/// Rasterize `text` at `size` pixels. `None` for empty text or when the
/// font is unavailable.
pub fn rasterize(text: &str, size: f32) -> Option<GlyphMask> {
    if text.trim().is_empty() {
        return None;
    }
    let font = FONT.as_ref()?;
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);

    let width = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .filter_map(|g| g.pixel_bounding_box())
        .map(|bb| bb.max.x)
        .max()
        .unwrap_or(0);
    if width <= 0 {
        return None;
    }
    let height = (v_metrics.ascent - v_metrics.descent).ceil().max(1.0) as u32;

    let mut coverage = GrayImage::new(width as u32, height);
    draw_text_mut(&mut coverage, Luma([255u8]), 0, 0, scale, font, text);

    Some(GlyphMask {
        coverage,
        ascent: v_metrics.ascent.round() as i32,
    })
}

/// Paint every covered pixel of `mask` with its top-left corner at `(left, top)`.
pub fn paint_mask<S: RasterSurface + ?Sized>(
    surface: &mut S,
    mask: &GrayImage,
    left: i32,
    top: i32,
    color: Color,
) {
    let (width, height) = surface.size();
    for (mx, my, pixel) in mask.enumerate_pixels() {
        if pixel.0[0] < COVERAGE_CUTOFF {
            continue;
        }
        let (x, y) = (left + mx as i32, top + my as i32);
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            continue;
        }
        surface.fill_rect(x as f32, y as f32, 1.0, 1.0, color);
    }
}

/// Draw `text` with its left edge at `x`, vertically centered on `center_y`.
pub fn draw_label<S: RasterSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    x: f64,
    center_y: f64,
    size: f32,
    color: Color,
) {
    if let Some(mask) = rasterize(text, size) {
        let top = (center_y - mask.height() as f64 / 2.0).round() as i32;
        paint_mask(surface, &mask.coverage, x.round() as i32, top, color);
    }
}

/// Draw `text` rotated -90° (reading bottom to top), centered on
/// `center_y` with its baseline on the column `baseline_x`.
pub fn draw_vertical_title<S: RasterSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    baseline_x: f64,
    center_y: f64,
    size: f32,
    color: Color,
) {
    if let Some(mask) = rasterize(text, size) {
        let rotated = mask.rotated_ccw();
        let left = baseline_x.round() as i32 - mask.ascent;
        let top = (center_y - rotated.height() as f64 / 2.0).round() as i32;
        paint_mask(surface, &rotated, left, top, color);
    }
}
