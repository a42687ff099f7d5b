//! Tests for colorbar painting.

use renderer::colorbar::COLORBAR_CANVAS_WIDTH;
use renderer::{
    render_colorbar, resolve_palette, ColorMapper, ColorbarLayout, LinearColorMapper,
    PixmapSurface, RasterSurface, ValueRange,
};
use surface_common::Color;

const BACKGROUND: Color = Color::rgb(0x0a, 0x0a, 0x0a);
const TEXT: Color = Color::rgb(0xff, 0xff, 0xff);

fn painted(height: u32) -> (PixmapSurface, ColorbarLayout) {
    let palette = resolve_palette("Turbo256");
    let layout = ColorbarLayout::compute(height, ValueRange::new(0.0, 10.0), "Temperature");
    let mut surface = PixmapSurface::new(COLORBAR_CANVAS_WIDTH, height).unwrap();
    render_colorbar(&mut surface, &palette, &layout, BACKGROUND, TEXT);
    (surface, layout)
}

#[test]
fn test_high_values_on_top() {
    let palette = resolve_palette("Turbo256");
    let (surface, layout) = painted(400);
    let mid_x = layout.bar.x + layout.bar.width / 2.0;

    let top = surface.read_pixel(mid_x, layout.bar.y + 4.0).unwrap();
    let bottom = surface
        .read_pixel(mid_x, layout.bar.y + layout.bar.height - 4.0)
        .unwrap();

    assert!(LinearColorMapper.nearest(top, &palette) > 240);
    assert!(LinearColorMapper.nearest(bottom, &palette) < 15);
}

#[test]
fn test_outside_bar_is_background() {
    let (surface, layout) = painted(400);
    assert_eq!(surface.read_pixel(5.0, 5.0), Some(BACKGROUND));
    assert_eq!(
        surface.read_pixel(layout.bar.x + layout.bar.width / 2.0, layout.bar.y - 10.0),
        Some(BACKGROUND)
    );
}

#[test]
fn test_ticks_are_drawn_in_text_color() {
    let (surface, layout) = painted(400);
    let tick_x = layout.bar.x + layout.bar.width + 2.5;
    for tick in &layout.ticks {
        assert_eq!(surface.read_pixel(tick_x, tick.y), Some(TEXT), "tick at {}", tick.y);
    }
}

#[test]
fn test_tick_labels_run_high_to_low() {
    let layout = ColorbarLayout::compute(400, ValueRange::new(0.0, 10.0), "Temperature");
    let labels: Vec<&str> = layout.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["10.0", "7.5", "5.0", "2.5", "0.0"]);
}

/// Pixels in the text color within `x0..x1`, `y0..y1`.
fn ink_in(surface: &PixmapSurface, x0: u32, x1: u32, y0: u32, y1: u32) -> Vec<(u32, u32)> {
    let mut ink = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            if surface.read_pixel(x as f64 + 0.5, y as f64 + 0.5) == Some(TEXT) {
                ink.push((x, y));
            }
        }
    }
    ink
}

#[test]
fn test_tick_labels_are_drawn_beside_each_tick() {
    let (surface, layout) = painted(400);
    for tick in &layout.ticks {
        let x0 = tick.label_x as u32;
        let y = tick.y.round() as u32;
        let ink = ink_in(&surface, x0, COLORBAR_CANVAS_WIDTH, y - 8, y + 8);
        assert!(!ink.is_empty(), "no label text for {}", tick.label);
    }
}

#[test]
fn test_title_is_drawn_vertically_in_title_column() {
    let (surface, layout) = painted(400);
    let ink = ink_in(&surface, 0, layout.bar.x as u32, 0, 400);
    assert!(!ink.is_empty());

    let xs = ink.iter().map(|&(x, _)| x);
    let ys = ink.iter().map(|&(_, y)| y);
    let (min_x, max_x) = (xs.clone().min().unwrap(), xs.max().unwrap());
    let (min_y, max_y) = (ys.clone().min().unwrap(), ys.max().unwrap());
    assert!(max_y - min_y > 3 * (max_x - min_x));
    let mid = (min_y + max_y) / 2;
    assert!((190..=210).contains(&mid), "title centered at {}", mid);
}

#[test]
fn test_empty_title_leaves_title_column_blank() {
    let palette = resolve_palette("Turbo256");
    let layout = ColorbarLayout::compute(400, ValueRange::new(0.0, 10.0), "");
    let mut surface = PixmapSurface::new(COLORBAR_CANVAS_WIDTH, 400).unwrap();
    render_colorbar(&mut surface, &palette, &layout, BACKGROUND, TEXT);
    assert!(ink_in(&surface, 0, layout.bar.x as u32, 0, 400).is_empty());
}
