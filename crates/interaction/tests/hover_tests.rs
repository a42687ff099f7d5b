//! Tests for hover lookup, both standalone and through the controller.

use interaction::{hover_from_pixel, SurfaceController, SurfaceModel, VirtualScheduler};
use renderer::{resolve_palette, LinearColorMapper, RasterSurface, ValueRange};
use surface_common::{Color, GridSamples, HoverMode, RenderOptions};
use test_utils::fixtures::canvas;
use test_utils::{assert_approx_eq, create_ripple_grid};

fn controller(hover_mode: HoverMode, enable_hover: bool) -> SurfaceController<VirtualScheduler> {
    controller_with(RenderOptions {
        hover_mode,
        enable_hover,
        ..RenderOptions::default()
    })
}

fn controller_with(options: RenderOptions) -> SurfaceController<VirtualScheduler> {
    let (lons, lats, values, n_lat, n_lon) = create_ripple_grid(12).into_parts();
    let grid = GridSamples::new(lons, lats, values, n_lat, n_lon).unwrap();
    let options = RenderOptions {
        width: canvas::SMALL.0,
        height: canvas::SMALL.1,
        ..options
    };
    let model = SurfaceModel::new(grid, options).unwrap();
    let mut c = SurfaceController::with_pixmaps(model, VirtualScheduler::new()).unwrap();
    c.start();
    c
}

/// Center of some pixel painted with a face color.
fn painted_pixel(c: &SurfaceController<VirtualScheduler>) -> (f64, f64, Color) {
    let background = c.model().options().background_color;
    let (w, h) = c.frames().surface().size();
    for y in 0..h {
        for x in 0..w {
            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            if let Some(color) = c.frames().surface().read_pixel(px, py) {
                if color != background {
                    return (px, py, color);
                }
            }
        }
    }
    panic!("surface painted nothing");
}

const DARK: Color = Color::rgb(10, 10, 10);

// ============================================================================
// Pixel lookup
// ============================================================================

#[test]
fn test_palette_entry_maps_back_to_its_value() {
    let palette = resolve_palette("viridis");
    let range = ValueRange::new(-2.0, 6.0);
    let n = palette.len();
    for k in [0, 1, n / 3, n / 2, n - 2, n - 1] {
        let color = palette.colors()[k];
        // Only entries that are the first occurrence of their color invert exactly.
        if palette.colors().iter().position(|c| *c == color) != Some(k) {
            continue;
        }
        let value =
            hover_from_pixel(Some(color), &palette, range, DARK, 10, &LinearColorMapper).unwrap();
        let expected = range.vmin + k as f64 / (n - 1) as f64 * range.span();
        assert_approx_eq!(value, expected, 1e-9);
    }
}

#[test]
fn test_background_pixel_is_not_hovering() {
    let palette = resolve_palette("Turbo256");
    let background = Color::from_hex("#0a0a0a").unwrap();
    assert_eq!(
        hover_from_pixel(
            Some(background),
            &palette,
            ValueRange::default(),
            background,
            10,
            &LinearColorMapper,
        ),
        None
    );
}

#[test]
fn test_off_palette_color_snaps_to_nearest() {
    let palette = resolve_palette("Greys256");
    let range = ValueRange::new(0.0, 255.0);
    // A near-grey pixel resolves to the closest grey level.
    let pixel = Some(Color::rgb(100, 102, 101));
    let value = hover_from_pixel(pixel, &palette, range, DARK, 10, &LinearColorMapper).unwrap();
    assert!((95.0..=107.0).contains(&value), "value {}", value);
}

// ============================================================================
// Controller hover
// ============================================================================

#[test]
fn test_hover_over_surface_shows_value() {
    let mut c = controller(HoverMode::PixelReadback, true);
    let (x, y, color) = painted_pixel(&c);

    c.pointer_move(x, y);
    let tooltip = c.tooltip().expect("tooltip over surface").clone();

    let palette = c.model().palette();
    let k = palette.colors().iter().position(|p| *p == color).unwrap();
    let stats = c.frames().last_frame().stats.unwrap();
    let expected = stats.vmin + k as f64 / (palette.len() - 1) as f64 * (stats.vmax - stats.vmin);
    assert_approx_eq!(tooltip.value, expected, 1e-9);
    assert_eq!(tooltip.text, format!("Value: {:.2}", expected));
    let (w, _) = c.frames().surface().size();
    assert_eq!((tooltip.x, tooltip.y), ((x + 15.0).min(w as f64), (y - 30.0).max(0.0)));
}

#[test]
fn test_tooltip_near_top_edge_stays_on_canvas() {
    let mut c = controller(HoverMode::PixelReadback, true);
    let (w, _) = c.frames().surface().size();

    // The surface is centered, so its upper half lies within 30 px of the top.
    let mut shown = 0;
    for y in 0..30 {
        for x in 0..w {
            c.pointer_move(x as f64 + 0.5, y as f64 + 0.5);
            if let Some(tooltip) = c.tooltip() {
                assert_eq!(tooltip.y, 0.0);
                assert!(tooltip.x <= w as f64);
                shown += 1;
            }
        }
    }
    assert!(shown > 0);
}

#[test]
fn test_light_background_hides_tooltip() {
    let mut c = controller_with(RenderOptions {
        background_color: Color::rgb(255, 255, 255),
        ..RenderOptions::default()
    });
    assert_eq!(
        c.frames().surface().read_pixel(0.5, 0.5),
        Some(Color::rgb(255, 255, 255))
    );

    c.pointer_move(0.5, 0.5);
    assert!(c.tooltip().is_none());

    let (x, y, _) = painted_pixel(&c);
    c.pointer_move(x, y);
    assert!(c.tooltip().is_some());
}

#[test]
fn test_hover_outside_canvas_is_not_hovering() {
    let mut c = controller(HoverMode::PixelReadback, true);
    c.pointer_move(-5.0, 1_000.0);
    assert!(c.tooltip().is_none());
}

#[test]
fn test_hover_disabled() {
    let mut c = controller(HoverMode::PixelReadback, false);
    let (x, y, _) = painted_pixel(&c);
    c.pointer_move(x, y);
    assert!(c.tooltip().is_none());
}

#[test]
fn test_face_hit_test_mode() {
    let mut c = controller(HoverMode::FaceHitTest, true);
    let (x, y, _) = painted_pixel(&c);
    c.pointer_move(x, y);

    // Seam strokes can paint a pixel just outside every quad, so fall back
    // to a face centroid when the first painted pixel misses.
    if c.tooltip().is_none() {
        let face = c.frames().last_frame().faces.last().unwrap().clone();
        let cx = face.points.iter().map(|p| p.x).sum::<f64>() / 4.0;
        let cy = face.points.iter().map(|p| p.y).sum::<f64>() / 4.0;
        c.pointer_move(cx, cy);
    }

    let tooltip = c.tooltip().expect("face under cursor");
    let stats = c.frames().last_frame().stats.unwrap();
    assert!(tooltip.value >= stats.vmin - 1e-9 && tooltip.value <= stats.vmax + 1e-9);
}

#[test]
fn test_drag_hides_tooltip() {
    let mut c = controller(HoverMode::PixelReadback, true);
    let (x, y, _) = painted_pixel(&c);
    c.pointer_move(x, y);
    c.pointer_down(x, y);
    assert!(c.tooltip().is_none());
}
