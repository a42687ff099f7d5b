//! Tests for flat map and globe scatter rendering.

use projection::{MapProjection, SphereView};
use renderer::map::{render_globe_points, render_map_points, PointStyle};
use renderer::{resolve_palette, LinearColorMapper, PixmapSurface, RasterSurface, ValueRange};
use surface_common::{Color, GridSamples};

const BACKGROUND: Color = Color::rgb(0, 0, 0);

fn world_grid() -> GridSamples {
    let lons: Vec<f64> = (0..=12).map(|i| -180.0 + 30.0 * i as f64).collect();
    let lats: Vec<f64> = (0..=6).map(|i| -90.0 + 30.0 * i as f64).collect();
    GridSamples::from_axes(&lons, &lats, |lon, lat| lon + lat).unwrap()
}

#[test]
fn test_every_flat_projection_draws_all_points() {
    let grid = world_grid();
    let palette = resolve_palette("viridis");
    let style = PointStyle {
        palette: &palette,
        range: ValueRange::new(-270.0, 270.0),
        nan_color: Color::rgb(128, 128, 128),
        background: BACKGROUND,
        point_size: 3.0,
    };

    for projection in MapProjection::ALL {
        let mut surface = PixmapSurface::new(400, 200).unwrap();
        let n = render_map_points(&mut surface, &grid, projection, &style, &LinearColorMapper);
        assert_eq!(n, grid.len(), "{}", projection);
    }
}

#[test]
fn test_map_origin_lands_on_canvas_center() {
    let grid = GridSamples::new(vec![0.0], vec![0.0], vec![1.0], 1, 1).unwrap();
    let palette = resolve_palette("Greys256");
    let style = PointStyle {
        palette: &palette,
        range: ValueRange::new(0.0, 1.0),
        nan_color: Color::rgb(255, 0, 255),
        background: BACKGROUND,
        point_size: 4.0,
    };
    let mut surface = PixmapSurface::new(100, 100).unwrap();
    render_map_points(
        &mut surface,
        &grid,
        MapProjection::Robinson,
        &style,
        &LinearColorMapper,
    );
    assert_eq!(surface.read_pixel(50.0, 50.0), Some(Color::rgb(255, 255, 255)));
    assert_eq!(surface.read_pixel(10.0, 10.0), Some(BACKGROUND));
}

#[test]
fn test_globe_hides_far_side() {
    let grid = world_grid();
    let palette = resolve_palette("viridis");
    let style = PointStyle {
        palette: &palette,
        range: ValueRange::new(-270.0, 270.0),
        nan_color: Color::rgb(128, 128, 128),
        background: BACKGROUND,
        point_size: 2.0,
    };
    let mut surface = PixmapSurface::new(200, 200).unwrap();
    let n = render_globe_points(
        &mut surface,
        &grid,
        &SphereView::new(0.0, 0.0),
        1.0,
        &style,
        &LinearColorMapper,
    );
    assert!(n > 0 && n < grid.len());
}
