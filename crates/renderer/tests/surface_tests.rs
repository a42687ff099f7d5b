//! Tests for the projection & scaling stage.
//!
//! The key property is that the screen scale depends only on the raw data
//! extent, so rotating the view never makes the surface "breathe".

use renderer::surface::{project_surface, DataBounds, ProjectedSurface};
use surface_common::{GridSamples, RenderTuning, ViewOrientation};
use test_utils::{assert_approx_eq, create_constant_grid, create_surface_grid};

fn grid_from(generated: test_utils::GeneratedGrid) -> GridSamples {
    let (lons, lats, values, n_lat, n_lon) = generated.into_parts();
    GridSamples::new(lons, lats, values, n_lat, n_lon).unwrap()
}

/// Rings of radius 1..=5 sampled every degree, value growing with radius.
fn disk_grid() -> GridSamples {
    let radii: Vec<f64> = (1..=5).map(|r| r as f64).collect();
    let angles: Vec<f64> = (0..=360).map(|d| (d as f64).to_radians()).collect();

    let mut lons = Vec::new();
    let mut lats = Vec::new();
    let mut values = Vec::new();
    for &r in &radii {
        for &a in &angles {
            lons.push(r * a.cos());
            lats.push(r * a.sin());
            values.push(0.5 * r);
        }
    }
    GridSamples::new(lons, lats, values, radii.len(), angles.len()).unwrap()
}

fn screen_extent(surface: &ProjectedSurface) -> (f64, f64) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in &surface.vertices {
        x_min = x_min.min(v.x);
        x_max = x_max.max(v.x);
        y_min = y_min.min(v.y);
        y_max = y_max.max(v.y);
    }
    (x_max - x_min, y_max - y_min)
}

// ============================================================================
// Rotation invariance
// ============================================================================

#[test]
fn test_bounding_box_size_invariant_under_azimuth() {
    let grid = disk_grid();
    let tuning = RenderTuning::default();
    let reference = project_surface(&grid, &ViewOrientation::new(0.0, -30.0, 1.0), 400, 400, &tuning);
    let (ref_w, ref_h) = screen_extent(&reference);

    for az in [17.0, 45.0, 90.0, 133.3, 200.0, 270.0, 359.0] {
        let s = project_surface(&grid, &ViewOrientation::new(az, -30.0, 1.0), 400, 400, &tuning);
        let (w, h) = screen_extent(&s);
        assert_approx_eq!(w, ref_w, 0.1);
        assert_approx_eq!(h, ref_h, 0.1);
    }
}

#[test]
fn test_scale_independent_of_orientation() {
    let grid = grid_from(create_surface_grid(12, 20, (-4.0, 6.0), (-2.0, 3.0), |x, y| x * y));
    let tuning = RenderTuning::default();
    let base = project_surface(&grid, &ViewOrientation::default(), 300, 200, &tuning);

    for (az, el) in [(0.0, 0.0), (90.0, -60.0), (180.0, 45.0), (300.0, -89.0)] {
        let s = project_surface(&grid, &ViewOrientation::new(az, el, 1.0), 300, 200, &tuning);
        assert_eq!(s.transform.scale, base.transform.scale);
    }
}

#[test]
fn test_data_center_maps_to_canvas_center() {
    // Symmetric grid: the middle sample sits at the center of all three extents.
    let grid = GridSamples::from_axes(&[-1.0, 0.0, 1.0], &[-1.0, 0.0, 1.0], |x, y| x * y).unwrap();
    let tuning = RenderTuning::default();

    for (az, el) in [(0.0, 0.0), (45.0, -30.0), (123.0, 70.0), (359.0, -90.0)] {
        let s = project_surface(&grid, &ViewOrientation::new(az, el, 2.0), 200, 100, &tuning);
        let center = s.vertices[4];
        assert_approx_eq!(center.x, 100.0, 1e-9);
        assert_approx_eq!(center.y, 50.0, 1e-9);
    }
}

// ============================================================================
// Scale
// ============================================================================

#[test]
fn test_scale_uses_shorter_side_and_zoom() {
    // lon extent 10 dominates: scale = min(w, h) / 10 * 0.6 * zoom
    let grid = GridSamples::from_axes(&[0.0, 10.0], &[0.0, 2.0], |_, _| 1.0).unwrap();
    let tuning = RenderTuning::default();

    let s = project_surface(&grid, &ViewOrientation::new(0.0, 0.0, 1.0), 320, 200, &tuning);
    assert_approx_eq!(s.transform.scale, 12.0, 1e-12);

    let zoomed = project_surface(&grid, &ViewOrientation::new(0.0, 0.0, 2.5), 320, 200, &tuning);
    assert_approx_eq!(zoomed.transform.scale, 30.0, 1e-12);
}

#[test]
fn test_degenerate_extent_keeps_vertices_finite() {
    let grid = grid_from(create_constant_grid(3, 3, 7.0));
    let s = project_surface(&grid, &ViewOrientation::default(), 64, 64, &RenderTuning::default());
    assert!(s.transform.scale.is_finite());
    for v in &s.vertices {
        assert_approx_eq!(v.x, 32.0, 1e-9);
        assert_approx_eq!(v.y, 32.0, 1e-9);
    }
}

#[test]
fn test_bounds_ignore_nan_values() {
    let grid =
        GridSamples::new(vec![0.0, 1.0], vec![0.0, 0.0], vec![f64::NAN, 4.0], 1, 2).unwrap();
    let b = DataBounds::from_grid(&grid);
    assert_eq!((b.z_min, b.z_max), (4.0, 4.0));
}
