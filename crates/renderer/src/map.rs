//! Flat map and globe scatter rendering.
//!
//! Draws each grid sample as a small square at its projected lon/lat
//! position, colored by value. Flat maps use a [`MapProjection`] and its
//! pixel scale; the globe uses an orthographic [`SphereView`] and paints only
//! visible points, far side first.

use projection::{MapProjection, SphereView};
use surface_common::{Color, GridSamples};
use tracing::debug;

use crate::canvas::RasterSurface;
use crate::colormap::{ColorMapper, Palette, ValueRange};

/// Fraction of the shorter canvas side used as the globe radius.
const GLOBE_RADIUS_FRACTION: f64 = 0.4;

/// Coloring and marker settings shared by the scatter renderers.
#[derive(Debug, Clone, Copy)]
pub struct PointStyle<'a> {
    pub palette: &'a Palette,
    pub range: ValueRange,
    pub nan_color: Color,
    pub background: Color,
    /// Edge length of each marker in pixels.
    pub point_size: f32,
}

/// Render grid samples through a 2D map projection, centered on the canvas.
///
/// Returns the number of markers painted.
pub fn render_map_points<S, M>(
    surface: &mut S,
    grid: &GridSamples,
    projection: MapProjection,
    style: &PointStyle<'_>,
    mapper: &M,
) -> usize
where
    S: RasterSurface + ?Sized,
    M: ColorMapper + ?Sized,
{
    surface.clear(style.background);
    let (width, height) = surface.size();
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let scale = projection.pixel_scale(width as f64, height as f64);

    let mut painted = 0;
    for idx in 0..grid.len() {
        let Some((lon, lat, value)) = grid.sample(idx) else {
            continue;
        };
        let p = projection.project(lon, lat);
        if !(p.x.is_finite() && p.y.is_finite()) {
            continue;
        }
        let color = mapper.map(value, style.palette, style.range, style.nan_color);
        paint_marker(surface, cx + p.x * scale, cy - p.y * scale, style.point_size, color);
        painted += 1;
    }

    debug!(projection = %projection, points = painted, scale, "Rendered map points");
    painted
}

/// Render grid samples on an orthographic globe.
///
/// Points whose depth is at or below the view's visibility threshold are
/// skipped; the rest are painted in ascending depth order.
pub fn render_globe_points<S, M>(
    surface: &mut S,
    grid: &GridSamples,
    view: &SphereView,
    zoom: f64,
    style: &PointStyle<'_>,
    mapper: &M,
) -> usize
where
    S: RasterSurface + ?Sized,
    M: ColorMapper + ?Sized,
{
    surface.clear(style.background);
    let (width, height) = surface.size();
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 * GLOBE_RADIUS_FRACTION * zoom;

    let mut visible: Vec<(f64, f64, f64, Color)> = (0..grid.len())
        .filter_map(|idx| grid.sample(idx))
        .filter_map(|(lon, lat, value)| {
            let p = view.project(lon, lat);
            p.visible.then(|| {
                let color = mapper.map(value, style.palette, style.range, style.nan_color);
                (cx + p.x * radius, cy - p.y * radius, p.depth, color)
            })
        })
        .collect();
    visible.sort_by(|a, b| a.2.total_cmp(&b.2));

    for &(x, y, _, color) in &visible {
        paint_marker(surface, x, y, style.point_size, color);
    }

    debug!(points = visible.len(), radius, "Rendered globe points");
    visible.len()
}

fn paint_marker<S: RasterSurface + ?Sized>(surface: &mut S, x: f64, y: f64, size: f32, color: Color) {
    let half = size as f64 / 2.0;
    surface.fill_rect((x - half) as f32, (y - half) as f32, size, size, color);
}
