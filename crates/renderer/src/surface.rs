//! Projection & scaling stage.
//!
//! Each sample becomes a model-space point `(x, y, z) = (-lon, lat, value)`,
//! is rotated by the view and then placed on screen with a single scale
//! factor computed from the raw data extent:
//!
//! ```text
//! x_rot  = x·cos(az) − y·sin(az)
//! y_rot  = x·sin(az) + y·cos(az)
//! x_proj = x_rot
//! z_proj = y_rot·sin(el) + z·cos(el)
//! depth  = y_rot·cos(el) − z·sin(el)
//!
//! scale    = min(w, h) / data_range · scale_fill · zoom
//! x_screen = w/2 + (x_proj − cx_proj)·scale
//! y_screen = h/2 − (z_proj − cz_proj)·scale
//! ```
//!
//! `data_range` is the largest of the three axis extents and `(cx_proj,
//! cz_proj)` is the projected data center. Because both are derived from
//! the unrotated data, the scale does not change as the view rotates and
//! the data center always lands on the canvas center.

use serde::Serialize;
use surface_common::{GridSamples, RenderTuning, ViewOrientation};
use tracing::warn;

/// A vertex after projection. `x`/`y` are screen pixels, `depth` grows
/// toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedVertex {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// Axis extents of the model-space data.
///
/// Non-finite coordinates are ignored. A value axis with no finite samples
/// has a zero extent at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl DataBounds {
    pub fn from_grid(grid: &GridSamples) -> Self {
        let (x_min, x_max) = extent(grid.lons().iter().map(|lon| -lon));
        let (y_min, y_max) = extent(grid.lats().iter().copied());
        let (z_min, z_max) = extent(grid.values().iter().copied());
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        }
    }

    /// Largest of the three axis extents.
    pub fn data_range(&self) -> f64 {
        (self.x_max - self.x_min)
            .max(self.y_max - self.y_min)
            .max(self.z_max - self.z_min)
    }

    pub fn center(&self) -> (f64, f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
            (self.z_min + self.z_max) / 2.0,
        )
    }
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}

/// Precomputed view rotation.
#[derive(Debug, Clone, Copy)]
struct Rotation {
    cos_az: f64,
    sin_az: f64,
    cos_el: f64,
    sin_el: f64,
}

impl Rotation {
    fn new(view: &ViewOrientation) -> Self {
        let (sin_az, cos_az) = view.azimuth_rad().sin_cos();
        let (sin_el, cos_el) = view.elevation_rad().sin_cos();
        Self {
            cos_az,
            sin_az,
            cos_el,
            sin_el,
        }
    }

    /// Rotate a model-space point. Returns `(x_proj, z_proj, depth)`.
    #[inline]
    fn apply(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let x_rot = x * self.cos_az - y * self.sin_az;
        let y_rot = x * self.sin_az + y * self.cos_az;
        let z_proj = y_rot * self.sin_el + z * self.cos_el;
        let depth = y_rot * self.cos_el - z * self.sin_el;
        (x_rot, z_proj, depth)
    }
}

/// Maps rotated coordinates to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenTransform {
    pub scale: f64,
    pub cx: f64,
    pub cy: f64,
    pub center_x_proj: f64,
    pub center_z_proj: f64,
}

impl ScreenTransform {
    #[inline]
    pub fn apply(&self, x_proj: f64, z_proj: f64, depth: f64) -> ProjectedVertex {
        ProjectedVertex {
            x: self.cx + (x_proj - self.center_x_proj) * self.scale,
            y: self.cy - (z_proj - self.center_z_proj) * self.scale,
            depth,
        }
    }
}

/// Output of the projection stage: one vertex per sample, in sample order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedSurface {
    pub vertices: Vec<ProjectedVertex>,
    pub transform: ScreenTransform,
    pub bounds: DataBounds,
}

/// Project every sample of `grid` onto a `width` x `height` canvas.
///
/// NaN values are placed at the value-axis center so every vertex stays
/// finite; their faces are still colored by NaN handling.
pub fn project_surface(
    grid: &GridSamples,
    view: &ViewOrientation,
    width: u32,
    height: u32,
    tuning: &RenderTuning,
) -> ProjectedSurface {
    let bounds = DataBounds::from_grid(grid);
    let (center_x, center_y, center_z) = bounds.center();

    let mut data_range = bounds.data_range();
    if !(data_range > 0.0) || !data_range.is_finite() {
        warn!(
            data_range,
            fallback = tuning.min_data_range,
            "Degenerate data extent, using minimum range"
        );
        data_range = tuning.min_data_range;
    }

    let rotation = Rotation::new(view);
    let (center_x_proj, center_z_proj, _) = rotation.apply(center_x, center_y, center_z);

    let min_side = width.min(height) as f64;
    let transform = ScreenTransform {
        scale: min_side / data_range * tuning.scale_fill * view.zoom(),
        cx: width as f64 / 2.0,
        cy: height as f64 / 2.0,
        center_x_proj,
        center_z_proj,
    };

    let vertices = grid
        .lons()
        .iter()
        .zip(grid.lats())
        .zip(grid.values())
        .map(|((&lon, &lat), &value)| {
            let z = if value.is_nan() { center_z } else { value };
            let (x_proj, z_proj, depth) = rotation.apply(-lon, lat, z);
            transform.apply(x_proj, z_proj, depth)
        })
        .collect();

    ProjectedSurface {
        vertices,
        transform,
        bounds,
    }
}
