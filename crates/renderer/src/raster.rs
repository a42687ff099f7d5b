//! Depth-sorted face rasterizer (painter's algorithm).
//!
//! Every grid cell `(i, j)` with `i < n_lat - 1` and `j < n_lon - 1` becomes
//! one quadrilateral face with corners
//! `[i·n_lon + j, i·n_lon + j + 1, (i+1)·n_lon + j + 1, (i+1)·n_lon + j]`.
//! Faces are colored by the mean of their four corner values, sorted by
//! ascending mean depth and painted in that order, so nearer faces overwrite
//! farther ones.

use rayon::prelude::*;
use serde::Serialize;
use surface_common::{Color, GridSamples, RenderOptions, ViewOrientation};
use tracing::debug;

use crate::canvas::RasterSurface;
use crate::colormap::{ColorMapper, LinearColorMapper, Palette, ValueRange};
use crate::surface::{project_surface, ProjectedSurface, ProjectedVertex};

/// Minimum face count before face building is spread over the rayon pool.
const PARALLEL_THRESHOLD: usize = 4096;

/// One quadrilateral cell, ready to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    /// Flat sample indices of the four corners.
    pub corners: [usize; 4],
    pub points: [ProjectedVertex; 4],
    /// Mean of the corner depths.
    pub depth: f64,
    /// Mean of the corner values; NaN if any corner is NaN.
    pub value: f64,
    pub color: Color,
}

impl Face {
    /// Screen-space corners as `f32` pairs for the drawing surface.
    pub fn screen_points(&self) -> [(f32, f32); 4] {
        self.points.map(|p| (p.x as f32, p.y as f32))
    }

    /// Whether `(x, y)` lies inside the projected quad (even-odd rule).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let mut inside = false;
        let mut j = 3;
        for i in 0..4 {
            let (pi, pj) = (self.points[i], self.points[j]);
            if (pi.y > y) != (pj.y > y) {
                let cross_x = pi.x + (y - pi.y) / (pj.y - pi.y) * (pj.x - pi.x);
                if x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Corner indices of cell `(row, col)`.
#[inline]
pub fn cell_corners(row: usize, col: usize, n_lon: usize) -> [usize; 4] {
    let a = row * n_lon + col;
    [a, a + 1, a + n_lon + 1, a + n_lon]
}

/// Build one face per grid cell in row-major cell order.
///
/// Grids with fewer than two rows or columns have no cells and yield an
/// empty list.
pub fn build_faces<M: ColorMapper + ?Sized>(
    projected: &ProjectedSurface,
    grid: &GridSamples,
    palette: &Palette,
    range: ValueRange,
    nan_color: Color,
    mapper: &M,
) -> Vec<Face> {
    let n_lon = grid.n_lon();
    let cells_per_row = n_lon.saturating_sub(1);
    let face_count = grid.face_count();
    let vertices = &projected.vertices;
    let values = grid.values();

    let make_face = |cell: usize| {
        let corners = cell_corners(cell / cells_per_row, cell % cells_per_row, n_lon);
        let points = corners.map(|c| vertices[c]);
        let depth = points.iter().map(|p| p.depth).sum::<f64>() / 4.0;
        let value = corners.iter().map(|&c| values[c]).sum::<f64>() / 4.0;
        Face {
            corners,
            points,
            depth,
            value,
            color: mapper.map(value, palette, range, nan_color),
        }
    };

    if face_count >= PARALLEL_THRESHOLD {
        (0..face_count).into_par_iter().map(make_face).collect()
    } else {
        (0..face_count).map(make_face).collect()
    }
}

/// Stable sort by ascending depth (farthest first).
pub fn sort_faces(faces: &mut [Face]) {
    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));
}

/// Paint faces in slice order.
pub fn paint_faces<S: RasterSurface + ?Sized>(surface: &mut S, faces: &[Face], stroke_width: f32) {
    for face in faces {
        surface.fill_quad(&face.screen_points(), face.color, stroke_width);
    }
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderStats {
    pub face_count: usize,
    pub scale: f64,
    pub vmin: f64,
    pub vmax: f64,
}

/// Faces in paint order plus frame stats. Kept for hit testing.
#[derive(Debug, Clone, Default)]
pub struct RenderedFrame {
    pub faces: Vec<Face>,
    pub stats: Option<RenderStats>,
}

/// Renders a grid onto a [`RasterSurface`] with a given color mapper.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRenderer<M = LinearColorMapper> {
    mapper: M,
}

impl SurfaceRenderer<LinearColorMapper> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: ColorMapper> SurfaceRenderer<M> {
    pub fn with_mapper(mapper: M) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Effective color range for `grid` under `options`.
    pub fn value_range(&self, grid: &GridSamples, options: &RenderOptions) -> ValueRange {
        let (vmin, vmax) = options.range_overrides();
        self.mapper.range(grid.values(), vmin, vmax)
    }

    /// Render one frame: clear to the background, then paint every face
    /// back to front.
    pub fn render<S: RasterSurface + ?Sized>(
        &self,
        surface: &mut S,
        grid: &GridSamples,
        view: &ViewOrientation,
        options: &RenderOptions,
        palette: &Palette,
    ) -> RenderedFrame {
        surface.clear(options.background_color);

        if grid.n_lat() < 2 || grid.n_lon() < 2 {
            debug!(
                n_lat = grid.n_lat(),
                n_lon = grid.n_lon(),
                "Grid has no cells, painted background only"
            );
            return RenderedFrame::default();
        }

        let (width, height) = surface.size();
        let projected = project_surface(grid, view, width, height, &options.render);
        let range = self.value_range(grid, options);

        let mut faces = build_faces(
            &projected,
            grid,
            palette,
            range,
            options.nan_color,
            &self.mapper,
        );
        sort_faces(&mut faces);
        paint_faces(surface, &faces, options.render.stroke_width);

        let stats = RenderStats {
            face_count: faces.len(),
            scale: projected.transform.scale,
            vmin: range.vmin,
            vmax: range.vmax,
        };
        debug!(
            faces = stats.face_count,
            scale = stats.scale,
            azimuth = view.azimuth(),
            elevation = view.elevation(),
            zoom = view.zoom(),
            "Rendered surface frame"
        );

        RenderedFrame {
            faces,
            stats: Some(stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f64, y: f64) -> ProjectedVertex {
        ProjectedVertex { x, y, depth: 0.0 }
    }

    fn unit_face() -> Face {
        Face {
            corners: [0, 1, 3, 2],
            points: [
                vertex(0.0, 0.0),
                vertex(10.0, 0.0),
                vertex(10.0, 10.0),
                vertex(0.0, 10.0),
            ],
            depth: 0.0,
            value: 1.0,
            color: Color::rgb(1, 1, 1),
        }
    }

    #[test]
    fn test_cell_corners_order() {
        assert_eq!(cell_corners(0, 0, 3), [0, 1, 4, 3]);
        assert_eq!(cell_corners(1, 1, 3), [4, 5, 8, 7]);
    }

    #[test]
    fn test_face_contains() {
        let face = unit_face();
        assert!(face.contains(5.0, 5.0));
        assert!(!face.contains(15.0, 5.0));
        assert!(!face.contains(5.0, -1.0));
    }

    #[test]
    fn test_sort_is_stable_for_equal_depths() {
        let mut a = unit_face();
        a.value = 1.0;
        let mut b = unit_face();
        b.value = 2.0;
        let mut c = unit_face();
        c.depth = -1.0;
        let mut faces = vec![a, b, c];
        sort_faces(&mut faces);
        assert_eq!(faces[0].depth, -1.0);
        assert_eq!(faces[1].value, 1.0);
        assert_eq!(faces[2].value, 2.0);
    }
}
