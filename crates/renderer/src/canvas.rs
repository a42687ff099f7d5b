//! Host drawing surface.
//!
//! The rasterizer only needs a handful of primitives, so it draws through
//! the [`RasterSurface`] trait. [`PixmapSurface`] is the default
//! implementation, backed by a `tiny-skia` pixmap.

use surface_common::{Color, SurfaceError, SurfaceResult};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// Drawing surface the renderer paints into.
pub trait RasterSurface {
    /// Canvas size in pixels, `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fill a quadrilateral and stroke its outline in the same color.
    fn fill_quad(&mut self, points: &[(f32, f32); 4], color: Color, stroke_width: f32);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32);

    /// Color of the pixel containing `(x, y)`.
    ///
    /// `None` when the point is outside the surface or nothing has been
    /// painted yet.
    fn read_pixel(&self, x: f64, y: f64) -> Option<Color>;
}

/// [`RasterSurface`] backed by a `tiny_skia::Pixmap`.
///
/// Painting is not anti-aliased, so every painted face pixel carries the
/// exact palette color it was filled with.
pub struct PixmapSurface {
    pixmap: Pixmap,
    painted: bool,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            SurfaceError::Render(format!("Cannot allocate {}x{} pixmap", width, height))
        })?;
        Ok(Self {
            pixmap,
            painted: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.pixels().len() * 4);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = false;
        paint
    }
}

impl RasterSurface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
        self.painted = true;
    }

    fn fill_quad(&mut self, points: &[(f32, f32); 4], color: Color, stroke_width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            pb.line_to(x, y);
        }
        pb.close();

        // Degenerate quads (all corners collinear) produce no path.
        let Some(path) = pb.finish() else {
            return;
        };

        let paint = Self::paint(color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        if stroke_width > 0.0 {
            let stroke = Stroke {
                width: stroke_width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
        self.painted = true;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if let Some(rect) = Rect::from_xywh(x, y, width, height) {
            self.pixmap
                .fill_rect(rect, &Self::paint(color), Transform::identity(), None);
            self.painted = true;
        }
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0, from.1);
        pb.line_to(to.0, to.1);
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            self.pixmap.stroke_path(
                &path,
                &Self::paint(color),
                &stroke,
                Transform::identity(),
                None,
            );
            self.painted = true;
        }
    }

    fn read_pixel(&self, x: f64, y: f64) -> Option<Color> {
        if !self.painted || !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (px, py) = (x.floor(), y.floor());
        if px >= self.pixmap.width() as f64 || py >= self.pixmap.height() as f64 {
            return None;
        }
        let c = self.pixmap.pixel(px as u32, py as u32)?.demultiply();
        Some(Color::new(c.red(), c.green(), c.blue(), c.alpha()))
    }
}
