//! Coalesced re-rendering of the surface and colorbar.
//!
//! Model changes only mark a raster dirty; [`FrameRenderer::flush`] redraws
//! each dirty raster once, however many changes arrived since the last flush.

use renderer::{
    render_colorbar, ColorbarLayout, PixmapSurface, RasterSurface, RenderedFrame, SurfaceRenderer,
    ValueRange, COLORBAR_CANVAS_WIDTH,
};
use surface_common::{HoverMode, RenderOptions, SurfaceResult};
use tracing::{debug, trace};

use crate::hover::{hover_from_faces, hover_from_pixel};
use crate::model::SurfaceModel;

/// Which rasters a flush repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushOutcome {
    pub surface: bool,
    pub colorbar: bool,
}

/// Owns the drawing surfaces and the last rendered frame.
pub struct FrameRenderer<R: RasterSurface = PixmapSurface> {
    surface: R,
    colorbar: Option<R>,
    renderer: SurfaceRenderer,
    surface_dirty: bool,
    colorbar_dirty: bool,
    last_frame: RenderedFrame,
    colorbar_layout: Option<ColorbarLayout>,
    surface_renders: u64,
    colorbar_renders: u64,
}

impl FrameRenderer<PixmapSurface> {
    /// Allocate pixmaps sized from `options`. The colorbar canvas is always
    /// allocated so `show_colorbar` can be toggled later.
    pub fn for_options(options: &RenderOptions) -> SurfaceResult<Self> {
        let surface = PixmapSurface::new(options.width, options.height)?;
        let colorbar = PixmapSurface::new(COLORBAR_CANVAS_WIDTH, options.height)?;
        Ok(Self::new(surface, Some(colorbar)))
    }
}

impl<R: RasterSurface> FrameRenderer<R> {
    /// Both rasters start dirty so the first flush paints everything.
    pub fn new(surface: R, colorbar: Option<R>) -> Self {
        Self {
            surface,
            colorbar,
            renderer: SurfaceRenderer::new(),
            surface_dirty: true,
            colorbar_dirty: true,
            last_frame: RenderedFrame::default(),
            colorbar_layout: None,
            surface_renders: 0,
            colorbar_renders: 0,
        }
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn colorbar(&self) -> Option<&R> {
        self.colorbar.as_ref()
    }

    pub fn last_frame(&self) -> &RenderedFrame {
        &self.last_frame
    }

    pub fn colorbar_layout(&self) -> Option<&ColorbarLayout> {
        self.colorbar_layout.as_ref()
    }

    /// Number of surface renders so far.
    pub fn surface_renders(&self) -> u64 {
        self.surface_renders
    }

    pub fn colorbar_renders(&self) -> u64 {
        self.colorbar_renders
    }

    pub fn is_dirty(&self) -> bool {
        self.surface_dirty || self.colorbar_dirty
    }

    pub fn mark_all_dirty(&mut self) {
        self.surface_dirty = true;
        self.colorbar_dirty = true;
    }

    /// Drain model changes and repaint what they invalidated.
    pub fn flush(&mut self, model: &mut SurfaceModel) -> FlushOutcome {
        for field in model.drain_changes() {
            self.surface_dirty |= field.needs_surface_redraw();
            self.colorbar_dirty |= field.needs_colorbar_redraw();
        }

        let mut outcome = FlushOutcome::default();

        if self.surface_dirty {
            self.last_frame = self.renderer.render(
                &mut self.surface,
                model.grid(),
                model.view(),
                model.options(),
                model.palette(),
            );
            self.surface_dirty = false;
            self.surface_renders += 1;
            outcome.surface = true;
        }

        if self.colorbar_dirty {
            self.colorbar_dirty = false;
            let options = model.options();
            if let (Some(colorbar), true) = (self.colorbar.as_mut(), options.show_colorbar) {
                let (_, height) = colorbar.size();
                let range = self.renderer.value_range(model.grid(), options);
                let layout = ColorbarLayout::compute(height, range, &options.colorbar_title);
                render_colorbar(
                    colorbar,
                    model.palette(),
                    &layout,
                    options.background_color,
                    options.colorbar_text_color,
                );
                self.colorbar_layout = Some(layout);
                self.colorbar_renders += 1;
                outcome.colorbar = true;
            } else {
                self.colorbar_layout = None;
            }
        }

        if outcome.surface || outcome.colorbar {
            debug!(
                surface = outcome.surface,
                colorbar = outcome.colorbar,
                surface_renders = self.surface_renders,
                "Flushed frame"
            );
        }
        outcome
    }

    /// Color range the last frame was painted with.
    fn painted_range(&self, model: &SurfaceModel) -> ValueRange {
        match self.last_frame.stats {
            Some(stats) => ValueRange::new(stats.vmin, stats.vmax),
            None => self.renderer.value_range(model.grid(), model.options()),
        }
    }

    /// Data value under `(x, y)` using the configured hover mode.
    pub fn hover(&self, model: &SurfaceModel, x: f64, y: f64) -> Option<f64> {
        let options = model.options();
        let value = match options.hover_mode {
            HoverMode::PixelReadback => hover_from_pixel(
                self.surface.read_pixel(x, y),
                model.palette(),
                self.painted_range(model),
                options.background_color,
                options.interaction.hover_background_threshold,
                self.renderer.mapper(),
            ),
            HoverMode::FaceHitTest => hover_from_faces(&self.last_frame.faces, x, y),
        };
        trace!(x, y, mode = ?options.hover_mode, ?value, "Hover lookup");
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface_common::GridSamples;

    fn model() -> SurfaceModel {
        let axis = [-1.0, 0.0, 1.0];
        let grid = GridSamples::from_axes(&axis, &axis, |x, y| x * y).unwrap();
        let options = RenderOptions {
            width: 64,
            height: 64,
            ..RenderOptions::default()
        };
        SurfaceModel::new(grid, options).unwrap()
    }

    #[test]
    fn test_first_flush_paints_both() {
        let mut m = model();
        let mut frames = FrameRenderer::for_options(m.options()).unwrap();
        let outcome = frames.flush(&mut m);
        assert!(outcome.surface && outcome.colorbar);
        assert_eq!(frames.last_frame().faces.len(), 4);
        assert!(frames.colorbar_layout().is_some());
        assert!(!frames.is_dirty());
    }

    #[test]
    fn test_changes_coalesce_into_one_render() {
        let mut m = model();
        let mut frames = FrameRenderer::for_options(m.options()).unwrap();
        frames.flush(&mut m);

        m.set_azimuth(10.0);
        m.set_azimuth(20.0);
        m.set_elevation(5.0);
        let outcome = frames.flush(&mut m);
        assert_eq!(outcome, FlushOutcome { surface: true, colorbar: false });
        assert_eq!(frames.surface_renders(), 2);
        assert_eq!(frames.colorbar_renders(), 1);

        assert_eq!(frames.flush(&mut m), FlushOutcome::default());
    }

    #[test]
    fn test_hidden_colorbar_is_not_painted() {
        let mut m = model();
        m.set_show_colorbar(false);
        let mut frames = FrameRenderer::for_options(m.options()).unwrap();
        let outcome = frames.flush(&mut m);
        assert!(outcome.surface);
        assert!(!outcome.colorbar);
        assert!(frames.colorbar_layout().is_none());
    }
}
