//! Render state with change notification.
//!
//! [`SurfaceModel`] owns the grid, the options and the current orientation.
//! Every mutation goes through a setter that normalizes the value and, if
//! the stored value actually changed, notifies subscribers with the
//! [`Field`] that changed. Changes are also queued so the frame renderer can
//! pick them up on its next flush.

use std::fmt;

use renderer::{resolve_palette, Palette};
use serde::Serialize;
use surface_common::{Color, GridSamples, RenderOptions, SurfaceResult, ViewOrientation};
use tracing::debug;

/// A model property that can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Grid,
    Azimuth,
    Elevation,
    Zoom,
    Palette,
    Range,
    NanColor,
    BackgroundColor,
    ColorbarTextColor,
    ColorbarTitle,
    ShowColorbar,
    Autorotate,
    RotationSpeed,
    EnableHover,
}

impl Field {
    /// Whether a change invalidates the surface raster.
    pub fn needs_surface_redraw(&self) -> bool {
        matches!(
            self,
            Field::Grid
                | Field::Azimuth
                | Field::Elevation
                | Field::Zoom
                | Field::Palette
                | Field::Range
                | Field::NanColor
                | Field::BackgroundColor
        )
    }

    /// Whether a change invalidates the colorbar raster.
    pub fn needs_colorbar_redraw(&self) -> bool {
        matches!(
            self,
            Field::Grid
                | Field::Palette
                | Field::Range
                | Field::BackgroundColor
                | Field::ColorbarTextColor
                | Field::ColorbarTitle
                | Field::ShowColorbar
        )
    }
}

/// Change listener.
pub type Listener = Box<dyn FnMut(Field)>;

/// Single source of truth for what is drawn.
pub struct SurfaceModel {
    grid: GridSamples,
    options: RenderOptions,
    view: ViewOrientation,
    palette: Palette,
    listeners: Vec<Listener>,
    pending: Vec<Field>,
}

impl fmt::Debug for SurfaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceModel")
            .field("n_lat", &self.grid.n_lat())
            .field("n_lon", &self.grid.n_lon())
            .field("view", &self.view)
            .field("palette", &self.palette.name())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl SurfaceModel {
    /// Build a model from validated options. The initial orientation comes
    /// from the options, normalized.
    pub fn new(grid: GridSamples, options: RenderOptions) -> SurfaceResult<Self> {
        options.validate()?;
        let view = options.orientation();
        let palette = resolve_palette(&options.palette);
        let (vmin, vmax) = options.range_overrides();
        let options = RenderOptions {
            vmin,
            vmax,
            ..options
        };
        Ok(Self {
            grid,
            options,
            view,
            palette,
            listeners: Vec::new(),
            pending: Vec::new(),
        })
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Take the fields changed since the last call.
    pub fn drain_changes(&mut self) -> Vec<Field> {
        std::mem::take(&mut self.pending)
    }

    pub fn grid(&self) -> &GridSamples {
        &self.grid
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn view(&self) -> &ViewOrientation {
        &self.view
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn notify(&mut self, field: Field) {
        debug!(?field, "Model changed");
        if !self.pending.contains(&field) {
            self.pending.push(field);
        }
        for listener in &mut self.listeners {
            listener(field);
        }
    }

    pub fn set_grid(&mut self, grid: GridSamples) {
        if grid != self.grid {
            self.grid = grid;
            self.notify(Field::Grid);
        }
    }

    pub fn set_azimuth(&mut self, degrees: f64) {
        let before = self.view.azimuth();
        self.view.set_azimuth(degrees);
        if self.view.azimuth() != before {
            self.notify(Field::Azimuth);
        }
    }

    pub fn set_elevation(&mut self, degrees: f64) {
        let before = self.view.elevation();
        self.view.set_elevation(degrees);
        if self.view.elevation() != before {
            self.notify(Field::Elevation);
        }
    }

    /// Set zoom, clamped to the configured zoom limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        let before = self.view.zoom();
        let limits = &self.options.interaction;
        self.view.set_zoom(zoom, limits.zoom_min, limits.zoom_max);
        if self.view.zoom() != before {
            self.notify(Field::Zoom);
        }
    }

    /// Select a palette by name. Unknown names resolve to the default palette.
    pub fn set_palette(&mut self, name: &str) {
        if name == self.options.palette {
            return;
        }
        self.options.palette = name.to_string();
        self.palette = resolve_palette(name);
        self.notify(Field::Palette);
    }

    /// Set range overrides. `None` or NaN derives the bound from data.
    pub fn set_range(&mut self, vmin: Option<f64>, vmax: Option<f64>) {
        let vmin = vmin.filter(|v| !v.is_nan());
        let vmax = vmax.filter(|v| !v.is_nan());
        if (vmin, vmax) != (self.options.vmin, self.options.vmax) {
            self.options.vmin = vmin;
            self.options.vmax = vmax;
            self.notify(Field::Range);
        }
    }

    pub fn set_nan_color(&mut self, color: Color) {
        if color != self.options.nan_color {
            self.options.nan_color = color;
            self.notify(Field::NanColor);
        }
    }

    pub fn set_background_color(&mut self, color: Color) {
        if color != self.options.background_color {
            self.options.background_color = color;
            self.notify(Field::BackgroundColor);
        }
    }

    pub fn set_colorbar_text_color(&mut self, color: Color) {
        if color != self.options.colorbar_text_color {
            self.options.colorbar_text_color = color;
            self.notify(Field::ColorbarTextColor);
        }
    }

    pub fn set_colorbar_title(&mut self, title: &str) {
        if title != self.options.colorbar_title {
            self.options.colorbar_title = title.to_string();
            self.notify(Field::ColorbarTitle);
        }
    }

    pub fn set_show_colorbar(&mut self, show: bool) {
        if show != self.options.show_colorbar {
            self.options.show_colorbar = show;
            self.notify(Field::ShowColorbar);
        }
    }

    pub fn set_autorotate(&mut self, on: bool) {
        if on != self.options.autorotate {
            self.options.autorotate = on;
            self.notify(Field::Autorotate);
        }
    }

    /// Non-finite speeds are ignored.
    pub fn set_rotation_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed != self.options.rotation_speed {
            self.options.rotation_speed = speed;
            self.notify(Field::RotationSpeed);
        }
    }

    pub fn set_enable_hover(&mut self, on: bool) {
        if on != self.options.enable_hover {
            self.options.enable_hover = on;
            self.notify(Field::EnableHover);
        }
    }
}
