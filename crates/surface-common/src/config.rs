//! Render and interaction options.
//!
//! Options are loaded from YAML or JSON. Every field has a default, so a
//! config file only needs to name what it changes:
//!
//! ```yaml
//! palette: terrain
//! elevation: -20
//! autorotate: true
//! interaction:
//!   resume_delay_ms: 1500
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Color;
use crate::error::{SurfaceError, SurfaceResult};
use crate::view::{ViewOrientation, ZOOM_MAX, ZOOM_MIN};

/// How hover resolves the value under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    /// Read the painted pixel back and match it against the palette.
    #[default]
    PixelReadback,
    /// Hit-test the cursor against the painted face list.
    FaceHitTest,
}

/// Options recognized by the surface renderer and its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub palette: String,
    /// Lower bound of the color range; `None` or NaN derives it from data.
    pub vmin: Option<f64>,
    /// Upper bound of the color range; `None` or NaN derives it from data.
    pub vmax: Option<f64>,
    pub nan_color: Color,
    pub azimuth: f64,
    pub elevation: f64,
    pub zoom: f64,
    pub autorotate: bool,
    pub rotation_speed: f64,
    pub enable_hover: bool,
    pub hover_mode: HoverMode,
    pub show_colorbar: bool,
    pub colorbar_title: String,
    pub background_color: Color,
    pub colorbar_text_color: Color,
    pub interaction: InteractionTuning,
    pub render: RenderTuning,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            palette: "Turbo256".to_string(),
            vmin: None,
            vmax: None,
            nan_color: Color::rgb(0x80, 0x80, 0x80),
            azimuth: 45.0,
            elevation: -30.0,
            zoom: 1.0,
            autorotate: false,
            rotation_speed: 1.0,
            enable_hover: true,
            hover_mode: HoverMode::default(),
            show_colorbar: true,
            colorbar_title: "Value".to_string(),
            background_color: Color::rgb(0x0a, 0x0a, 0x0a),
            colorbar_text_color: Color::rgb(0xff, 0xff, 0xff),
            interaction: InteractionTuning::default(),
            render: RenderTuning::default(),
        }
    }
}

/// Tunable interaction constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionTuning {
    /// Degrees of rotation per pixel of pointer drag.
    pub drag_sensitivity_deg_per_px: f64,
    /// Delay before autorotation resumes after a drag ends.
    pub resume_delay_ms: u64,
    /// Zoom change per wheel notch.
    pub wheel_zoom_step: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Azimuth increment per frame is `rotation_speed * autorotate_step_factor`.
    pub autorotate_step_factor: f64,
    /// A pixel whose channels are all at or below this is treated as background.
    pub hover_background_threshold: u8,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            drag_sensitivity_deg_per_px: 0.5,
            resume_delay_ms: 1000,
            wheel_zoom_step: 0.1,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            autorotate_step_factor: 0.5,
            hover_background_threshold: 10,
        }
    }
}

/// Tunable projection and painting constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderTuning {
    /// Fraction of the shorter canvas side the data extent fills at zoom 1.
    pub scale_fill: f64,
    /// Floor applied to the data range so a flat field still has a finite scale.
    pub min_data_range: f64,
    /// Seam stroke width painted around each face.
    pub stroke_width: f32,
}

impl Default for RenderTuning {
    fn default() -> Self {
        Self {
            scale_fill: 0.6,
            min_data_range: 1e-9,
            stroke_width: 1.2,
        }
    }
}

impl RenderOptions {
    /// Parse options from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> SurfaceResult<Self> {
        let options: Self = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(json: &str) -> SurfaceResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> SurfaceResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SurfaceError::Config(format!("{}: {}", path.display(), e)))?;

        let options = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_yaml_str(&content)?,
        };
        debug!(
            path = %path.display(),
            palette = %options.palette,
            width = options.width,
            height = options.height,
            "Loaded render options"
        );
        Ok(options)
    }

    /// Check option values that the pipeline cannot recover from.
    pub fn validate(&self) -> SurfaceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::invalid(
                "width/height",
                format!("canvas must be non-empty, got {}x{}", self.width, self.height),
            ));
        }
        for (param, value) in [
            ("zoom", self.zoom),
            ("rotation_speed", self.rotation_speed),
            ("azimuth", self.azimuth),
            ("elevation", self.elevation),
        ] {
            if !value.is_finite() {
                return Err(SurfaceError::invalid(param, "must be finite"));
            }
        }

        let t = &self.interaction;
        if !(t.zoom_min > 0.0 && t.zoom_min <= t.zoom_max) {
            return Err(SurfaceError::invalid(
                "interaction.zoom_min",
                format!("need 0 < zoom_min <= zoom_max, got {}..{}", t.zoom_min, t.zoom_max),
            ));
        }
        if !t.drag_sensitivity_deg_per_px.is_finite() {
            return Err(SurfaceError::invalid(
                "interaction.drag_sensitivity_deg_per_px",
                "must be finite",
            ));
        }
        if !(self.render.scale_fill > 0.0 && self.render.min_data_range > 0.0) {
            return Err(SurfaceError::invalid(
                "render",
                "scale_fill and min_data_range must be positive",
            ));
        }

        Ok(())
    }

    /// Initial orientation with zoom clamped to the configured limits.
    pub fn orientation(&self) -> ViewOrientation {
        let mut view = ViewOrientation::default();
        view.set_azimuth(self.azimuth);
        view.set_elevation(self.elevation);
        view.set_zoom(self.zoom, self.interaction.zoom_min, self.interaction.zoom_max);
        view
    }

    /// Explicit range overrides with NaN treated as "auto".
    pub fn range_overrides(&self) -> (Option<f64>, Option<f64>) {
        (
            self.vmin.filter(|v| !v.is_nan()),
            self.vmax.filter(|v| !v.is_nan()),
        )
    }
}
