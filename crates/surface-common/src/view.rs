//! Viewer orientation: azimuth, elevation and zoom.

use serde::{Deserialize, Serialize};

/// Default limits for zoom.
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 8.0;

/// Elevation limits in degrees.
pub const ELEVATION_MIN: f64 = -90.0;
pub const ELEVATION_MAX: f64 = 90.0;

/// The single source of truth for the current view.
///
/// Fields are private so that every mutation goes through the normalizing
/// setters: azimuth is wrapped to [0, 360), elevation clamped to [-90, 90],
/// zoom clamped to the configured zoom limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewOrientation {
    azimuth: f64,
    elevation: f64,
    zoom: f64,
}

impl Default for ViewOrientation {
    fn default() -> Self {
        Self {
            azimuth: 45.0,
            elevation: -30.0,
            zoom: 1.0,
        }
    }
}

impl ViewOrientation {
    pub fn new(azimuth: f64, elevation: f64, zoom: f64) -> Self {
        let mut view = Self::default();
        view.set_azimuth(azimuth);
        view.set_elevation(elevation);
        view.set_zoom(zoom, ZOOM_MIN, ZOOM_MAX);
        view
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_azimuth(&mut self, degrees: f64) {
        self.azimuth = wrap_degrees(degrees);
    }

    pub fn set_elevation(&mut self, degrees: f64) {
        self.elevation = clamp_elevation(degrees);
    }

    /// Set zoom, clamped to `[min, max]`. Non-finite input is ignored.
    pub fn set_zoom(&mut self, zoom: f64, min: f64, max: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(min, max);
        }
    }

    pub fn azimuth_rad(&self) -> f64 {
        self.azimuth.to_radians()
    }

    pub fn elevation_rad(&self) -> f64 {
        self.elevation.to_radians()
    }
}

/// Wrap an angle into [0, 360). Non-finite input wraps to 0.
pub fn wrap_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamp an elevation into [-90, 90]. NaN clamps to 0.
pub fn clamp_elevation(degrees: f64) -> f64 {
    if degrees.is_nan() {
        return 0.0;
    }
    degrees.clamp(ELEVATION_MIN, ELEVATION_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let view = ViewOrientation::default();
        assert_eq!(view.azimuth(), 45.0);
        assert_eq!(view.elevation(), -30.0);
        assert_eq!(view.zoom(), 1.0);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-10.0), 350.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-1e-20), 0.0);
        assert_eq!(wrap_degrees(f64::NAN), 0.0);
    }

    #[test]
    fn test_new_normalizes() {
        let view = ViewOrientation::new(-90.0, 120.0, 20.0);
        assert_eq!(view.azimuth(), 270.0);
        assert_eq!(view.elevation(), 90.0);
        assert_eq!(view.zoom(), ZOOM_MAX);
    }

    #[test]
    fn test_set_zoom_ignores_nan() {
        let mut view = ViewOrientation::default();
        view.set_zoom(f64::NAN, ZOOM_MIN, ZOOM_MAX);
        assert_eq!(view.zoom(), 1.0);
        view.set_zoom(0.1, ZOOM_MIN, ZOOM_MAX);
        assert_eq!(view.zoom(), ZOOM_MIN);
    }
}
