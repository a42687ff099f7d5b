//! Orthographic sphere projection with azimuthal rotation and tilt.
//!
//! A lon/lat point is placed on the unit sphere, rotated about the polar
//! axis, then tilted toward the viewer. The tilted y component becomes the
//! depth used for back-to-front ordering.

use serde::{Deserialize, Serialize};

/// Depth above which a point counts as visible.
///
/// Slightly negative, so a thin band past the horizon is still drawn and the
/// limb fades out softly instead of being cut at the exact silhouette. This
/// is a tuned value, not a derived one; see [`SphereView::with_visibility_threshold`].
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = -0.15;

/// A projected sphere point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpherePoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
    pub visible: bool,
}

/// Project a lon/lat point (degrees) with precomputed rotation and tilt terms.
pub fn sphere(
    lon: f64,
    lat: f64,
    cos_angle: f64,
    sin_angle: f64,
    cos_tilt: f64,
    sin_tilt: f64,
) -> SpherePoint {
    project_with_threshold(
        lon,
        lat,
        (cos_angle, sin_angle),
        (cos_tilt, sin_tilt),
        DEFAULT_VISIBILITY_THRESHOLD,
    )
}

fn project_with_threshold(
    lon: f64,
    lat: f64,
    (cos_angle, sin_angle): (f64, f64),
    (cos_tilt, sin_tilt): (f64, f64),
    threshold: f64,
) -> SpherePoint {
    let lat_rad = lat.to_radians();
    let lon_rad = lon.to_radians();

    let x = lat_rad.cos() * (-lon_rad).cos();
    let y = lat_rad.cos() * (-lon_rad).sin();
    let z = lat_rad.sin();

    let x_rot = x * cos_angle - y * sin_angle;
    let y_rot = x * sin_angle + y * cos_angle;
    let y_tilt = y_rot * cos_tilt - z * sin_tilt;
    let z_tilt = y_rot * sin_tilt + z * cos_tilt;

    SpherePoint {
        x: x_rot,
        y: z_tilt,
        depth: y_tilt,
        visible: y_tilt > threshold,
    }
}

/// Rotation/tilt state for projecting many points with one set of trig terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereView {
    cos_angle: f64,
    sin_angle: f64,
    cos_tilt: f64,
    sin_tilt: f64,
    visibility_threshold: f64,
}

impl SphereView {
    /// Create a view from rotation and tilt angles in degrees.
    pub fn new(rotation_deg: f64, tilt_deg: f64) -> Self {
        let (sin_angle, cos_angle) = rotation_deg.to_radians().sin_cos();
        let (sin_tilt, cos_tilt) = tilt_deg.to_radians().sin_cos();
        Self {
            cos_angle,
            sin_angle,
            cos_tilt,
            sin_tilt,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }

    pub fn with_visibility_threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    pub fn visibility_threshold(&self) -> f64 {
        self.visibility_threshold
    }

    pub fn project(&self, lon: f64, lat: f64) -> SpherePoint {
        project_with_threshold(
            lon,
            lat,
            (self.cos_angle, self.sin_angle),
            (self.cos_tilt, self.sin_tilt),
            self.visibility_threshold,
        )
    }
}
