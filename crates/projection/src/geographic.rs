//! Plate Carrée (equirectangular) projection.

use std::f64::consts::PI;

use crate::Point2D;

/// Equirectangular mapping: both axes scaled by `π/180`.
pub fn plate_carree(lon: f64, lat: f64) -> Point2D {
    Point2D::new(lon * PI / 180.0, lat * PI / 180.0)
}
