//! Name-based projection lookup and pixel scaling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{mollweide, natural_earth, plate_carree, robinson, Point2D};

/// Signature shared by all 2D projections.
pub type ProjectionFn = fn(f64, f64) -> Point2D;

/// The 2D projections available by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapProjection {
    Mollweide,
    #[default]
    NaturalEarth,
    Robinson,
    PlateCarree,
}

impl MapProjection {
    pub const ALL: [MapProjection; 4] = [
        MapProjection::Mollweide,
        MapProjection::NaturalEarth,
        MapProjection::Robinson,
        MapProjection::PlateCarree,
    ];

    /// Resolve a projection by name. Unknown names resolve to Natural Earth.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mollweide" => MapProjection::Mollweide,
            "natural_earth" => MapProjection::NaturalEarth,
            "robinson" => MapProjection::Robinson,
            "plate_carree" => MapProjection::PlateCarree,
            _ => MapProjection::NaturalEarth,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapProjection::Mollweide => "mollweide",
            MapProjection::NaturalEarth => "natural_earth",
            MapProjection::Robinson => "robinson",
            MapProjection::PlateCarree => "plate_carree",
        }
    }

    pub fn function(&self) -> ProjectionFn {
        match self {
            MapProjection::Mollweide => mollweide,
            MapProjection::NaturalEarth => natural_earth,
            MapProjection::Robinson => robinson,
            MapProjection::PlateCarree => plate_carree,
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> Point2D {
        (self.function())(lon, lat)
    }

    /// Divisor applied to the shorter canvas side to get pixels per unit.
    fn scale_divisor(&self) -> f64 {
        match self {
            MapProjection::Mollweide => 4.0,
            MapProjection::Robinson => 3.8,
            MapProjection::NaturalEarth | MapProjection::PlateCarree => 3.5,
        }
    }

    /// Pixels per projection unit for a canvas of the given size.
    pub fn pixel_scale(&self, width: f64, height: f64) -> f64 {
        width.min(height) / self.scale_divisor()
    }
}

impl FromStr for MapProjection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MapProjection::from_name(s))
    }
}

impl fmt::Display for MapProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Get the projection function for a name (Natural Earth when unknown).
pub fn get_projection(name: &str) -> ProjectionFn {
    MapProjection::from_name(name).function()
}

/// Get the pixel scale for a named projection (Natural Earth's when unknown).
pub fn get_projection_scale(name: &str, width: f64, height: f64) -> f64 {
    MapProjection::from_name(name).pixel_scale(width, height)
}
