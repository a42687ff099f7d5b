//! Geographic map projections.
//!
//! Every projection takes longitude/latitude in degrees and returns a point
//! in projection units (radians-scaled, no pixel scaling). Conversion to
//! radians happens once at the top of each function.

pub mod geographic;
pub mod map_projection;
pub mod mollweide;
pub mod natural_earth;
pub mod robinson;
pub mod sphere;

pub use geographic::plate_carree;
pub use map_projection::{get_projection, get_projection_scale, MapProjection};
pub use mollweide::{mollweide, mollweide_theta};
pub use natural_earth::natural_earth;
pub use robinson::robinson;
pub use sphere::{sphere, SpherePoint, SphereView, DEFAULT_VISIBILITY_THRESHOLD};

use serde::{Deserialize, Serialize};

/// A point in 2D projection space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
