//! Mollweide equal-area projection.

use std::f64::consts::{PI, SQRT_2};

use crate::Point2D;

/// Maximum Newton iterations for the auxiliary angle.
const MAX_ITERATIONS: usize = 10;

/// Stop once the Newton step is smaller than this (radians).
const TOLERANCE: f64 = 1e-6;

/// Smallest derivative `1 + cos(theta)` the solver will divide by.
const MIN_DERIVATIVE: f64 = 1e-12;

/// Solve `theta + sin(theta) = π·sin(phi)` for the auxiliary angle.
///
/// Newton iteration seeded at `theta = phi`. The solver never reports
/// non-convergence: after the iteration budget it returns the last iterate.
/// Near the poles the root sits where the derivative vanishes, so
/// convergence there is slow and the result is close to, not exactly, `±π`.
pub fn mollweide_theta(phi: f64) -> f64 {
    let target = PI * phi.sin();
    let mut theta = phi;

    for _ in 0..MAX_ITERATIONS {
        let derivative = 1.0 + theta.cos();
        if derivative < MIN_DERIVATIVE {
            break;
        }
        let dtheta = -(theta + theta.sin() - target) / derivative;
        theta += dtheta;
        if dtheta.abs() < TOLERANCE {
            break;
        }
    }

    theta
}

/// Mollweide projection of a lon/lat pair in degrees.
pub fn mollweide(lon: f64, lat: f64) -> Point2D {
    let lambda = lon.to_radians();
    let phi = lat.to_radians();
    let theta = mollweide_theta(phi);

    Point2D::new(
        (2.0 * SQRT_2 / PI) * lambda * (theta / 2.0).cos(),
        SQRT_2 * (theta / 2.0).sin(),
    )
}
