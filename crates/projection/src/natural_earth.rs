//! Natural Earth pseudocylindrical projection (polynomial form).

use crate::Point2D;

const A0: f64 = 0.8707;
const A1: f64 = -0.131979;
const A2: f64 = -0.013791;
const A3: f64 = 0.003971;
const A4: f64 = -0.001529;
const B0: f64 = 1.007226;
const B1: f64 = 0.015085;
const B2: f64 = -0.044475;
const B3: f64 = 0.028874;
const B4: f64 = -0.005916;

/// Natural Earth projection: polynomials in `phi²`, x linear in lambda.
pub fn natural_earth(lon: f64, lat: f64) -> Point2D {
    let lambda = lon.to_radians();
    let phi = lat.to_radians();

    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;

    let x = lambda * (A0 + phi2 * (A1 + phi2 * (A2 + phi4 * phi2 * (A3 + phi2 * A4))));
    let y = phi * (B0 + phi2 * (B1 + phi4 * (B2 + B3 * phi2 + B4 * phi4)));

    Point2D::new(x, y)
}
