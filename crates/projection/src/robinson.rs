//! Robinson projection via tabulated shape factors.

use crate::Point2D;

/// Parallel-length factors at 5° latitude steps, 0° to 90°.
const ROBINSON_AA: [f64; 19] = [
    1.0000, 0.9986, 0.9954, 0.9900, 0.9822, 0.9730, 0.9600, 0.9427, 0.9216, 0.8962, 0.8679,
    0.8350, 0.7986, 0.7597, 0.7186, 0.6732, 0.6213, 0.5722, 0.5322,
];

/// Parallel-distance-from-equator factors at 5° latitude steps, 0° to 90°.
const ROBINSON_BB: [f64; 19] = [
    0.0000, 0.0620, 0.1240, 0.1860, 0.2480, 0.3100, 0.3720, 0.4340, 0.4958, 0.5571, 0.6176,
    0.6769, 0.7346, 0.7903, 0.8435, 0.8936, 0.9394, 0.9761, 1.0000,
];

const X_SCALE: f64 = 0.8487;
const Y_SCALE: f64 = 1.3523;

/// Width of one table bucket in degrees.
const STEP_DEG: f64 = 5.0;

/// Last bucket index whose upper neighbour is still in the table.
const LAST_BUCKET: usize = ROBINSON_AA.len() - 2;

/// Robinson projection of a lon/lat pair in degrees.
///
/// Shape factors are linearly interpolated between the two table rows that
/// enclose `|lat|`; y takes the sign of the input latitude.
pub fn robinson(lon: f64, lat: f64) -> Point2D {
    let lambda = lon.to_radians();
    let sign = if lat < 0.0 { -1.0 } else { 1.0 };
    let phi_deg = lat.abs().min(90.0);

    let i = ((phi_deg / STEP_DEG).floor() as usize).min(LAST_BUCKET);
    let frac = (phi_deg - i as f64 * STEP_DEG) / STEP_DEG;

    let aa = ROBINSON_AA[i] + (ROBINSON_AA[i + 1] - ROBINSON_AA[i]) * frac;
    let bb = ROBINSON_BB[i] + (ROBINSON_BB[i + 1] - ROBINSON_BB[i]) * frac;

    Point2D::new(X_SCALE * aa * lambda, Y_SCALE * bb * sign)
}
