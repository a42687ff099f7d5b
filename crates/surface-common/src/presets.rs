//! Built-in demo surfaces evaluated on a square grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SurfaceError, SurfaceResult};
use crate::grid::GridSamples;

/// Analytic surfaces for demos and smoke tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfacePreset {
    /// `sin(r)`
    Ripple,
    /// `sin(3r) / r`
    Sinc,
    /// `x² - y²`
    Saddle,
    /// `sin(x) * cos(y)`
    EggCrate,
    /// `exp(-0.1 r²) * sin(2x) * cos(2y)`
    GaussianWave,
}

impl SurfacePreset {
    pub const ALL: [SurfacePreset; 5] = [
        SurfacePreset::Ripple,
        SurfacePreset::Sinc,
        SurfacePreset::Saddle,
        SurfacePreset::EggCrate,
        SurfacePreset::GaussianWave,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SurfacePreset::Ripple => "ripple",
            SurfacePreset::Sinc => "sinc",
            SurfacePreset::Saddle => "saddle",
            SurfacePreset::EggCrate => "egg_crate",
            SurfacePreset::GaussianWave => "gaussian_wave",
        }
    }

    /// Evaluate the surface at one point.
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        let r2 = x * x + y * y;
        match self {
            SurfacePreset::Ripple => r2.sqrt().sin(),
            SurfacePreset::Sinc => (3.0 * r2.sqrt()).sin() / (r2 + 1e-6).sqrt(),
            SurfacePreset::Saddle => x * x - y * y,
            SurfacePreset::EggCrate => x.sin() * y.cos(),
            SurfacePreset::GaussianWave => (-0.1 * r2).exp() * (2.0 * x).sin() * (2.0 * y).cos(),
        }
    }

    /// Sample the surface on an `n × n` grid spanning `[-extent, extent]²`.
    pub fn grid(&self, n: usize, extent: f64) -> SurfaceResult<GridSamples> {
        if n < 2 {
            return Err(SurfaceError::invalid("n", "preset grids need at least 2 points per axis"));
        }
        let step = 2.0 * extent / (n - 1) as f64;
        let axis: Vec<f64> = (0..n).map(|i| -extent + step * i as f64).collect();
        GridSamples::from_axes(&axis, &axis, |x, y| self.eval(x, y))
    }
}

impl FromStr for SurfacePreset {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SurfacePreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SurfaceError::invalid("preset", format!("unknown preset '{}'", s)))
    }
}

impl fmt::Display for SurfacePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
