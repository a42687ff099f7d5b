//! Value to color mapping.
//!
//! A [`Palette`] is an ordered, never-empty list of colors. A [`ColorMapper`]
//! turns a scalar into a palette entry for a given value range and back:
//!
//! - `map` is linear with round-to-nearest indexing, so `vmin` lands on the
//!   first entry and `vmax` on the last.
//! - `nearest` inverts a painted color to the closest palette index.
//! - `range` derives `(vmin, vmax)` from data when no override is given.

use surface_common::{Color, SurfaceError, SurfaceResult};
use tracing::warn;

/// Relative slack applied to the range bounds before a value counts as
/// out of range. Scaled by `max(1, |vmax - vmin|)`.
pub const RANGE_TOLERANCE: f64 = 1e-9;

/// Named, ordered list of colors. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> SurfaceResult<Self> {
        let name = name.into();
        if colors.is_empty() {
            return Err(SurfaceError::invalid(
                "palette",
                format!("'{}' must contain at least one color", name),
            ));
        }
        Ok(Self { name, colors })
    }

    /// Build a palette from `#rrggbb` strings.
    pub fn from_hex<S: AsRef<str>>(name: impl Into<String>, hex: &[S]) -> SurfaceResult<Self> {
        let colors = hex
            .iter()
            .map(|h| h.as_ref().parse::<Color>())
            .collect::<SurfaceResult<Vec<_>>>()?;
        Self::new(name, colors)
    }

    /// Build an `n`-entry palette by interpolating evenly between control stops.
    pub fn from_stops(name: impl Into<String>, stops: &[Color], n: usize) -> SurfaceResult<Self> {
        let name = name.into();
        if stops.is_empty() || n == 0 {
            return Err(SurfaceError::invalid(
                "palette",
                format!("'{}' needs at least one stop and one entry", name),
            ));
        }
        if stops.len() == 1 || n == 1 {
            return Self::new(name, vec![stops[0]; n]);
        }

        let segments = stops.len() - 1;
        let colors = (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64 * segments as f64;
                let seg = (t.floor() as usize).min(segments - 1);
                let frac = (t - seg as f64) as f32;
                stops[seg].lerp(stops[seg + 1], frac)
            })
            .collect();

        Self::new(name, colors)
    }

    /// 256-step black to white ramp.
    pub fn greyscale() -> Self {
        Self {
            name: "Greys256".to_string(),
            colors: (0..=255u8).map(|v| Color::rgb(v, v, v)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry at `index`, clamped to the last entry.
    pub fn get(&self, index: usize) -> Color {
        self.colors[index.min(self.colors.len() - 1)]
    }

    /// Index of the middle entry, used for degenerate ranges.
    pub fn middle_index(&self) -> usize {
        (self.colors.len() - 1) / 2
    }
}

/// Value range used for coloring. `vmin <= vmax` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueRange {
    /// Bounds given in the wrong order are swapped.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { vmin: a, vmax: b }
        } else {
            Self { vmin: b, vmax: a }
        }
    }

    pub fn span(&self) -> f64 {
        self.vmax - self.vmin
    }

    pub fn midpoint(&self) -> f64 {
        self.vmin + self.span() / 2.0
    }

    /// Whether `value` lies inside the range, widened by [`RANGE_TOLERANCE`].
    pub fn contains(&self, value: f64) -> bool {
        let tol = RANGE_TOLERANCE * self.span().abs().max(1.0);
        value >= self.vmin - tol && value <= self.vmax + tol
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { vmin: 0.0, vmax: 1.0 }
    }
}

/// Maps scalars to palette colors and painted colors back to palette indices.
pub trait ColorMapper: Send + Sync {
    /// Color for `value`. NaN and out-of-range values give `nan_color`.
    fn map(&self, value: f64, palette: &Palette, range: ValueRange, nan_color: Color) -> Color;

    /// Palette index whose color is closest to `color`.
    fn nearest(&self, color: Color, palette: &Palette) -> usize;

    /// Effective range for `values` given optional overrides.
    fn range(&self, values: &[f64], vmin: Option<f64>, vmax: Option<f64>) -> ValueRange;
}

/// Linear mapping with round-to-nearest palette indexing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearColorMapper;

impl LinearColorMapper {
    /// Palette index for an in-range, non-NaN value.
    pub fn index_for(&self, value: f64, palette: &Palette, range: ValueRange) -> usize {
        let len = palette.len();
        if len == 1 {
            return 0;
        }
        let span = range.span();
        if !(span > 0.0) || !span.is_finite() {
            return palette.middle_index();
        }

        let t = ((value - range.vmin) / span).clamp(0.0, 1.0);
        ((t * (len - 1) as f64).round() as usize).min(len - 1)
    }
}

impl ColorMapper for LinearColorMapper {
    fn map(&self, value: f64, palette: &Palette, range: ValueRange, nan_color: Color) -> Color {
        if value.is_nan() || !range.contains(value) {
            return nan_color;
        }
        palette.get(self.index_for(value, palette, range))
    }

    fn nearest(&self, color: Color, palette: &Palette) -> usize {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (i, candidate) in palette.colors().iter().enumerate() {
            let d = color.channel_distance(candidate);
            // Strict comparison keeps the lowest index on ties.
            if d < best_distance {
                best = i;
                best_distance = d;
            }
        }
        best
    }

    fn range(&self, values: &[f64], vmin: Option<f64>, vmax: Option<f64>) -> ValueRange {
        let vmin = vmin.filter(|v| !v.is_nan());
        let vmax = vmax.filter(|v| !v.is_nan());

        let (lo, hi) = match (vmin, vmax) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => {
                let (data_lo, data_hi) = finite_extent(values).unwrap_or_else(|| {
                    warn!(samples = values.len(), "No finite values; using range 0..1");
                    (0.0, 1.0)
                });
                (vmin.unwrap_or(data_lo), vmax.unwrap_or(data_hi))
            }
        };

        ValueRange::new(lo, hi)
    }
}

/// Min and max of the finite entries, or `None` when there are none.
pub fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Value represented by palette entry `index`.
///
/// `vmin + index / (len - 1) * (vmax - vmin)`; a one-entry palette
/// represents the midpoint of the range.
pub fn index_to_value(index: usize, palette_len: usize, range: ValueRange) -> f64 {
    if palette_len <= 1 {
        return range.midpoint();
    }
    let t = index.min(palette_len - 1) as f64 / (palette_len - 1) as f64;
    range.vmin + t * range.span()
}
