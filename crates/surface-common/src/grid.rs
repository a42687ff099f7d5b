//! Grid sample sets: lon/lat/value triples on a regular topology.

use serde::{Deserialize, Serialize};

use crate::error::{SurfaceError, SurfaceResult};

/// Three equal-length sequences of samples laid out row-major,
/// `index = row * n_lon + col` with `row < n_lat` and `col < n_lon`.
///
/// The constructor is the validation boundary: every `GridSamples` in
/// existence satisfies `lons.len() == lats.len() == values.len() == n_lat * n_lon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct GridSamples {
    lons: Vec<f64>,
    lats: Vec<f64>,
    values: Vec<f64>,
    n_lat: usize,
    n_lon: usize,
}

/// Unvalidated wire form of a grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGrid {
    lons: Vec<f64>,
    lats: Vec<f64>,
    values: Vec<f64>,
    n_lat: usize,
    n_lon: usize,
}

impl TryFrom<RawGrid> for GridSamples {
    type Error = SurfaceError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        GridSamples::new(raw.lons, raw.lats, raw.values, raw.n_lat, raw.n_lon)
    }
}

impl From<GridSamples> for RawGrid {
    fn from(grid: GridSamples) -> Self {
        RawGrid {
            lons: grid.lons,
            lats: grid.lats,
            values: grid.values,
            n_lat: grid.n_lat,
            n_lon: grid.n_lon,
        }
    }
}

impl GridSamples {
    /// Validate and wrap a sample set.
    pub fn new(
        lons: Vec<f64>,
        lats: Vec<f64>,
        values: Vec<f64>,
        n_lat: usize,
        n_lon: usize,
    ) -> SurfaceResult<Self> {
        if lons.len() != lats.len() || lons.len() != values.len() {
            return Err(SurfaceError::LengthMismatch {
                lons: lons.len(),
                lats: lats.len(),
                values: values.len(),
            });
        }
        if lons.is_empty() {
            return Err(SurfaceError::EmptyGrid);
        }
        if n_lat.checked_mul(n_lon) != Some(lons.len()) {
            return Err(SurfaceError::TopologyMismatch {
                n_lat,
                n_lon,
                len: lons.len(),
            });
        }

        Ok(Self {
            lons,
            lats,
            values,
            n_lat,
            n_lon,
        })
    }

    /// Build a grid from 1-D axes, meshgrid style: row `i` has latitude
    /// `lat_axis[i]`, column `j` has longitude `lon_axis[j]`.
    pub fn from_axes<F>(lon_axis: &[f64], lat_axis: &[f64], mut f: F) -> SurfaceResult<Self>
    where
        F: FnMut(f64, f64) -> f64,
    {
        let n = lon_axis.len() * lat_axis.len();
        let mut lons = Vec::with_capacity(n);
        let mut lats = Vec::with_capacity(n);
        let mut values = Vec::with_capacity(n);

        for &lat in lat_axis {
            for &lon in lon_axis {
                lons.push(lon);
                lats.push(lat);
                values.push(f(lon, lat));
            }
        }

        Self::new(lons, lats, values, lat_axis.len(), lon_axis.len())
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn n_lat(&self) -> usize {
        self.n_lat
    }

    pub fn n_lon(&self) -> usize {
        self.n_lon
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated grid; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat index of `(row, col)`.
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.n_lon + col
    }

    /// `(lon, lat, value)` at a flat index.
    pub fn sample(&self, idx: usize) -> Option<(f64, f64, f64)> {
        Some((
            *self.lons.get(idx)?,
            *self.lats.get(idx)?,
            *self.values.get(idx)?,
        ))
    }

    /// Number of quadrilateral cells, `(n_lat - 1) * (n_lon - 1)`.
    pub fn face_count(&self) -> usize {
        self.n_lat.saturating_sub(1) * self.n_lon.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_length_mismatch() {
        let err = GridSamples::new(vec![0.0; 4], vec![0.0; 3], vec![0.0; 4], 2, 2).unwrap_err();
        assert!(matches!(err, SurfaceError::LengthMismatch { lats: 3, .. }));
    }

    #[test]
    fn test_rejects_topology_mismatch() {
        let err = GridSamples::new(vec![0.0; 6], vec![0.0; 6], vec![0.0; 6], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            SurfaceError::TopologyMismatch { n_lat: 2, n_lon: 2, len: 6 }
        ));
    }

    #[test]
    fn test_rejects_empty() {
        let err = GridSamples::new(vec![], vec![], vec![], 0, 0).unwrap_err();
        assert!(matches!(err, SurfaceError::EmptyGrid));
    }

    #[test]
    fn test_from_axes_is_row_major() {
        let grid = GridSamples::from_axes(&[0.0, 1.0, 2.0], &[10.0, 20.0], |lon, lat| lon + lat)
            .unwrap();
        assert_eq!(grid.n_lat(), 2);
        assert_eq!(grid.n_lon(), 3);
        assert_eq!(grid.sample(grid.flat_index(1, 2)), Some((2.0, 20.0, 22.0)));
        assert_eq!(grid.face_count(), 2);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"{"lons":[0,1],"lats":[0,0],"values":[1,2],"n_lat":1,"n_lon":2}"#;
        assert!(serde_json::from_str::<GridSamples>(ok).is_ok());

        let bad = r#"{"lons":[0,1],"lats":[0,0],"values":[1,2],"n_lat":2,"n_lon":2}"#;
        assert!(serde_json::from_str::<GridSamples>(bad).is_err());
    }
}
