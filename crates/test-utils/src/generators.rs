//! Synthetic surface grids for tests.
//!
//! Generators return plain row-major vectors in a [`GeneratedGrid`] so this
//! crate stays free of workspace dependencies; callers validate them through
//! `GridSamples::new`.

/// Row-major lon/lat/value vectors plus topology.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedGrid {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub values: Vec<f64>,
    pub n_lat: usize,
    pub n_lon: usize,
}

impl GeneratedGrid {
    /// Destructure into the argument order of `GridSamples::new`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>, usize, usize) {
        (self.lons, self.lats, self.values, self.n_lat, self.n_lon)
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Creates a surface grid by evaluating `f(lon, lat)` on a meshgrid.
///
/// Row `i` has latitude `lat_range` sample `i`; column `j` has longitude
/// `lon_range` sample `j`.
///
/// # Example
///
/// ```
/// use test_utils::create_surface_grid;
///
/// let grid = create_surface_grid(3, 4, (0.0, 3.0), (0.0, 2.0), |x, y| x + 10.0 * y);
/// assert_eq!(grid.values.len(), 12);
/// assert_eq!(grid.values[0], 0.0);   // lon=0, lat=0
/// assert_eq!(grid.values[5], 11.0);  // row 1, col 1 -> lon=1, lat=1
/// ```
pub fn create_surface_grid<F>(
    n_lat: usize,
    n_lon: usize,
    lon_range: (f64, f64),
    lat_range: (f64, f64),
    f: F,
) -> GeneratedGrid
where
    F: Fn(f64, f64) -> f64,
{
    let lon_axis = linspace(lon_range.0, lon_range.1, n_lon);
    let lat_axis = linspace(lat_range.0, lat_range.1, n_lat);

    let mut lons = Vec::with_capacity(n_lat * n_lon);
    let mut lats = Vec::with_capacity(n_lat * n_lon);
    let mut values = Vec::with_capacity(n_lat * n_lon);

    for &lat in &lat_axis {
        for &lon in &lon_axis {
            lons.push(lon);
            lats.push(lat);
            values.push(f(lon, lat));
        }
    }

    GeneratedGrid {
        lons,
        lats,
        values,
        n_lat,
        n_lon,
    }
}

/// Creates a grid whose value increases linearly with the flat index.
///
/// Handy when a test needs every face to have a distinct average value.
pub fn create_ramp_grid(n_lat: usize, n_lon: usize) -> GeneratedGrid {
    let mut grid = create_surface_grid(n_lat, n_lon, (-10.0, 10.0), (-5.0, 5.0), |_, _| 0.0);
    for (i, v) in grid.values.iter_mut().enumerate() {
        *v = i as f64;
    }
    grid
}

/// Creates a grid with the same value everywhere on a degenerate point footprint.
///
/// All lons, lats and values are equal, so every axis extent is zero.
pub fn create_constant_grid(n_lat: usize, n_lon: usize, value: f64) -> GeneratedGrid {
    create_surface_grid(n_lat, n_lon, (0.0, 0.0), (0.0, 0.0), |_, _| value)
}

/// The radial ripple `sin(sqrt(x² + y²))` on [-5, 5]², the classic demo surface.
pub fn create_ripple_grid(n: usize) -> GeneratedGrid {
    create_surface_grid(n, n, (-5.0, 5.0), (-5.0, 5.0), |x, y| (x * x + y * y).sqrt().sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_surface_grid_layout() {
        let grid = create_surface_grid(2, 3, (0.0, 2.0), (10.0, 20.0), |x, y| x + y);
        assert_eq!(grid.lons, vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(grid.lats, vec![10.0, 10.0, 10.0, 20.0, 20.0, 20.0]);
        assert_eq!(grid.values[4], 21.0);
    }

    #[test]
    fn test_ramp_grid_is_strictly_increasing() {
        let grid = create_ramp_grid(4, 5);
        assert!(grid.values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_constant_grid() {
        let grid = create_constant_grid(3, 3, 7.0);
        assert!(grid.values.iter().all(|&v| v == 7.0));
        assert!(grid.lons.iter().all(|&v| v == 0.0));
    }
}
