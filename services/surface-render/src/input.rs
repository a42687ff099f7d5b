//! Loading render options and grid samples for the CLI.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use surface_common::{GridSamples, RenderOptions, SurfacePreset};
use tracing::info;

/// Points per axis for preset surfaces.
pub const PRESET_POINTS: usize = 50;
/// Presets span `[-PRESET_EXTENT, PRESET_EXTENT]` on both axes.
pub const PRESET_EXTENT: f64 = 5.0;

/// On-disk grid format. `null` values stand for missing data.
#[derive(Debug, Deserialize)]
pub struct GridFile {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub values: Vec<Option<f64>>,
    pub n_lat: usize,
    pub n_lon: usize,
}

impl GridFile {
    pub fn into_grid(self) -> Result<GridSamples> {
        let values = self
            .values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        GridSamples::new(self.lons, self.lats, values, self.n_lat, self.n_lon)
            .context("Invalid grid")
    }
}

/// Read a grid JSON file.
pub fn load_grid_file(path: &Path) -> Result<GridSamples> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file {}", path.display()))?;
    let file: GridFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse grid file {}", path.display()))?;
    let grid = file.into_grid()?;
    info!(
        path = %path.display(),
        n_lat = grid.n_lat(),
        n_lon = grid.n_lon(),
        "Loaded grid"
    );
    Ok(grid)
}

/// Grid from `--grid` if given, otherwise the named preset.
pub fn load_grid(grid: Option<&Path>, preset: &str) -> Result<GridSamples> {
    match grid {
        Some(path) => load_grid_file(path),
        None => {
            let preset: SurfacePreset = preset.parse()?;
            info!(preset = %preset, points = PRESET_POINTS, "Using preset surface");
            Ok(preset.grid(PRESET_POINTS, PRESET_EXTENT)?)
        }
    }
}

/// Options from `--config`, or defaults.
pub fn load_options(config: Option<&Path>) -> Result<RenderOptions> {
    let options = match config {
        Some(path) => RenderOptions::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RenderOptions::default(),
    };
    Ok(options)
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct OptionOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
    pub zoom: Option<f64>,
    pub palette: Option<String>,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
}

impl OptionOverrides {
    pub fn apply(&self, options: &mut RenderOptions) {
        if let Some(v) = self.width {
            options.width = v;
        }
        if let Some(v) = self.height {
            options.height = v;
        }
        if let Some(v) = self.azimuth {
            options.azimuth = v;
        }
        if let Some(v) = self.elevation {
            options.elevation = v;
        }
        if let Some(v) = self.zoom {
            options.zoom = v;
        }
        if let Some(v) = &self.palette {
            options.palette = v.clone();
        }
        if self.vmin.is_some() {
            options.vmin = self.vmin;
        }
        if self.vmax.is_some() {
            options.vmax = self.vmax;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_grid_file_null_is_nan() {
        let json = r#"{"lons":[0,1,0,1],"lats":[0,0,1,1],"values":[1.0,null,3.0,4.0],"n_lat":2,"n_lon":2}"#;
        let file: GridFile = serde_json::from_str(json).unwrap();
        let grid = file.into_grid().unwrap();
        assert!(grid.values()[1].is_nan());
        assert_eq!(grid.values()[3], 4.0);
    }

    #[test]
    fn test_grid_file_topology_checked() {
        let json = r#"{"lons":[0,1,0],"lats":[0,0,1],"values":[1,2,3],"n_lat":2,"n_lon":2}"#;
        let file: GridFile = serde_json::from_str(json).unwrap();
        assert!(file.into_grid().is_err());
    }

    #[test]
    fn test_load_grid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"lons":[0,1],"lats":[5,5],"values":[1,2],"n_lat":1,"n_lon":2}}"#
        )
        .unwrap();
        let grid = load_grid_file(file.path()).unwrap();
        assert_eq!((grid.n_lat(), grid.n_lon()), (1, 2));
    }

    #[test]
    fn test_preset_fallback_and_unknown() {
        let grid = load_grid(None, "saddle").unwrap();
        assert_eq!(grid.len(), PRESET_POINTS * PRESET_POINTS);
        assert!(load_grid(None, "teapot").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut options = RenderOptions::default();
        OptionOverrides {
            azimuth: Some(10.0),
            palette: Some("viridis".to_string()),
            ..OptionOverrides::default()
        }
        .apply(&mut options);
        assert_eq!(options.azimuth, 10.0);
        assert_eq!(options.palette, "viridis");
        assert_eq!(options.elevation, -30.0);
    }
}
