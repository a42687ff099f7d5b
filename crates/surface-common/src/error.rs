//! Error types for the surface3d crates.

use thiserror::Error;

/// Result type alias using SurfaceError.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Primary error type for surface rendering operations.
///
/// Only boundary validation produces these. Once a grid and its options
/// have been accepted, the render pipeline handles degenerate data by
/// fallback policy and never returns an error mid-frame.
#[derive(Debug, Error)]
pub enum SurfaceError {
    // === Grid Validation Errors ===
    #[error("Grid sequences differ in length: lons={lons}, lats={lats}, values={values}")]
    LengthMismatch {
        lons: usize,
        lats: usize,
        values: usize,
    },

    #[error("Grid topology {n_lat}x{n_lon} does not match {len} samples")]
    TopologyMismatch {
        n_lat: usize,
        n_lon: usize,
        len: usize,
    },

    #[error("Grid is empty")]
    EmptyGrid,

    // === Option Errors ===
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Palette not found: {0}")]
    UnknownPalette(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Encoding failed: {0}")]
    Encode(String),
}

impl SurfaceError {
    /// Shorthand for an `InvalidParameter` error.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        SurfaceError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller-supplied grid data.
    pub fn is_grid_error(&self) -> bool {
        matches!(
            self,
            SurfaceError::LengthMismatch { .. }
                | SurfaceError::TopologyMismatch { .. }
                | SurfaceError::EmptyGrid
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for SurfaceError {
    fn from(err: std::io::Error) -> Self {
        SurfaceError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SurfaceError {
    fn from(err: serde_json::Error) -> Self {
        SurfaceError::Config(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for SurfaceError {
    fn from(err: serde_yaml::Error) -> Self {
        SurfaceError::Config(format!("YAML error: {}", err))
    }
}
