//! Common types shared across the surface3d crates.

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod presets;
pub mod view;

pub use color::Color;
pub use config::{HoverMode, InteractionTuning, RenderOptions, RenderTuning};
pub use error::{SurfaceError, SurfaceResult};
pub use grid::GridSamples;
pub use presets::SurfacePreset;
pub use view::ViewOrientation;
