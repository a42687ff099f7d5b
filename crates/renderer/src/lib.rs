//! Software rendering for 3D data surfaces.
//!
//! - `colormap` / `palettes`: palettes and value to color mapping
//! - `surface`: view rotation and screen scaling
//! - `raster`: painter's-algorithm face rasterizer
//! - `canvas`: drawing surface abstraction (tiny-skia backed)
//! - `colorbar`: legend geometry and painting
//! - `text`: glyph rasterization for colorbar labels
//! - `map`: flat map and globe scatter plots
//! - `png`: PNG encoding

pub mod canvas;
pub mod colorbar;
pub mod colormap;
pub mod map;
pub mod palettes;
pub mod png;
pub mod raster;
pub mod surface;
pub mod text;

pub use canvas::{PixmapSurface, RasterSurface};
pub use colorbar::{render_colorbar, ColorbarLayout, COLORBAR_CANVAS_WIDTH};
pub use colormap::{index_to_value, ColorMapper, LinearColorMapper, Palette, ValueRange};
pub use palettes::{resolve_palette, BuiltinPalettes, PaletteRegistry, DEFAULT_PALETTE};
pub use raster::{Face, RenderStats, RenderedFrame, SurfaceRenderer};
pub use surface::{project_surface, ProjectedSurface, ProjectedVertex, ScreenTransform};
