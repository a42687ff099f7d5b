//! Subcommand implementations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use interaction::{FrameRenderer, SurfaceController, SurfaceModel, VirtualScheduler};
use projection::{MapProjection, SphereView};
use renderer::map::{render_globe_points, render_map_points, PointStyle};
use renderer::png::encode_surface;
use renderer::{resolve_palette, ColorMapper, LinearColorMapper, PixmapSurface};
use surface_common::{GridSamples, RenderOptions};
use tracing::{info, warn};

fn write_png(surface: &PixmapSurface, path: &Path) -> Result<()> {
    let png = encode_surface(surface).context("PNG encoding failed")?;
    std::fs::write(path, &png).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = png.len(), "Wrote PNG");
    Ok(())
}

/// Render one still frame, and optionally its colorbar.
pub fn render(
    grid: GridSamples,
    options: RenderOptions,
    out: &Path,
    colorbar_out: Option<&Path>,
    print_stats: bool,
) -> Result<()> {
    let mut options = options;
    options.show_colorbar = colorbar_out.is_some();
    let mut model = SurfaceModel::new(grid, options)?;
    let mut frames = FrameRenderer::for_options(model.options())?;
    frames.flush(&mut model);

    write_png(frames.surface(), out)?;
    if let Some(path) = colorbar_out {
        match frames.colorbar() {
            Some(colorbar) => write_png(colorbar, path)?,
            None => warn!("No colorbar surface was allocated"),
        }
    }

    if print_stats {
        if let Some(stats) = frames.last_frame().stats {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

/// Drive autorotation on a virtual clock and write one PNG per frame.
pub fn spin(
    grid: GridSamples,
    options: RenderOptions,
    frames: usize,
    fps: u32,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut options = options;
    options.autorotate = true;
    options.show_colorbar = false;
    let model = SurfaceModel::new(grid, options)?;
    let mut controller = SurfaceController::with_pixmaps(model, VirtualScheduler::new())?;
    controller.start();

    let frame_time = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    let mut written = Vec::with_capacity(frames);
    for i in 0..frames {
        if i > 0 {
            controller.advance(frame_time);
        }
        let path = out_dir.join(format!("frame_{:04}.png", i));
        write_png(controller.frames().surface(), &path)?;
        written.push(path);
    }

    controller.teardown();
    info!(
        frames = written.len(),
        final_azimuth = controller.model().view().azimuth(),
        "Spin sequence complete"
    );
    Ok(written)
}

/// How the `project` subcommand places lon/lat samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionTarget {
    Flat(MapProjection),
    Globe { rotation: f64, tilt: f64 },
}

impl ProjectionTarget {
    pub fn from_name(name: &str, rotation: f64, tilt: f64) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sphere" | "globe" => ProjectionTarget::Globe { rotation, tilt },
            other => ProjectionTarget::Flat(MapProjection::from_name(other)),
        }
    }
}

/// Scatter the grid's lon/lat samples through a map projection.
pub fn project(
    grid: &GridSamples,
    options: &RenderOptions,
    target: ProjectionTarget,
    point_size: f32,
    out: &Path,
) -> Result<usize> {
    let mut surface = PixmapSurface::new(options.width, options.height)?;
    let palette = resolve_palette(&options.palette);
    let mapper = LinearColorMapper;
    let (vmin, vmax) = options.range_overrides();
    let style = PointStyle {
        palette: &palette,
        range: mapper.range(grid.values(), vmin, vmax),
        nan_color: options.nan_color,
        background: options.background_color,
        point_size,
    };

    let painted = match target {
        ProjectionTarget::Flat(projection) => {
            info!(projection = %projection, "Projecting grid");
            render_map_points(&mut surface, grid, projection, &style, &mapper)
        }
        ProjectionTarget::Globe { rotation, tilt } => {
            info!(rotation, tilt, "Projecting grid onto globe");
            let view = SphereView::new(rotation, tilt);
            render_globe_points(&mut surface, grid, &view, options.zoom, &style, &mapper)
        }
    };

    write_png(&surface, out)?;
    Ok(painted)
}
