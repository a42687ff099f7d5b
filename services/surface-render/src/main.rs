//! Surface rendering CLI.
//!
//! Renders gridded data as a shaded 3D surface:
//! - `render`: one still PNG, with optional colorbar
//! - `spin`: an autorotation frame sequence on a virtual clock
//! - `project`: lon/lat samples through a 2D map projection or a globe

mod commands;
mod input;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use commands::ProjectionTarget;
use input::{load_grid, load_options, OptionOverrides};

#[derive(Parser, Debug)]
#[command(name = "surface-render")]
#[command(about = "Render 3D data surfaces to PNG")]
struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Inputs shared by every subcommand.
#[derive(ClapArgs, Debug)]
struct SourceArgs {
    /// Render options file (YAML or JSON)
    #[arg(long, env = "SURFACE_CONFIG")]
    config: Option<PathBuf>,

    /// Grid samples JSON file; takes precedence over --preset
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Built-in surface used when no --grid is given
    #[arg(long, default_value = "ripple")]
    preset: String,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Palette name
    #[arg(long)]
    palette: Option<String>,

    /// Lower bound of the color range
    #[arg(long, allow_hyphen_values = true)]
    vmin: Option<f64>,

    /// Upper bound of the color range
    #[arg(long, allow_hyphen_values = true)]
    vmax: Option<f64>,
}

#[derive(ClapArgs, Debug)]
struct ViewArgs {
    /// Azimuth in degrees
    #[arg(long, allow_hyphen_values = true)]
    azimuth: Option<f64>,

    /// Elevation in degrees
    #[arg(long, allow_hyphen_values = true)]
    elevation: Option<f64>,

    #[arg(long)]
    zoom: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame
    Render {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Output PNG
        #[arg(long, default_value = "surface.png")]
        out: PathBuf,

        /// Also write the colorbar to this PNG
        #[arg(long)]
        colorbar: Option<PathBuf>,

        /// Print frame stats as JSON
        #[arg(long)]
        stats: bool,
    },

    /// Render an autorotation sequence
    Spin {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Number of frames
        #[arg(long, default_value = "60")]
        frames: usize,

        /// Frames per second of the virtual clock
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Rotation speed (degrees per frame is half of this)
        #[arg(long)]
        rotation_speed: Option<f64>,

        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,
    },

    /// Scatter grid samples through a map projection
    Project {
        #[command(flatten)]
        source: SourceArgs,

        /// mollweide, natural_earth, robinson, plate_carree, or sphere
        #[arg(long, default_value = "natural_earth")]
        projection: String,

        /// Globe rotation in degrees (sphere only)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        rotation: f64,

        /// Globe tilt in degrees (sphere only)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        tilt: f64,

        /// Marker size in pixels
        #[arg(long, default_value = "3")]
        point_size: f32,

        #[arg(long, default_value = "map.png")]
        out: PathBuf,
    },
}

impl SourceArgs {
    fn overrides(&self, view: Option<&ViewArgs>) -> OptionOverrides {
        OptionOverrides {
            width: self.width,
            height: self.height,
            azimuth: view.and_then(|v| v.azimuth),
            elevation: view.and_then(|v| v.elevation),
            zoom: view.and_then(|v| v.zoom),
            palette: self.palette.clone(),
            vmin: self.vmin,
            vmax: self.vmax,
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_format);

    match args.command {
        Command::Render {
            source,
            view,
            out,
            colorbar,
            stats,
        } => {
            let mut options = load_options(source.config.as_deref())?;
            source.overrides(Some(&view)).apply(&mut options);
            let grid = load_grid(source.grid.as_deref(), &source.preset)?;
            info!(out = %out.display(), "Rendering surface");
            commands::render(grid, options, &out, colorbar.as_deref(), stats)?;
        }
        Command::Spin {
            source,
            view,
            frames,
            fps,
            rotation_speed,
            out_dir,
        } => {
            let mut options = load_options(source.config.as_deref())?;
            source.overrides(Some(&view)).apply(&mut options);
            if let Some(speed) = rotation_speed {
                options.rotation_speed = speed;
            }
            let grid = load_grid(source.grid.as_deref(), &source.preset)?;
            info!(frames, fps, out_dir = %out_dir.display(), "Rendering spin sequence");
            commands::spin(grid, options, frames, fps, &out_dir)?;
        }
        Command::Project {
            source,
            projection,
            rotation,
            tilt,
            point_size,
            out,
        } => {
            let mut options = load_options(source.config.as_deref())?;
            source.overrides(None).apply(&mut options);
            options.validate()?;
            let grid = load_grid(source.grid.as_deref(), &source.preset)?;
            let target = ProjectionTarget::from_name(&projection, rotation, tilt);
            let painted = commands::project(&grid, &options, target, point_size, &out)?;
            info!(points = painted, out = %out.display(), "Projection written");
        }
    }

    Ok(())
}
