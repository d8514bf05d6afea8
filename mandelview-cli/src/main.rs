//! Mandelview: render one Mandelbrot view headlessly and save it as PNG.

mod error;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info};

use mandelview_core::{ColorScheme, Complex};
use mandelview_render::{
    export_png, timestamped_filename, ExportMetadata, MandelbrotEngine, ZOOM_ANIMATION_FRAMES,
};

use error::CliError;
use settings::Settings;

const DEFAULT_CENTER: &str = "0.013438870532012129,0.655614218769465062";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemeArg {
    Polynomial,
    Scheme1,
    Scheme2,
    Scheme3,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Polynomial => ColorScheme::Polynomial,
            SchemeArg::Scheme1 => ColorScheme::Scheme1,
            SchemeArg::Scheme2 => ColorScheme::Scheme2,
            SchemeArg::Scheme3 => ColorScheme::Scheme3,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mandelview")]
#[command(about = "Render a Mandelbrot view and save it as PNG")]
struct Args {
    /// Iteration cap
    #[arg(long)]
    iterations: Option<u32>,

    /// Scale applied to the canonical region around --center
    #[arg(long, default_value_t = 1.0)]
    zoom_factor: f64,

    /// Grid side length in pixels
    #[arg(long)]
    resolution: Option<u32>,

    /// Zoom center as RE,IM
    #[arg(long, default_value = DEFAULT_CENTER, allow_hyphen_values = true)]
    center: Complex,

    #[arg(long, value_enum)]
    scheme: Option<SchemeArg>,

    #[arg(long)]
    color_multiple: Option<u32>,

    /// Worker threads (default: one per hardware thread)
    #[arg(long)]
    workers: Option<usize>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render the canonical view first, then zoom into the target while
    /// stepping through the zoom animation frames
    #[arg(long)]
    animate: bool,

    /// Write the effective settings back to --config
    #[arg(long, requires = "config")]
    save_config: bool,

    /// Output PNG path (default: timestamped name in the settings' output dir)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(n) = self.iterations {
            settings.render.max_iterations = n;
        }
        if let Some(res) = self.resolution {
            settings.resolution = res;
        }
        if let Some(scheme) = self.scheme {
            settings.render.scheme = scheme.into();
        }
        if let Some(m) = self.color_multiple {
            settings.render.color_multiple = m;
        }
        if self.workers.is_some() {
            settings.workers = self.workers;
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(path) => {
            info!("Saved {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<PathBuf, CliError> {
    if !(args.zoom_factor.is_finite() && args.zoom_factor > 0.0) {
        return Err(CliError::InvalidZoomFactor(args.zoom_factor));
    }

    let mut settings = args
        .config
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    args.apply(&mut settings);
    let render = settings.render.validated()?;

    if args.save_config {
        if let Some(path) = &args.config {
            settings.save(path)?;
        }
    }

    let mut engine = match settings.workers {
        Some(workers) => MandelbrotEngine::with_workers(settings.resolution, render, workers)?,
        None => MandelbrotEngine::new(settings.resolution, render)?,
    };
    info!(
        resolution = settings.resolution,
        workers = engine.workers(),
        max_iter = render.max_iterations,
        scheme = %render.scheme,
        "Starting render"
    );

    engine.reset();
    engine.set_max_iterations(render.max_iterations)?;
    engine.set_color_multiple(render.color_multiple)?;
    let stats = if args.animate {
        engine.generate();
        engine.zoom_animated(
            args.center,
            args.zoom_factor,
            ZOOM_ANIMATION_FRAMES,
            |frame, _| {
                debug!(
                    index = frame.index,
                    x = frame.center.0,
                    y = frame.center.1,
                    zoom = frame.zoom,
                    "Zoom frame"
                );
            },
        )
    } else {
        engine.zoom_relative(args.center, args.zoom_factor);
        engine.generate()
    };
    info!(
        elapsed_ms = stats.elapsed.as_millis(),
        escaped = stats.escaped,
        interior = stats.interior,
        "Render finished"
    );

    let path = args.output.clone().unwrap_or_else(|| {
        settings
            .output_dir
            .join(timestamped_filename(Local::now().naive_local()))
    });
    export_png(engine.grid(), &path, &ExportMetadata::from_engine(&engine))?;
    Ok(path)
}
