//! attractool CLI - open an attractor window or render frames headlessly

use std::path::PathBuf;
use std::process::ExitCode;

use attractool::{ColorScheme, FieldRegistry, Settings, Simulation};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "attractool")]
#[command(about = "Particle swarms flowing through chaotic attractors", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON settings file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vector field identifier (see --list-fields)
    #[arg(long)]
    field: Option<String>,

    /// Number of particles
    #[arg(long)]
    particles: Option<usize>,

    /// Simulated-time multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Color scheme (rainbow, fire, cool, neon, pastel, grayscale, cyberpunk)
    #[arg(long)]
    scheme: Option<String>,

    /// Background color as #RRGGBB
    #[arg(long)]
    background: Option<String>,

    /// Draw particle trails
    #[arg(long)]
    trails: bool,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Render this many frames without a window, then exit
    #[arg(long, value_name = "N")]
    headless_frames: Option<u64>,

    /// Print the available fields and exit
    #[arg(long)]
    list_fields: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings, Box<dyn std::error::Error>> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(field) = &self.field {
            settings.field = field.clone();
        }
        if let Some(count) = self.particles {
            settings.particle_count = count;
        }
        if let Some(speed) = self.speed {
            settings.speed = speed;
        }
        if let Some(scheme) = &self.scheme {
            settings.color_scheme = ColorScheme::from_name(scheme);
        }
        if let Some(background) = &self.background {
            settings.background = background.clone();
        }
        if self.trails {
            settings.trails = true;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        Ok(settings)
    }
}

fn list_fields() {
    for field in FieldRegistry::list_fields() {
        let schema = field.schema();
        let params: Vec<String> = schema
            .params
            .iter()
            .map(|p| format!("{}={}", p.name, p.default))
            .collect();
        println!("{:<10} {:<10} {}D  {}", schema.id, schema.name, schema.dimension.axes(), params.join(" "));
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.list_fields {
        list_fields();
        return Ok(());
    }

    let simulation = Simulation::new().with_settings(cli.settings()?);
    match cli.headless_frames {
        Some(frames) => {
            let canvas = simulation.run_headless(frames)?;
            let corner = canvas.pixels().first().copied();
            let lit = canvas
                .pixels()
                .iter()
                .filter(|c| Some(**c) != corner)
                .count();
            println!(
                "rendered {frames} frames at {}x{} ({lit} pixels differ from the corner)",
                canvas.width(),
                canvas.height()
            );
        }
        None => simulation.run()?,
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
