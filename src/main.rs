use std::{error::Error, fs::File, path::PathBuf};

use ballsim::{SimConfig, Vec2, config, ui};
use clap::Parser;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(about = "Sub-stepped Verlet ball simulation in a circular arena")]
struct Args {
    #[arg(long, default_value_t = config::BODY_COUNT)]
    bodies: usize,
    #[arg(long, default_value_t = config::SEED)]
    seed: u64,
    #[arg(long, default_value_t = config::SUBSTEPS)]
    substeps: u32,
    #[arg(long, default_value_t = config::GRID_WIDTH)]
    grid_width: usize,
    #[arg(long, default_value_t = config::GRID_HEIGHT)]
    grid_height: usize,
    #[arg(long, default_value_t = config::GRAVITY_Y, allow_negative_numbers = true)]
    gravity_y: f32,
    #[arg(long, default_value_t = config::RADIUS_MIN)]
    radius_min: f32,
    #[arg(long, default_value_t = config::RADIUS_MAX)]
    radius_max: f32,
    /// Run this many ticks without a terminal UI and log a summary.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
    /// Write log output to a file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        let defaults = SimConfig::default();
        SimConfig {
            body_count: self.bodies,
            seed: self.seed,
            substeps: self.substeps,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            gravity: Vec2::new(defaults.gravity.x, self.gravity_y),
            radius_min: self.radius_min,
            radius_max: self.radius_max,
            ..defaults
        }
    }
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    let default_filter = if args.headless.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.sim_config();
    if let Err(err) = config.validate() {
        error!("invalid configuration: {err}");
        return Err(err.into());
    }

    match args.headless {
        Some(ticks) => {
            let stats = ui::run_headless(config, ticks)?;
            info!(
                "finished {} ticks: {} bodies, {} contacts in last tick",
                stats.ticks, stats.body_count, stats.contacts
            );
            Ok(())
        }
        None => ui::run(config),
    }
}
