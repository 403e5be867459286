//! Disha - command-line front end for the wayfinding engine.
//!
//! # Usage
//!
//! ```bash
//! # Solve a position from three anchor ranges (distances in the configured unit)
//! disha solve --anchor entrance:0:0:5000 --anchor stage:30:0:26000 --anchor bar:0:30:25500
//!
//! # Plan a route across the booth rows
//! disha route --from 7.5,12 --to 21.5,12
//!
//! # Replay a walk with 10cm ranging noise
//! disha walk --from 7.5,12 --to 21.5,12 --noise-std 0.1 --seed 42
//!
//! # Print the effective configuration
//! disha --config site.toml config
//! ```

mod error;
mod noise;

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::{Parser, Subcommand};
use log::{info, warn};

use disha_core::config::DishaConfig;
use disha_core::positioning::{
    AnchorObservation, AnchorSpec, LocationPayload, RangingStatus, SolvedLocation, Uncertainty,
};
use disha_core::{Point2D, TrackingSession};

use crate::error::{CliError, Result};
use crate::noise::RangingNoise;

/// Config file picked up from the working directory when `--config` is absent.
const LOCAL_CONFIG: &str = "disha.toml";

#[derive(Parser, Debug)]
#[command(name = "disha")]
#[command(about = "Indoor wayfinding: anchor positioning, route planning and guidance")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./disha.toml, then configs/disha.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a position from anchor ranges
    Solve {
        /// Anchor observation as name:x:y:distance (repeatable)
        #[arg(short, long = "anchor", value_parser = parse_observation, required = true)]
        anchors: Vec<AnchorObservation>,
    },
    /// Plan a route between two map points
    Route {
        /// Start point as x,y (meters)
        #[arg(long, value_parser = parse_point)]
        from: Point2D,

        /// End point as x,y (meters)
        #[arg(long, value_parser = parse_point)]
        to: Point2D,

        /// Also print waypoints in view points (map.scale per meter)
        #[arg(long)]
        view: bool,
    },
    /// Walk the planned route with simulated ranging and print guidance
    Walk {
        /// Start point as x,y (meters)
        #[arg(long, value_parser = parse_point)]
        from: Point2D,

        /// End point as x,y (meters)
        #[arg(long, value_parser = parse_point)]
        to: Point2D,

        /// Ranging noise standard deviation (meters)
        #[arg(long, default_value_t = 0.0)]
        noise_std: f32,

        /// RNG seed, 0 for a random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Distance between simulated fixes (meters)
        #[arg(long, default_value_t = 0.5)]
        step: f32,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn parse_point(text: &str) -> std::result::Result<Point2D, String> {
    LocationPayload::parse(text)
        .map(|p| p.position())
        .map_err(|e| e.to_string())
}

fn parse_observation(text: &str) -> std::result::Result<AnchorObservation, String> {
    let fields: Vec<&str> = text.split(':').collect();
    let [name, x, y, distance] = fields.as_slice() else {
        return Err(format!("expected name:x:y:distance, got '{}'", text));
    };
    let number = |field: &str| {
        field
            .trim()
            .parse::<f32>()
            .map_err(|_| format!("'{}' is not a number", field))
    };
    Ok(AnchorObservation::new(
        *name,
        Point2D::new(number(*x)?, number(*y)?),
        number(*distance)?,
    ))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Solve { anchors } => solve(&config, &anchors),
        Commands::Route { from, to, view } => route(&config, from, to, view),
        Commands::Walk {
            from,
            to,
            noise_std,
            seed,
            step,
        } => walk(config, from, to, noise_std, seed, step),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DishaConfig> {
    let config = match path {
        Some(path) => {
            info!("Using config: {}", path.display());
            DishaConfig::load(path)?
        }
        None if Path::new(LOCAL_CONFIG).exists() => {
            info!("Using config: {}", LOCAL_CONFIG);
            DishaConfig::load(Path::new(LOCAL_CONFIG))?
        }
        None => DishaConfig::load_default()?,
    };
    Ok(config)
}

fn print_location(location: &SolvedLocation) {
    println!("position: ({:.3}, {:.3}) m", location.x(), location.y());
    println!(
        "anchors: {}, iterations: {}, converged: {}, rms residual: {:.4} m",
        location.anchor_count, location.iterations, location.converged, location.rms_residual
    );
    match &location.uncertainty {
        Uncertainty::Available { std_dev, .. } => {
            println!("std dev: ({:.4}, {:.4}) m", std_dev.x, std_dev.y)
        }
        Uncertainty::Unavailable { reason } => println!("std dev: unavailable ({})", reason),
    }
    println!("payload: {}", LocationPayload::from(location).encode());
}

fn solve(config: &DishaConfig, observations: &[AnchorObservation]) -> Result<()> {
    let location = config.solver().solve(observations)?;
    print_location(&location);
    Ok(())
}

fn route(config: &DishaConfig, from: Point2D, to: Point2D, view: bool) -> Result<()> {
    let path = config.map.route_provider()?.route(from, to);
    println!("{} waypoints, {:.2} m", path.len(), path.length);
    for (i, &p) in path.points.iter().enumerate() {
        if view {
            let v = config.map.to_view(p);
            println!("  {}: ({:.2}, {:.2}) view ({:.0}, {:.0})", i, p.x, p.y, v.x, v.y);
        } else {
            println!("  {}: ({:.2}, {:.2})", i, p.x, p.y);
        }
    }
    Ok(())
}

/// Anchors at the corners of the box around the route, `margin` meters out.
fn synthetic_anchors(points: &[Point2D], margin: f32) -> Vec<AnchorSpec> {
    let start = (
        Point2D::new(f32::INFINITY, f32::INFINITY),
        Point2D::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
    );
    let (min, max) = points.iter().fold(start, |(min, max), p| {
        (
            Point2D::new(min.x.min(p.x), min.y.min(p.y)),
            Point2D::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    vec![
        AnchorSpec::new("sim-nw", min.x - margin, min.y - margin),
        AnchorSpec::new("sim-ne", max.x + margin, min.y - margin),
        AnchorSpec::new("sim-sw", min.x - margin, max.y + margin),
        AnchorSpec::new("sim-se", max.x + margin, max.y + margin),
    ]
}

/// Points every `step` meters along `points`, ending on the last one.
fn sample_route(points: &[Point2D], step: f32) -> Vec<Point2D> {
    let mut samples = Vec::new();
    for segment in points.windows(2) {
        let (a, b) = (segment[0], segment[1]);
        let n = (a.distance(&b) / step).ceil().max(1.0) as usize;
        samples.extend((0..n).map(|i| {
            let t = i as f32 / n as f32;
            a + (b - a) * t
        }));
    }
    samples.extend(points.last().copied());
    samples
}

fn walk(
    mut config: DishaConfig,
    from: Point2D,
    to: Point2D,
    noise_std: f32,
    seed: u64,
    step: f32,
) -> Result<()> {
    if step.is_nan() || step <= 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "step must be positive, got {}",
            step
        )));
    }

    let planned = config.map.route_provider()?.route(from, to);
    if config.positioning.anchors.len() < 2 {
        let coordinate_unit = config.positioning.coordinate_unit;
        warn!("Fewer than two anchors configured, placing four around the route");
        config.positioning.anchors = synthetic_anchors(&planned.points, 2.0)
            .into_iter()
            .map(|a| {
                let x = coordinate_unit.from_meters(a.x as f64) as f32;
                let y = coordinate_unit.from_meters(a.y as f64) as f32;
                AnchorSpec::new(a.name, x, y)
            })
            .collect();
    }

    let positioning = &config.positioning;
    let anchors: Vec<(String, Point2D)> = positioning
        .anchors
        .iter()
        .map(|a| {
            let x = positioning.coordinate_unit.to_meters(a.x as f64) as f32;
            let y = positioning.coordinate_unit.to_meters(a.y as f64) as f32;
            (a.name.clone(), Point2D::new(x, y))
        })
        .collect();
    let distance_unit = positioning.distance_unit;

    let (tx, rx) = mpsc::channel();
    let session = TrackingSession::new(&config)?.with_announcer(tx);
    let path = session.start_navigation(from, to);
    for announcement in rx.try_iter() {
        println!("[start] {}", announcement.text());
    }

    let mut noise = RangingNoise::new(noise_std, seed);
    let mut fixes = 0usize;
    let mut total_error = 0.0f32;

    for (i, truth) in sample_route(&path.points, step).into_iter().enumerate() {
        for (name, position) in &anchors {
            let measured = noise.range(position.distance(&truth));
            let distance = distance_unit.from_meters(measured as f64) as f32;
            session.record_ranging(name, RangingStatus::Success { distance });
        }

        match session.locate() {
            Ok(outcome) => {
                fixes += 1;
                total_error += outcome.location.position.distance(&truth);
                if let Some(announcement) = outcome.announcement {
                    println!(
                        "[{:>3}] ({:.2}, {:.2}) {}",
                        i,
                        outcome.location.x(),
                        outcome.location.y(),
                        announcement.text()
                    );
                }
            }
            Err(e) => warn!("Fix {} failed: {}", i, e),
        }
        // Drain the channel; guidance was already printed from the outcome
        rx.try_iter().for_each(drop);
    }

    let complete = session.is_navigation_complete();
    let remaining = session.remaining_waypoints().len();
    session.end();

    println!(
        "{} fixes, mean error {:.3} m, destination {}",
        fixes,
        if fixes > 0 { total_error / fixes as f32 } else { 0.0 },
        if complete {
            "reached".to_string()
        } else {
            format!("not reached ({} waypoints left)", remaining)
        }
    );
    Ok(())
}
