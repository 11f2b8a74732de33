//! Headless fixed-step host for a race session.
//!
//! - `kreen-headless run --track ring.krtk --ticks 600 --throttle`
//! - `kreen-headless demo-track --out ring.krtk`

mod report;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use shared::{
    CarRig, CarSpec, DriveInput, RaceSession, SimSettings, TrackBundle, TrackInfo,
    track::demo,
};
use tracing::info;

use crate::report::LogObserver;

#[derive(Parser)]
#[command(name = "kreen-headless")]
#[command(about = "Run a race session without rendering", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Steer {
    Left,
    Right,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a car around a track bundle with scripted input
    Run {
        /// Track bundle to load
        #[arg(long)]
        track: PathBuf,

        /// Track preset for the start position and finish segment (defaults to the demo ring)
        #[arg(long)]
        info: Option<String>,

        /// Car preset
        #[arg(long, default_value = "muscle")]
        car: String,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u32,

        /// Tick length in milliseconds
        #[arg(long, default_value_t = shared::DEFAULT_TICK.as_millis() as u64)]
        tick_ms: u64,

        /// Hold the throttle for the whole run
        #[arg(long)]
        throttle: bool,

        /// Hold a steering direction for the whole run
        #[arg(long, value_enum)]
        steer: Option<Steer>,

        /// JSON file overriding collision and drive settings
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Write the built-in demo ring as a track bundle
    DemoTrack {
        /// Output path
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            track,
            info,
            car,
            ticks,
            tick_ms,
            throttle,
            steer,
            settings,
        } => {
            let input = DriveInput {
                steer_left: matches!(steer, Some(Steer::Left)),
                steer_right: matches!(steer, Some(Steer::Right)),
                accelerate: throttle,
                brake: false,
            };
            run(RunArgs {
                track,
                info,
                car,
                ticks,
                tick: Duration::from_millis(tick_ms),
                input,
                settings,
            })
        }
        Commands::DemoTrack { out } => {
            demo::demo_ring()
                .save(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!("wrote demo ring to {}", out.display());
            Ok(())
        }
    }
}

struct RunArgs {
    track: PathBuf,
    info: Option<String>,
    car: String,
    ticks: u32,
    tick: Duration,
    input: DriveInput,
    settings: Option<PathBuf>,
}

fn load_settings(path: Option<&PathBuf>) -> Result<SimSettings> {
    let Some(path) = path else {
        return Ok(SimSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid settings {}", path.display()))
}

fn run(args: RunArgs) -> Result<()> {
    let settings = load_settings(args.settings.as_ref())?;

    let Some(car) = CarSpec::preset(&args.car) else {
        bail!("unknown car preset `{}`", args.car);
    };
    let info = match args.info.as_deref() {
        None => demo::demo_info(),
        Some(name) => match TrackInfo::preset(name) {
            Some(info) => info,
            None => bail!("unknown track preset `{name}`"),
        },
    };

    let track = TrackBundle::load(&args.track)
        .and_then(TrackBundle::into_track)
        .with_context(|| format!("failed to load track {}", args.track.display()))?;

    let mut session = RaceSession::new(Arc::new(track), info, car, CarRig::default(), settings)
        .context("track and track info do not match")?;

    let mut observer = LogObserver::default();
    let mut ran = 0;
    for _ in 0..args.ticks {
        let phase = session.tick_observed(args.tick, args.input, &mut observer);
        ran += 1;
        if phase.is_finished() {
            break;
        }
    }

    observer.summary(&session, ran);
    Ok(())
}
