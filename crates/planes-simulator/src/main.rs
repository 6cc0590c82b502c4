//! Planes Simulator CLI
//!
//! Runs the autopilot simulation with the headless render collaborator.

use anyhow::{Context, Result};
use clap::Parser;
use planes_domain::WorldSnapshot;
use planes_simulator::driver::snapshot_channel;
use planes_simulator::{
    DriverSettings, RenderSettings, SimConfig, SimRng, SpriteAsset, ViewHandle, World,
    run_driver, run_render_loop,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "planes-simulator")]
#[command(about = "Simulate a flight of autopiloted planes over a scrolling view")]
struct Args {
    /// Number of planes
    #[arg(short, long)]
    planes: Option<u32>,

    /// Simulation tick interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Render frame interval in milliseconds
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Stop after this many frames (0 runs until Ctrl-C)
    #[arg(short, long)]
    frames: Option<u64>,

    /// Frames between per-plane reports
    #[arg(long)]
    report_every: Option<u64>,

    /// Plane sprite image
    #[arg(long)]
    sprite: Option<PathBuf>,

    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final snapshot as JSON on exit
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(self, mut config: SimConfig) -> SimConfig {
        if let Some(planes) = self.planes {
            config.plane_count = planes;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = self.frame_ms {
            config.frame_interval = Duration::from_millis(ms);
        }
        if let Some(frames) = self.frames {
            config.max_frames = frames;
        }
        if let Some(every) = self.report_every {
            config.report_every = every;
        }
        if let Some(sprite) = self.sprite {
            config.sprite_path = sprite;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("planes_simulator=info"))?;

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the signal cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env locally; safe to ignore when not present.
    dotenvy::dotenv().ok();
    init_tracing()?;

    let args = Args::parse();
    let print_json = args.json;
    let config = args.apply(SimConfig::from_env());
    config.validate().context("invalid configuration")?;

    let sprite = SpriteAsset::load(&config.sprite_path).inspect_err(|e| {
        error!(error = %e, "required sprite asset unavailable");
    })?;
    info!(
        path = %sprite.path.display(),
        width = sprite.width,
        height = sprite.height,
        "sprite loaded"
    );

    let rng = config.seed.map_or_else(SimRng::from_clock, SimRng::seeded);
    info!(
        planes = config.plane_count,
        view_width = config.viewport.width,
        view_height = config.viewport.height,
        seed = rng.seed(),
        "starting simulation"
    );

    let view = ViewHandle::new();
    let (snapshot_tx, snapshot_rx) = snapshot_channel(WorldSnapshot::empty(config.viewport));
    let world = World::new(&config, rng);

    let driver = tokio::spawn(run_driver(
        world,
        view.clone(),
        snapshot_tx,
        DriverSettings {
            tick_interval: config.tick_interval,
            publish_interval: config.frame_interval,
        },
    ));

    let summary = run_render_loop(
        view,
        snapshot_rx,
        RenderSettings {
            frame_interval: config.frame_interval,
            max_frames: config.max_frames,
            report_every: config.report_every,
        },
        interrupted(),
    )
    .await;

    let world = driver.await.context("simulation driver task failed")?;
    info!(
        ticks = world.tick(),
        frames = summary.frames,
        stale_frames = summary.stale_frames,
        "simulation finished"
    );

    if print_json {
        let snapshot = world.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}
