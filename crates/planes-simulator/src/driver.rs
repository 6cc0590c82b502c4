//! Simulation driver: the fixed-interval tick loop.
//!
//! The driver owns the [`World`] outright. Readers never touch live entity
//! state; the driver publishes an immutable [`WorldSnapshot`] through a watch
//! channel and readers take the latest one. Publishing is throttled to the
//! reader's cadence, so most ticks build no snapshot at all.

use crate::rng::Dice;
use crate::world::World;
use planes_domain::WorldSnapshot;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

/// Ticks between driver progress logs.
const PROGRESS_EVERY: u64 = 1000;

/// Shared "window open" flag. The render side closes it; the driver polls it
/// once per tick.
#[derive(Debug)]
pub struct ViewHandle {
    open: AtomicBool,
}

impl ViewHandle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            open: AtomicBool::new(true),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }
}

/// Tick and publish cadence.
#[derive(Debug, Clone, Copy)]
pub struct DriverSettings {
    pub tick_interval: Duration,
    /// Minimum time between published snapshots; zero publishes every tick.
    pub publish_interval: Duration,
}

/// Channel carrying the latest published world state.
pub fn snapshot_channel(
    initial: WorldSnapshot,
) -> (
    watch::Sender<Arc<WorldSnapshot>>,
    watch::Receiver<Arc<WorldSnapshot>>,
) {
    watch::channel(Arc::new(initial))
}

/// Tick the world until the view closes, then hand it back.
///
/// A tick in progress always completes; the closed flag is only checked
/// between ticks. The last published snapshot always matches the returned
/// world.
pub async fn run_driver<D: Dice>(
    mut world: World<D>,
    view: Arc<ViewHandle>,
    snapshots: watch::Sender<Arc<WorldSnapshot>>,
    settings: DriverSettings,
) -> World<D> {
    info!(
        planes = world.planes().len(),
        tick_ms = settings.tick_interval.as_millis(),
        publish_ms = settings.publish_interval.as_millis(),
        "driver started"
    );

    let mut last_publish: Option<Instant> = None;
    while view.is_open() {
        world.step();

        if last_publish.is_none_or(|at| at.elapsed() >= settings.publish_interval) {
            snapshots.send_replace(Arc::new(world.snapshot()));
            last_publish = Some(Instant::now());
        }

        if world.tick() % PROGRESS_EVERY == 0 {
            debug!(
                tick = world.tick(),
                view_x = world.viewpoint().center.x,
                "driver progress"
            );
        }

        sleep(settings.tick_interval).await;
    }

    let published = snapshots.borrow().tick;
    if published != world.tick() {
        snapshots.send_replace(Arc::new(world.snapshot()));
    }

    info!(ticks = world.tick(), "driver stopped");
    world
}
