//! Headless render collaborator.
//!
//! Stands in for a window: it wakes on its own frame cadence, reads whatever
//! snapshot the driver published last, and reports it through tracing. It
//! also owns shutdown, closing the shared view when told to stop.

use crate::driver::ViewHandle;
use planes_domain::{WorldSnapshot, palette};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Frame cadence and reporting knobs.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub frame_interval: Duration,
    /// Stop after this many frames; 0 means never.
    pub max_frames: u64,
    pub report_every: u64,
}

/// What the render loop saw before it closed the view.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub frames: u64,
    /// Frames that found no new tick since the previous frame.
    pub stale_frames: u64,
    pub last: Arc<WorldSnapshot>,
}

/// Draw frames until `shutdown` resolves or the frame budget is spent, then
/// close the view.
pub async fn run_render_loop(
    view: Arc<ViewHandle>,
    mut snapshots: watch::Receiver<Arc<WorldSnapshot>>,
    settings: RenderSettings,
    shutdown: impl Future<Output = ()>,
) -> RenderSummary {
    let mut frames: u64 = 0;
    let mut stale_frames: u64 = 0;
    let mut last = snapshots.borrow_and_update().clone();

    let mut ticker = interval(settings.frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!(frames, "shutdown requested");
                break;
            }
            _ = ticker.tick() => {}
        }

        let snapshot = snapshots.borrow_and_update().clone();
        if frames > 0 && snapshot.tick == last.tick {
            stale_frames += 1;
        }
        frames += 1;

        draw_frame(&snapshot, frames);
        if frames % settings.report_every.max(1) == 0 {
            report_planes(&snapshot);
        }
        last = snapshot;

        if settings.max_frames != 0 && frames >= settings.max_frames {
            info!(frames, "frame budget reached");
            break;
        }
    }

    view.close();
    RenderSummary {
        frames,
        stale_frames,
        last,
    }
}

fn draw_frame(snapshot: &WorldSnapshot, frame: u64) {
    debug!(
        frame,
        tick = snapshot.tick,
        view_x = snapshot.view_center.x,
        visible = snapshot.visible_planes().count(),
        planes = snapshot.planes.len(),
        "frame"
    );
}

fn report_planes(snapshot: &WorldSnapshot) {
    info!(
        tick = snapshot.tick,
        view_x = snapshot.view_center.x,
        visible = snapshot.visible_planes().count(),
        background = %palette::BACKGROUND.to_hex(),
        "flight report"
    );
    for plane in &snapshot.planes {
        info!(
            callsign = %plane.callsign,
            color = %plane.color.to_hex(),
            x = plane.position.x,
            y = plane.position.y,
            heading = plane.heading_deg,
            speed = plane.speed,
            trail = plane.trail.len(),
            to_target = plane.position.distance_to(&snapshot.target),
            "plane"
        );
    }
}
