//! Render task
//!
//! Runs one frame per tick: advance the counter, resolve the color, sample
//! the client count, redraw what changed.

use defmt::*;
use embassy_time::{Duration, Ticker};
use patro_core::{FrameScheduler, Palette};

use crate::display::Surface;
use crate::shared::{PeerCounter, ARBITER};

/// Frames between periodic trace reports
const REPORT_EVERY: u64 = 500;

/// Render task - owns the panel for the lifetime of the firmware
#[embassy_executor::task]
pub async fn render_task(mut surface: Surface, frame_interval_ms: u32, palette: Palette) -> ! {
    info!("Render task started ({} ms frames)", frame_interval_ms);

    let mut scheduler = FrameScheduler::new(&ARBITER, PeerCounter, palette);
    scheduler.draw_static_ui(&mut surface);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(frame_interval_ms)));
    let mut mode = ARBITER.mode();
    let mut failed_draws = 0;

    loop {
        let report = scheduler.run_once(&mut surface);

        if report.counter % REPORT_EVERY == 0 {
            trace!("Frame {}: {}", report.counter, report);
        }

        let current = ARBITER.mode();
        if current != mode {
            info!("Mode changed to {}", current);
            mode = current;
        }

        // Failed draws heal on the next change; just make them visible
        if surface.failed_draws() != failed_draws {
            failed_draws = surface.failed_draws();
            warn!("Display rejected draws ({} total)", failed_draws);
        }

        ticker.next().await;
    }
}
