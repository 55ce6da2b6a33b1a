//! One frame of the update and render sequence

use crate::arbiter::ModeArbiter;
use crate::color::ColorSource;
use crate::config::Palette;
use crate::render::{DiffRenderer, FrameReport};
use crate::traits::{DrawSurface, StationCounter};

/// Drives the display one frame at a time
///
/// Owns the step counter and the renderer. The arbiter is shared with the
/// request-handling side; the station counter is only read.
pub struct FrameScheduler<'a, S: StationCounter> {
    step: u64,
    source: ColorSource,
    arbiter: &'a ModeArbiter,
    stations: S,
    renderer: DiffRenderer,
}

impl<'a, S: StationCounter> FrameScheduler<'a, S> {
    pub fn new(arbiter: &'a ModeArbiter, stations: S, palette: Palette) -> Self {
        Self {
            step: 0,
            source: ColorSource::new(),
            arbiter,
            stations,
            renderer: DiffRenderer::new(palette),
        }
    }

    /// Frames run so far
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn renderer(&self) -> &DiffRenderer {
        &self.renderer
    }

    /// Draw the static parts of the screen, forcing a full redraw next frame
    pub fn draw_static_ui<D: DrawSurface>(&mut self, surface: &mut D) {
        self.renderer.draw_static_ui(surface);
    }

    /// Run one frame
    ///
    /// The step advances before sampling, so the first frame shows 1.
    pub fn run_once<D: DrawSurface>(&mut self, surface: &mut D) -> FrameReport {
        self.step = self.step.wrapping_add(1);

        let auto = self.source.sample(self.step);
        let color = self.arbiter.resolve(auto);
        let clients = self.stations.station_count();

        self.renderer.render_frame(
            surface,
            self.step,
            color.red,
            color.green,
            color.blue,
            clients,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::Mode;
    use crate::color::ColorSample;
    use crate::render::{Field, RecordingSurface};
    use core::cell::Cell;

    type Surface = RecordingSurface<64>;

    #[test]
    fn test_first_frame_shows_one() {
        let arbiter = ModeArbiter::new();
        let mut scheduler = FrameScheduler::new(&arbiter, || 0u32, Palette::DEFAULT);
        let mut surface = Surface::new();

        let report = scheduler.run_once(&mut surface);

        assert_eq!(scheduler.step(), 1);
        assert_eq!(report.counter, 1);
        assert_eq!(report.color, ColorSource::new().sample(1));
        assert_eq!(report.redrawn_count(), 5);
        assert_eq!(surface.printed().next(), Some("1"));
    }

    #[test]
    fn test_counter_redrawn_every_frame() {
        let arbiter = ModeArbiter::new();
        let mut scheduler = FrameScheduler::new(&arbiter, || 2u32, Palette::DEFAULT);
        let mut surface = Surface::new();

        scheduler.run_once(&mut surface);
        for expected in 2..10u64 {
            surface.clear();
            let report = scheduler.run_once(&mut surface);
            assert_eq!(report.counter, expected);
            assert!(report.redrawn(Field::Counter));
            assert!(!report.redrawn(Field::Clients));
        }
        assert_eq!(scheduler.renderer().state().counter(), Some(9));
    }

    #[test]
    fn test_override_takes_effect_next_frame() {
        let arbiter = ModeArbiter::new();
        let mut scheduler = FrameScheduler::new(&arbiter, || 0u32, Palette::DEFAULT);
        let mut surface = Surface::new();

        for _ in 0..100 {
            surface.clear();
            scheduler.run_once(&mut surface);
        }
        assert_eq!(scheduler.step(), 100);
        assert_eq!(
            scheduler.renderer().state().red(),
            Some(ColorSource::new().sample(100).red)
        );

        arbiter.apply_override(200, 100, 50);
        surface.clear();
        let report = scheduler.run_once(&mut surface);

        assert_eq!(report.counter, 101);
        assert_eq!(report.color, ColorSample::new(200, 100, 50));
        assert_eq!(arbiter.mode(), Mode::Manual);

        // Pinned from now on
        surface.clear();
        let report = scheduler.run_once(&mut surface);
        assert_eq!(report.color, ColorSample::new(200, 100, 50));
        assert!(!report.redrawn(Field::Red));
        assert!(!report.redrawn(Field::Green));
        assert!(!report.redrawn(Field::Blue));
    }

    #[test]
    fn test_station_count_sampled_each_frame() {
        let arbiter = ModeArbiter::new();
        let count = Cell::new(0u32);
        let mut scheduler = FrameScheduler::new(&arbiter, || count.get(), Palette::DEFAULT);
        let mut surface = Surface::new();

        assert_eq!(scheduler.run_once(&mut surface).clients, 0);
        count.set(3);
        surface.clear();
        let report = scheduler.run_once(&mut surface);
        assert_eq!(report.clients, 3);
        assert!(report.redrawn(Field::Clients));
        assert!(surface.printed().any(|text| text == "3"));
    }

    #[test]
    fn test_static_ui_forces_full_redraw() {
        let arbiter = ModeArbiter::new();
        arbiter.apply_override(1, 2, 3);
        let mut scheduler = FrameScheduler::new(&arbiter, || 1u32, Palette::DEFAULT);
        let mut surface = Surface::new();

        scheduler.run_once(&mut surface);
        scheduler.draw_static_ui(&mut surface);
        surface.clear();

        let report = scheduler.run_once(&mut surface);
        assert_eq!(report.redrawn_count(), 5);
    }
}
