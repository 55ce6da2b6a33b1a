//! Automatic/manual color arbitration
//!
//! The render task asks the arbiter every frame which color is
//! authoritative. The request task writes overrides into it. The two never
//! take a lock: each channel is its own byte-sized atomic, so a reader may
//! see a half-applied override (new red, old green) for one frame. That
//! skew is bounded to a single frame and is accepted.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::color::ColorSample;

/// Which source drives the displayed color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Color follows the periodic color source
    Automatic,
    /// Color is pinned to the last override until restart
    Manual,
}

/// Shared arbitration state
///
/// `Automatic --apply_override--> Manual` is the only transition. There is
/// no way back to automatic short of a restart.
#[derive(Debug)]
pub struct ModeArbiter {
    manual: AtomicBool,
    red: AtomicU8,
    green: AtomicU8,
    blue: AtomicU8,
}

impl Default for ModeArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeArbiter {
    /// Create an arbiter in automatic mode
    pub const fn new() -> Self {
        Self {
            manual: AtomicBool::new(false),
            red: AtomicU8::new(0),
            green: AtomicU8::new(0),
            blue: AtomicU8::new(0),
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        if self.manual.load(Ordering::Acquire) {
            Mode::Manual
        } else {
            Mode::Automatic
        }
    }

    /// Last override written, whether or not manual mode is active
    pub fn override_value(&self) -> ColorSample {
        ColorSample {
            red: self.red.load(Ordering::Relaxed),
            green: self.green.load(Ordering::Relaxed),
            blue: self.blue.load(Ordering::Relaxed),
        }
    }

    /// Pin the color and switch to manual mode
    ///
    /// Safe to call from another task while `resolve` runs.
    pub fn apply_override(&self, red: u8, green: u8, blue: u8) {
        self.red.store(red, Ordering::Relaxed);
        self.green.store(green, Ordering::Relaxed);
        self.blue.store(blue, Ordering::Relaxed);
        // Publish after the channels so the first override is never seen
        // half-written.
        self.manual.store(true, Ordering::Release);
    }

    /// Pick the authoritative color for this frame
    pub fn resolve(&self, auto: ColorSample) -> ColorSample {
        match self.mode() {
            Mode::Automatic => auto,
            Mode::Manual => self.override_value(),
        }
    }
}
