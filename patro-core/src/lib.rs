//! Board-agnostic core logic for the PatroMonitor status display
//!
//! This crate contains everything that does not depend on a specific board,
//! display controller or radio:
//!
//! - Animated color source and RGB565 packing
//! - Automatic/manual mode arbitration shared between tasks
//! - Differential renderer and the on-screen state it tracks
//! - Frame scheduler tying the pieces together once per tick
//! - Captive-portal request handling and client tracking
//! - Collaborator traits (draw surface, station count)
//! - Compiled-in configuration types

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod arbiter;
pub mod color;
pub mod config;
pub mod portal;
pub mod render;
pub mod scheduler;
pub mod traits;

pub use arbiter::{Mode, ModeArbiter};
pub use color::{pack565, ColorSample, ColorSource, Rgb565};
pub use config::{ConfigError, DeviceConfig, Palette, Rotation};
pub use render::{DiffRenderer, DisplayState, Field, FrameReport};
pub use scheduler::FrameScheduler;
pub use traits::{DrawSurface, StationCounter};
