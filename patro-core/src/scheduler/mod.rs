//! Frame scheduler
//!
//! Runs the per-tick update and render sequence. Cadence is owned by the
//! caller (the firmware drives it from a ticker).

pub mod frame;

pub use frame::FrameScheduler;
