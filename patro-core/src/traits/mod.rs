//! Collaborator traits
//!
//! These traits define the narrow interface between the core and the
//! board-specific display and network plumbing.

pub mod display;
pub mod station;

pub use display::DrawSurface;
pub use station::StationCounter;
