//! Screen layout and differential rendering

pub mod diff;
pub mod layout;
pub mod recording;
pub mod state;

pub use diff::{format_value, DiffRenderer, FrameReport};
pub use layout::{Field, Rect};
pub use recording::{DrawOp, RecordingSurface};
pub use state::DisplayState;
