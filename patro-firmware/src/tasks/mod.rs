//! Embassy async tasks
//!
//! The render and portal tasks share state only through `crate::shared`.

pub mod portal;
pub mod radio;
pub mod render;

pub use portal::portal_task;
pub use radio::{cyw43_task, net_task};
pub use render::render_task;
