//! Draw surface adapter for embedded-graphics targets
//!
//! Bridges the renderer's text-cursor drawing model onto any
//! `DrawTarget<Color = Rgb565>`, which covers the ILI9341 driver on the
//! device and `MockDisplay` on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod font;
pub mod surface;

pub use font::font_for_size;
pub use surface::{to_pixel, GfxSurface};
