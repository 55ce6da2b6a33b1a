//! Draw surface trait for the status display
//!
//! Mirrors a cursor-based text API: position the cursor, pick color and
//! size, print. Pixel rasterization is left to the implementation.

use crate::color::Rgb565;

/// Drawing operations the renderer needs
///
/// Calls are infallible from the renderer's point of view. Implementations
/// backed by a bus that can fail are expected to swallow and count errors.
/// Only the render task may own a surface.
pub trait DrawSurface {
    /// Move the text cursor (top-left of the next glyph)
    fn set_cursor(&mut self, x: u16, y: u16);

    /// Foreground color for subsequent `print` calls
    fn set_text_color(&mut self, color: Rgb565);

    /// Text scale factor for subsequent `print` calls (1 = smallest)
    fn set_text_size(&mut self, size: u8);

    /// Draw text at the cursor and advance the cursor past it
    fn print(&mut self, text: &str);

    /// Fill a rectangle
    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb565);

    /// Draw a one pixel rectangle outline inside the given bounds
    fn draw_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb565);

    /// Fill the whole screen
    fn fill_screen(&mut self, color: Rgb565);

    /// Size of one character cell at the current text size
    ///
    /// Returns (advance width, line height) in pixels.
    fn glyph_size(&self) -> (u16, u16);
}

impl<T: DrawSurface + ?Sized> DrawSurface for &mut T {
    fn set_cursor(&mut self, x: u16, y: u16) {
        (**self).set_cursor(x, y)
    }

    fn set_text_color(&mut self, color: Rgb565) {
        (**self).set_text_color(color)
    }

    fn set_text_size(&mut self, size: u8) {
        (**self).set_text_size(size)
    }

    fn print(&mut self, text: &str) {
        (**self).print(text)
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb565) {
        (**self).fill_rect(x, y, width, height, color)
    }

    fn draw_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb565) {
        (**self).draw_rect(x, y, width, height, color)
    }

    fn fill_screen(&mut self, color: Rgb565) {
        (**self).fill_screen(color)
    }

    fn glyph_size(&self) -> (u16, u16) {
        (**self).glyph_size()
    }
}
