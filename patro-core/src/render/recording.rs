//! Draw surface that records calls instead of drawing
//!
//! Used by host tests and for dry runs of the renderer without hardware.

use heapless::{String, Vec};

use super::layout::Rect;
use crate::color::Rgb565;
use crate::traits::DrawSurface;

/// Longest text a recorded `print` keeps
pub const MAX_RECORDED_TEXT: usize = 24;

/// Glyph cell of the classic 5x7 font at text size 1
pub const BASE_GLYPH_WIDTH: u16 = 6;
pub const BASE_GLYPH_HEIGHT: u16 = 8;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawOp {
    SetCursor { x: u16, y: u16 },
    SetTextColor(Rgb565),
    SetTextSize(u8),
    Print(String<MAX_RECORDED_TEXT>),
    FillRect { rect: Rect, color: Rgb565 },
    DrawRect { rect: Rect, color: Rgb565 },
    FillScreen(Rgb565),
}

/// Records up to `N` draw calls
#[derive(Debug, Clone)]
pub struct RecordingSurface<const N: usize> {
    ops: Vec<DrawOp, N>,
    text_size: u8,
    overflowed: bool,
}

impl<const N: usize> Default for RecordingSurface<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RecordingSurface<N> {
    pub const fn new() -> Self {
        Self {
            ops: Vec::new(),
            text_size: 1,
            overflowed: false,
        }
    }

    /// Recorded calls in order
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls, keeping the text size
    pub fn clear(&mut self) {
        self.ops.clear();
        self.overflowed = false;
    }

    /// Whether calls were dropped because the buffer was full
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Texts passed to `print`, in order
    pub fn printed(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Print(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of `print` calls
    pub fn print_count(&self) -> usize {
        self.printed().count()
    }

    /// Rectangles filled, in order
    pub fn fills(&self) -> impl Iterator<Item = (Rect, Rgb565)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }

    fn push(&mut self, op: DrawOp) {
        if self.ops.push(op).is_err() {
            self.overflowed = true;
        }
    }
}

impl<const N: usize> DrawSurface for RecordingSurface<N> {
    fn set_cursor(&mut self, x: u16, y: u16) {
        self.push(DrawOp::SetCursor { x, y });
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.push(DrawOp::SetTextColor(color));
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
        self.push(DrawOp::SetTextSize(size));
    }

    fn print(&mut self, text: &str) {
        let mut recorded = String::new();
        for ch in text.chars() {
            if recorded.push(ch).is_err() {
                break;
            }
        }
        self.push(DrawOp::Print(recorded));
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb565) {
        self.push(DrawOp::FillRect {
            rect: Rect::new(x, y, width, height),
            color,
        });
    }

    fn draw_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb565) {
        self.push(DrawOp::DrawRect {
            rect: Rect::new(x, y, width, height),
            color,
        });
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.push(DrawOp::FillScreen(color));
    }

    fn glyph_size(&self) -> (u16, u16) {
        let size = u16::from(self.text_size);
        (BASE_GLYPH_WIDTH * size, BASE_GLYPH_HEIGHT * size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::<8>::new();
        surface.set_cursor(1, 2);
        surface.print("hi");
        surface.fill_screen(Rgb565::BLACK);

        assert_eq!(surface.ops().len(), 3);
        assert_eq!(surface.ops()[0], DrawOp::SetCursor { x: 1, y: 2 });
        assert_eq!(surface.printed().next(), Some("hi"));
        assert_eq!(surface.ops()[2], DrawOp::FillScreen(Rgb565::BLACK));
    }

    #[test]
    fn test_glyph_size_scales() {
        let mut surface = RecordingSurface::<4>::new();
        assert_eq!(surface.glyph_size(), (6, 8));
        surface.set_text_size(2);
        assert_eq!(surface.glyph_size(), (12, 16));
    }

    #[test]
    fn test_overflow_is_flagged() {
        let mut surface = RecordingSurface::<2>::new();
        surface.fill_screen(Rgb565::BLACK);
        surface.fill_screen(Rgb565::BLACK);
        assert!(!surface.overflowed());
        surface.fill_screen(Rgb565::BLACK);
        assert!(surface.overflowed());

        surface.clear();
        assert!(surface.ops().is_empty());
        assert!(!surface.overflowed());
    }
}
