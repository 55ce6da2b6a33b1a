//! Text size to font mapping

use embedded_graphics::mono_font::{
    ascii::{FONT_10X20, FONT_6X10, FONT_9X15},
    MonoFont,
};

/// Font used for a text size
///
/// Sizes follow the classic 1x/2x/3x scaling of a 5x7 font; each picks the
/// closest built-in mono font. Size 0 is treated as 1.
pub fn font_for_size(size: u8) -> &'static MonoFont<'static> {
    match size {
        0 | 1 => &FONT_6X10,
        2 => &FONT_9X15,
        _ => &FONT_10X20,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::geometry::Size;

    #[test]
    fn test_sizes_grow() {
        assert_eq!(font_for_size(0).character_size, Size::new(6, 10));
        assert_eq!(font_for_size(1).character_size, Size::new(6, 10));
        assert_eq!(font_for_size(2).character_size, Size::new(9, 15));
        assert_eq!(font_for_size(3).character_size, Size::new(10, 20));
        assert_eq!(font_for_size(9).character_size, Size::new(10, 20));
    }
}
