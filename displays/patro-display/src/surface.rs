//! `DrawSurface` over an embedded-graphics target

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Baseline, Text},
};
use patro_core::traits::DrawSurface;

use crate::font::font_for_size;

/// Convert a core color to an embedded-graphics pixel
pub fn to_pixel(color: patro_core::Rgb565) -> Rgb565 {
    Rgb565::from(RawU16::new(color.raw()))
}

/// Text-cursor drawing on top of a `DrawTarget`
///
/// Transport errors are counted and otherwise ignored; a dropped frame
/// heals itself on the next one.
pub struct GfxSurface<D> {
    target: D,
    cursor: Point,
    text_color: Rgb565,
    text_size: u8,
    failed_draws: u32,
}

impl<D> GfxSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            cursor: Point::zero(),
            text_color: Rgb565::WHITE,
            text_size: 1,
            failed_draws: 0,
        }
    }

    /// Where the next `print` starts
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Draw calls the target rejected so far
    pub fn failed_draws(&self) -> u32 {
        self.failed_draws
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn font(&self) -> &'static MonoFont<'static> {
        font_for_size(self.text_size)
    }

    fn check<T>(&mut self, result: Result<T, D::Error>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(_) => {
                self.failed_draws = self.failed_draws.saturating_add(1);
                None
            }
        }
    }
}

fn rect(x: u16, y: u16, width: u16, height: u16) -> Rectangle {
    Rectangle::new(
        Point::new(i32::from(x), i32::from(y)),
        Size::new(u32::from(width), u32::from(height)),
    )
}

impl<D> DrawSurface for GfxSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Point::new(i32::from(x), i32::from(y));
    }

    fn set_text_color(&mut self, color: patro_core::Rgb565) {
        self.text_color = to_pixel(color);
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn print(&mut self, text: &str) {
        let style = MonoTextStyle::new(self.font(), self.text_color);
        let result =
            Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.target);
        // Single-line text only moves the cursor right
        if let Some(next) = self.check(result) {
            self.cursor.x = next.x;
        }
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: patro_core::Rgb565) {
        let result = self
            .target
            .fill_solid(&rect(x, y, width, height), to_pixel(color));
        self.check(result);
    }

    fn draw_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: patro_core::Rgb565) {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(to_pixel(color))
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        let result = rect(x, y, width, height)
            .into_styled(style)
            .draw(&mut self.target);
        self.check(result);
    }

    fn fill_screen(&mut self, color: patro_core::Rgb565) {
        let result = self.target.clear(to_pixel(color));
        self.check(result);
    }

    fn glyph_size(&self) -> (u16, u16) {
        let font = self.font();
        let width = font.character_size.width + font.character_spacing;
        let height = font.character_size.height;
        (width as u16, height as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    /// Target whose every draw fails
    struct Broken;

    impl OriginDimensions for Broken {
        fn size(&self) -> Size {
            Size::new(320, 240)
        }
    }

    impl DrawTarget for Broken {
        type Color = Rgb565;
        type Error = ();

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Err(())
        }
    }

    fn mock() -> GfxSurface<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        GfxSurface::new(display)
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_pixel(patro_core::Rgb565(0xF800)), Rgb565::RED);
        assert_eq!(to_pixel(patro_core::Rgb565::WHITE), Rgb565::WHITE);
        assert_eq!(to_pixel(patro_core::pack565(0, 255, 0)), Rgb565::GREEN);
    }

    #[test]
    fn test_fill_rect() {
        let mut surface = mock();
        surface.fill_rect(2, 3, 4, 2, patro_core::Rgb565::CYAN);

        let display = surface.into_inner();
        assert_eq!(display.get_pixel(Point::new(2, 3)), Some(Rgb565::CYAN));
        assert_eq!(display.get_pixel(Point::new(5, 4)), Some(Rgb565::CYAN));
        assert_eq!(display.get_pixel(Point::new(6, 4)), None);
        assert_eq!(display.get_pixel(Point::new(2, 5)), None);
    }

    #[test]
    fn test_draw_rect_is_outline() {
        let mut surface = mock();
        surface.draw_rect(0, 0, 5, 4, patro_core::Rgb565::YELLOW);

        let display = surface.into_inner();
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::YELLOW));
        assert_eq!(display.get_pixel(Point::new(4, 3)), Some(Rgb565::YELLOW));
        assert_eq!(display.get_pixel(Point::new(2, 2)), None);
        assert_eq!(display.get_pixel(Point::new(5, 0)), None);
    }

    #[test]
    fn test_print_advances_cursor() {
        let mut surface = mock();
        surface.set_text_size(1);
        surface.set_text_color(patro_core::Rgb565::WHITE);
        surface.set_cursor(1, 2);
        surface.print("ab");

        assert_eq!(surface.cursor(), Point::new(13, 2));
        assert_eq!(surface.failed_draws(), 0);

        let display = surface.into_inner();
        let lit = (0..64)
            .flat_map(|y| (0..64).map(move |x| Point::new(x, y)))
            .filter(|p| display.get_pixel(*p).is_some())
            .inspect(|p| {
                assert!((1..13).contains(&p.x));
                assert!((2..12).contains(&p.y));
            })
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_glyph_size_follows_text_size() {
        let mut surface = mock();
        assert_eq!(surface.glyph_size(), (6, 10));
        surface.set_text_size(2);
        assert_eq!(surface.glyph_size(), (9, 15));
        surface.set_text_size(3);
        assert_eq!(surface.glyph_size(), (10, 20));
        surface.set_text_size(0);
        assert_eq!(surface.glyph_size(), (6, 10));
    }

    #[test]
    fn test_erase_covers_printed_text() {
        let mut surface = mock();
        surface.set_text_size(2);
        surface.set_cursor(0, 0);
        surface.print("88");

        let (w, h) = surface.glyph_size();
        surface.fill_rect(0, 0, 2 * w, h, patro_core::Rgb565::BLACK);

        let display = surface.into_inner();
        for y in 0..i32::from(h) {
            for x in 0..i32::from(2 * w) {
                assert_eq!(display.get_pixel(Point::new(x, y)), Some(Rgb565::BLACK));
            }
        }
    }

    #[test]
    fn test_fill_screen() {
        let mut surface = mock();
        surface.fill_screen(patro_core::Rgb565::BLACK);
        let display = surface.into_inner();
        assert_eq!(display.get_pixel(Point::new(63, 63)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_errors_are_counted() {
        let mut surface = GfxSurface::new(Broken);
        surface.set_cursor(4, 4);
        surface.print("x");
        surface.fill_rect(0, 0, 2, 2, patro_core::Rgb565::BLACK);
        surface.draw_rect(0, 0, 2, 2, patro_core::Rgb565::BLACK);
        surface.fill_screen(patro_core::Rgb565::BLACK);

        assert_eq!(surface.failed_draws(), 4);
        // Failed print leaves the cursor alone
        assert_eq!(surface.cursor(), Point::new(4, 4));
    }
}
