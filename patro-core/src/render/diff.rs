//! Differential renderer
//!
//! Redraws a field only when its value differs from what is on screen.
//! A changed field costs one erase and one draw; an unchanged field costs
//! nothing. The preview swatch is the exception: it is filled and bordered
//! every frame.

use core::fmt::Write;

use heapless::String;

use super::layout::{
    Field, FIELD_TEXT_SIZE, HEADER_HEIGHT, LABEL_X, PREVIEW_LABEL, PREVIEW_LABEL_X,
    PREVIEW_LABEL_Y, SCREEN_WIDTH, SWATCH, TITLE, TITLE_TEXT_SIZE, TITLE_X, TITLE_Y,
    VALUE_COLUMN_WIDTH, VALUE_X,
};
use super::state::DisplayState;
use crate::color::ColorSample;
use crate::config::Palette;
use crate::traits::DrawSurface;

/// Decimal digits of the widest field value (`u64::MAX`)
pub const MAX_VALUE_DIGITS: usize = 20;

/// Decimal rendering of a field value
pub type ValueText = String<MAX_VALUE_DIGITS>;

/// Base-10 text of a value, no padding or leading zeros
pub fn format_value(value: u64) -> ValueText {
    let mut text = ValueText::new();
    // Cannot fail: MAX_VALUE_DIGITS fits u64::MAX
    let _ = write!(text, "{}", value);
    text
}

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// Counter value rendered
    pub counter: u64,
    /// Color rendered into the swatch
    pub color: ColorSample,
    /// Client count rendered
    pub clients: u32,
    redrawn: u8,
}

impl FrameReport {
    /// Whether the given field was redrawn
    pub fn redrawn(&self, field: Field) -> bool {
        self.redrawn & (1 << field.index()) != 0
    }

    /// Number of fields redrawn
    pub fn redrawn_count(&self) -> u32 {
        self.redrawn.count_ones()
    }

    /// True when no text field changed
    pub fn is_quiet(&self) -> bool {
        self.redrawn == 0
    }
}

/// Change-detecting renderer
///
/// Owns the display state. Nothing else may mutate it, so after every frame
/// the state equals exactly what was last drawn.
#[derive(Debug, Clone)]
pub struct DiffRenderer {
    state: DisplayState,
    palette: Palette,
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new(Palette::DEFAULT)
    }
}

impl DiffRenderer {
    /// Create a renderer that has drawn nothing yet
    pub const fn new(palette: Palette) -> Self {
        Self {
            state: DisplayState::new(),
            palette,
        }
    }

    /// What is currently on screen
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Draw the parts of the screen that never change
    ///
    /// Clears the screen, so every field is redrawn on the next frame.
    pub fn draw_static_ui<D: DrawSurface>(&mut self, surface: &mut D) {
        let palette = self.palette;

        surface.fill_screen(palette.background);

        // Header
        surface.fill_rect(0, 0, SCREEN_WIDTH, HEADER_HEIGHT, palette.header);
        surface.set_cursor(TITLE_X, TITLE_Y);
        surface.set_text_color(palette.label);
        surface.set_text_size(TITLE_TEXT_SIZE);
        surface.print(TITLE);

        // Labels
        surface.set_text_size(FIELD_TEXT_SIZE);
        surface.set_text_color(palette.label);
        for field in Field::ALL {
            surface.set_cursor(LABEL_X, field.row());
            surface.print(field.label());
        }

        surface.set_cursor(PREVIEW_LABEL_X, PREVIEW_LABEL_Y);
        surface.print(PREVIEW_LABEL);

        self.state.invalidate();
    }

    /// Render one frame
    ///
    /// Text fields are touched only if their value changed; the swatch is
    /// always redrawn.
    pub fn render_frame<D: DrawSurface>(
        &mut self,
        surface: &mut D,
        counter: u64,
        red: u8,
        green: u8,
        blue: u8,
        clients: u32,
    ) -> FrameReport {
        let values = [
            counter,
            u64::from(red),
            u64::from(green),
            u64::from(blue),
            u64::from(clients),
        ];

        let mut redrawn = 0u8;
        for field in Field::ALL {
            if self.update_field(surface, field, values[field.index()]) {
                redrawn |= 1 << field.index();
            }
        }

        let color = ColorSample::new(red, green, blue);
        self.draw_swatch(surface, color);

        FrameReport {
            counter,
            color,
            clients,
            redrawn,
        }
    }

    fn update_field<D: DrawSurface>(&mut self, surface: &mut D, field: Field, value: u64) -> bool {
        let previous = self.state.get(field);
        if previous == Some(value) {
            return false;
        }

        surface.set_text_size(FIELD_TEXT_SIZE);
        let (glyph_width, glyph_height) = surface.glyph_size();

        // Erase the whole box of the old text so a shorter value leaves no
        // trailing glyphs behind.
        let erase_width = match previous {
            Some(old) => text_width(format_value(old).len(), glyph_width),
            None => VALUE_COLUMN_WIDTH,
        };
        surface.fill_rect(
            VALUE_X,
            field.row(),
            erase_width,
            glyph_height,
            self.palette.background,
        );

        surface.set_cursor(VALUE_X, field.row());
        surface.set_text_color(self.palette.value);
        surface.print(&format_value(value));

        self.state.set(field, value);
        true
    }

    fn draw_swatch<D: DrawSurface>(&self, surface: &mut D, color: ColorSample) {
        surface.fill_rect(
            SWATCH.x,
            SWATCH.y,
            SWATCH.width,
            SWATCH.height,
            color.to_rgb565(),
        );
        surface.draw_rect(
            SWATCH.x,
            SWATCH.y,
            SWATCH.width,
            SWATCH.height,
            self.palette.border,
        );
    }
}

/// Pixel width of `chars` glyphs, clipped to the right screen edge
fn text_width(chars: usize, glyph_width: u16) -> u16 {
    let chars = u16::try_from(chars).unwrap_or(u16::MAX);
    chars
        .saturating_mul(glyph_width)
        .min(SCREEN_WIDTH - VALUE_X)
}
