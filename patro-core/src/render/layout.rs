//! Fixed screen layout
//!
//! Coordinates assume the landscape 320x240 orientation.

/// Screen width in landscape orientation
pub const SCREEN_WIDTH: u16 = 320;

/// Screen height in landscape orientation
pub const SCREEN_HEIGHT: u16 = 240;

/// Height of the header band at the top of the screen
pub const HEADER_HEIGHT: u16 = 40;

/// Product name shown in the header
pub const TITLE: &str = "PatroMonitor";
pub const TITLE_X: u16 = 10;
pub const TITLE_Y: u16 = 10;
pub const TITLE_TEXT_SIZE: u8 = 3;

/// Column of the field labels
pub const LABEL_X: u16 = 10;

/// Column of the field values
pub const VALUE_X: u16 = 100;

/// Text size of labels and values
pub const FIELD_TEXT_SIZE: u8 = 2;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Color preview swatch
pub const SWATCH: Rect = Rect::new(200, 80, 100, 120);

/// "Preview" label above the swatch
pub const PREVIEW_LABEL: &str = "Preview";
pub const PREVIEW_LABEL_X: u16 = 200;
pub const PREVIEW_LABEL_Y: u16 = 60;

/// Width reserved for a value, from the value column to the swatch
pub const VALUE_COLUMN_WIDTH: u16 = SWATCH.x - VALUE_X;

/// Number of tracked fields
pub const FIELD_COUNT: usize = 5;

/// One independently tracked value on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Counter,
    Red,
    Green,
    Blue,
    Clients,
}

impl Field {
    /// All fields in drawing order
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Counter,
        Field::Red,
        Field::Green,
        Field::Blue,
        Field::Clients,
    ];

    /// Index into per-field tables
    pub const fn index(self) -> usize {
        match self {
            Field::Counter => 0,
            Field::Red => 1,
            Field::Green => 2,
            Field::Blue => 3,
            Field::Clients => 4,
        }
    }

    /// Top edge of the field's row
    pub const fn row(self) -> u16 {
        match self {
            Field::Counter => 80,
            Field::Red => 110,
            Field::Green => 140,
            Field::Blue => 170,
            Field::Clients => 200,
        }
    }

    /// Static label drawn once at startup
    pub const fn label(self) -> &'static str {
        match self {
            Field::Counter => "Count:",
            Field::Red => "Red:",
            Field::Green => "Green:",
            Field::Blue => "Blue:",
            Field::Clients => "Clients:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_do_not_overlap_header() {
        for field in Field::ALL {
            assert!(field.row() >= HEADER_HEIGHT);
            assert!(field.row() < SCREEN_HEIGHT);
        }
    }

    #[test]
    fn test_indices_are_unique() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_swatch_fits_screen() {
        assert!(SWATCH.x + SWATCH.width <= SCREEN_WIDTH);
        assert!(SWATCH.y + SWATCH.height <= SCREEN_HEIGHT);
        assert_eq!(VALUE_COLUMN_WIDTH, 100);
    }
}
