//! Color types and the animated color source
//!
//! The display controller takes 16-bit 5-6-5 colors, while everything above
//! the draw surface works in plain 8-bit RGB triples.

use libm::{cos, sin};

/// Midpoint of each animated channel
pub const CHANNEL_CENTER: f64 = 127.0;

/// Swing of each animated channel around the midpoint
pub const CHANNEL_AMPLITUDE: f64 = 128.0;

/// Step divisor of the red channel (sine)
pub const RED_DIVISOR: f64 = 20.0;

/// Step divisor of the green channel (cosine)
pub const GREEN_DIVISOR: f64 = 30.0;

/// Step divisor of the blue channel (sine)
pub const BLUE_DIVISOR: f64 = 40.0;

/// An RGB triple
///
/// Computed or overridden once per frame and never stored beyond it,
/// except as the last-rendered values inside the display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorSample {
    /// Create a sample from its three channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Pack into the display's 16-bit format
    pub const fn to_rgb565(self) -> Rgb565 {
        pack565(self.red, self.green, self.blue)
    }
}

/// 16-bit packed 5-6-5 color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);
    pub const CYAN: Rgb565 = Rgb565(0x07FF);

    /// Raw 16-bit value as sent to the controller
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Split into the raw 5-bit red, 6-bit green and 5-bit blue fields
    pub const fn fields(self) -> (u8, u8, u8) {
        (
            (self.0 >> 11) as u8,
            ((self.0 >> 5) & 0x3F) as u8,
            (self.0 & 0x1F) as u8,
        )
    }
}

/// Pack an 8-bit RGB triple into 5-6-5, dropping the low bits of each channel
pub const fn pack565(red: u8, green: u8, blue: u8) -> Rgb565 {
    Rgb565(((red as u16 & 0xF8) << 8) | ((green as u16 & 0xFC) << 3) | (blue as u16 >> 3))
}

/// Narrow a computed channel value to a byte
///
/// Truncates toward zero, then keeps the low eight bits. Values just below
/// zero therefore become 0 while exactly -1.0 wraps to 255. No clamping.
pub fn to_channel(value: f64) -> u8 {
    (value as i32) as u8
}

/// Periodic color generator
///
/// Each channel follows its own slow sine/cosine wave so the preview cycles
/// through the whole RGB cube. Output is a pure function of the step.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSource;

impl ColorSource {
    /// Create a color source
    pub const fn new() -> Self {
        Self
    }

    /// Color for the given step
    pub fn sample(&self, step: u64) -> ColorSample {
        let t = step as f64;
        ColorSample {
            red: to_channel(CHANNEL_CENTER + CHANNEL_AMPLITUDE * sin(t / RED_DIVISOR)),
            green: to_channel(CHANNEL_CENTER + CHANNEL_AMPLITUDE * cos(t / GREEN_DIVISOR)),
            blue: to_channel(CHANNEL_CENTER + CHANNEL_AMPLITUDE * sin(t / BLUE_DIVISOR)),
        }
    }
}
