//! ILI9341 panel bring-up
//!
//! Wiring (SPI0):
//! - CLK  GPIO18
//! - MOSI GPIO19
//! - CS   GPIO17
//! - DC   GPIO16
//! - RST  GPIO20

use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIN_16, PIN_17, PIN_18, PIN_19, PIN_20, SPI0};
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_rp::Peri;
use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::{ColorOrder, Orientation};
use mipidsi::Builder;
use patro_core::Rotation;
use patro_display::GfxSurface;
use static_cell::StaticCell;

/// SPI clock for the panel
const SPI_FREQUENCY_HZ: u32 = 32_000_000;

type PanelSpi = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>;
type PanelInterface = SpiInterface<'static, PanelSpi, Output<'static>>;

/// Panel driver
pub type Panel = mipidsi::Display<PanelInterface, ILI9341Rgb565, Output<'static>>;

/// Draw surface owned by the render task
pub type Surface = GfxSurface<Panel>;

/// Pixel staging buffer for the SPI interface
static BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

/// Panel bring-up failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum DisplayInitError {
    /// Chip select could not be driven
    ChipSelect,
    /// Controller did not accept the init sequence
    Controller,
}

/// Peripherals the panel needs
pub struct DisplayPins {
    pub spi: Peri<'static, SPI0>,
    pub clk: Peri<'static, PIN_18>,
    pub mosi: Peri<'static, PIN_19>,
    pub cs: Peri<'static, PIN_17>,
    pub dc: Peri<'static, PIN_16>,
    pub rst: Peri<'static, PIN_20>,
}

fn orientation(rotation: Rotation) -> Orientation {
    let rotation = match rotation {
        Rotation::Deg0 => mipidsi::options::Rotation::Deg0,
        Rotation::Deg90 => mipidsi::options::Rotation::Deg90,
        Rotation::Deg180 => mipidsi::options::Rotation::Deg180,
        Rotation::Deg270 => mipidsi::options::Rotation::Deg270,
    };
    Orientation::new().rotate(rotation)
}

/// Reset and initialize the panel
pub fn init(pins: DisplayPins, rotation: Rotation) -> Result<Surface, DisplayInitError> {
    let mut config = spi::Config::default();
    config.frequency = SPI_FREQUENCY_HZ;

    let bus = Spi::new_blocking_txonly(pins.spi, pins.clk, pins.mosi, config);
    let cs = Output::new(pins.cs, Level::High);
    let dc = Output::new(pins.dc, Level::Low);
    let rst = Output::new(pins.rst, Level::Low);

    let device =
        ExclusiveDevice::new_no_delay(bus, cs).map_err(|_| DisplayInitError::ChipSelect)?;
    let interface = SpiInterface::new(device, dc, BUFFER.init([0u8; 512]));

    let panel = Builder::new(ILI9341Rgb565, interface)
        .reset_pin(rst)
        .orientation(orientation(rotation))
        .color_order(ColorOrder::Bgr)
        .init(&mut Delay)
        .map_err(|_| DisplayInitError::Controller)?;

    Ok(GfxSurface::new(panel))
}
