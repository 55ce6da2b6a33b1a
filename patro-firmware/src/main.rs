//! PatroMonitor - Animated status display with a Wi-Fi override portal
//!
//! Firmware for the Raspberry Pi Pico W with an ILI9341 panel. The screen
//! shows a frame counter, a slowly cycling preview color and the number of
//! clients using the portal. Joining the device's access point and opening
//! any page leads to a form that pins the preview color until restart.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;
use {defmt_rtt as _, panic_probe as _};

use crate::config::DEVICE_CONFIG;
use crate::display::DisplayPins;
use crate::net::RadioPins;

mod config;
mod display;
mod net;
mod shared;
mod tasks;

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PatroMonitor firmware starting...");

    let config = DEVICE_CONFIG;
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display first so the screen comes alive while the radio boots
    let display_pins = DisplayPins {
        spi: p.SPI0,
        clk: p.PIN_18,
        mosi: p.PIN_19,
        cs: p.PIN_17,
        dc: p.PIN_16,
        rst: p.PIN_20,
    };
    let surface = unwrap!(display::init(display_pins, config.rotation));
    info!("Display initialized (rotation {})", config.rotation.degrees());

    spawner
        .spawn(tasks::render_task(
            surface,
            config.frame_interval_ms,
            config.palette,
        ))
        .unwrap();

    let radio_pins = RadioPins {
        pio: p.PIO0,
        dma: p.DMA_CH0,
        pwr: p.PIN_23,
        dio: p.PIN_24,
        cs: p.PIN_25,
        clk: p.PIN_29,
    };
    let stack = net::init(spawner, radio_pins, &config).await;

    spawner
        .spawn(tasks::portal_task(stack, config.http_port))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // All work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
