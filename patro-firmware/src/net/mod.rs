//! Radio and network stack bring-up
//!
//! The CYW43439 is wired to PIO0 (power GPIO23, data GPIO24, CS GPIO25,
//! clock GPIO29). The device runs its own access point with a static
//! address. No DHCP server runs here, so joining clients self-assign a
//! 169.254.0.0/16 address; the default config puts the device in that
//! same link-local network.

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Ipv4Address, Ipv4Cidr, Stack, StackResources, StaticConfigV4};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::Pio;
use embassy_rp::Peri;
use patro_core::DeviceConfig;
use rand_core::RngCore;
use static_cell::StaticCell;

use crate::tasks::{cyw43_task, net_task};
use crate::Irqs;

/// Sockets the stack can hold: the portal listener plus slack
const SOCKET_COUNT: usize = 4;

static STATE: StaticCell<cyw43::State> = StaticCell::new();
static RESOURCES: StaticCell<StackResources<SOCKET_COUNT>> = StaticCell::new();

/// Peripherals the radio needs
pub struct RadioPins {
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH0>,
    pub pwr: Peri<'static, PIN_23>,
    pub dio: Peri<'static, PIN_24>,
    pub cs: Peri<'static, PIN_25>,
    pub clk: Peri<'static, PIN_29>,
}

/// Bring up the radio, start the access point and the network stack
///
/// Spawns the radio and stack runner tasks.
pub async fn init(spawner: Spawner, pins: RadioPins, config: &DeviceConfig) -> Stack<'static> {
    let fw = include_bytes!("../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(pins.pwr, Level::Low);
    let cs = Output::new(pins.cs, Level::High);
    let mut pio = Pio::new(pins.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        pins.dio,
        pins.clk,
        pins.dma,
    );

    let state = STATE.init(cyw43::State::new());
    let (device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(cyw43_task(runner)).unwrap();

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    info!("Radio initialized");

    let [a, b, c, d] = config.address;
    let net_config = embassy_net::Config::ipv4_static(StaticConfigV4 {
        address: Ipv4Cidr::new(Ipv4Address::new(a, b, c, d), config.prefix_len),
        gateway: None,
        dns_servers: heapless::Vec::new(),
    });

    let seed = RoscRng.next_u64();
    let (stack, runner) = embassy_net::new(
        device,
        net_config,
        RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(net_task(runner)).unwrap();

    if config.is_open() {
        control.start_ap_open(config.ssid, config.channel).await;
    } else {
        control
            .start_ap_wpa2(config.ssid, config.passphrase, config.channel)
            .await;
    }
    info!(
        "Access point '{}' up on channel {} ({})",
        config.ssid,
        config.channel,
        if config.is_open() { "open" } else { "WPA2" }
    );

    stack
}
