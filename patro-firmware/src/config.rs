//! Configuration compiled in from patro.toml
//!
//! `build.rs` validates the file and generates `DEVICE_CONFIG`; a bad file
//! fails the build instead of the boot.

use patro_core::config::{DeviceConfig, Palette, Rotation};
use patro_core::Rgb565;

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));
