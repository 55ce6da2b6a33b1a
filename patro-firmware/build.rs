//! Build script for patro-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates patro.toml at compile time
//! - Generates the `DEVICE_CONFIG` constant from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use patro_core::config::{ConfigError, DeviceConfig, Palette, Rotation};
use patro_core::Rgb565;

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate patro.toml
fn load_config() -> DeviceConfig {
    println!("cargo:rerun-if-changed=patro.toml");

    let config_path = Path::new("patro.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: patro.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a patro.toml configuration file.          ║\n\
            ║  Please create one in the patro-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read patro.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in patro.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    let config = read_config(&value, &mut errors);

    if errors.is_empty() {
        if let Err(e) = config.validate() {
            errors.push(describe(e).to_string());
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in patro.toml                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=patro.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::InvalidSsid => "[network] ssid must be 1-32 bytes",
        ConfigError::InvalidPassphrase => "[network] passphrase must be empty or 8-63 bytes",
        ConfigError::InvalidChannel => "[network] channel must be 1-13",
        ConfigError::InvalidPrefix => "[network] prefix_len must be 1-30",
        ConfigError::InvalidPort => "[network] http_port must not be 0",
        ConfigError::InvalidFrameInterval => "[display] frame_interval_ms must be 1-1000",
        ConfigError::InvalidRotation => "[display] rotation must be 0, 90, 180 or 270",
    }
}

/// Build a `DeviceConfig` from the parsed file, defaulting missing keys
fn read_config(value: &toml::Value, errors: &mut Vec<String>) -> DeviceConfig {
    let defaults = DeviceConfig::DEFAULT;
    let network = section(value, "network", errors);
    let display = section(value, "display", errors);
    let palette = section(value, "palette", errors);

    let ssid = string(network, "network", "ssid", errors).unwrap_or(defaults.ssid);
    let passphrase =
        string(network, "network", "passphrase", errors).unwrap_or(defaults.passphrase);
    let channel = integer(network, "network", "channel", 0, u8::MAX as i64, errors)
        .map_or(defaults.channel, |v| v as u8);
    let prefix_len = integer(network, "network", "prefix_len", 0, 32, errors)
        .map_or(defaults.prefix_len, |v| v as u8);
    let http_port = integer(network, "network", "http_port", 0, u16::MAX as i64, errors)
        .map_or(defaults.http_port, |v| v as u16);
    let peer_idle_ms = integer(network, "network", "peer_idle_s", 1, 86_400, errors)
        .map_or(defaults.peer_idle_ms, |v| v as u64 * 1000);

    let address = match string(network, "network", "address", errors) {
        Some(text) => match text.parse::<Ipv4Addr>() {
            Ok(addr) => addr.octets(),
            Err(_) => {
                errors.push(format!("[network] address '{}' is not an IPv4 address", text));
                defaults.address
            }
        },
        None => defaults.address,
    };

    let rotation = match integer(display, "display", "rotation", 0, 360, errors) {
        Some(degrees) => match Rotation::from_degrees(degrees as u16) {
            Ok(rotation) => rotation,
            Err(e) => {
                errors.push(describe(e).to_string());
                defaults.rotation
            }
        },
        None => defaults.rotation,
    };
    let frame_interval_ms = integer(display, "display", "frame_interval_ms", 0, u32::MAX as i64, errors)
        .map_or(defaults.frame_interval_ms, |v| v as u32);

    let color = |key: &str, fallback: Rgb565, errors: &mut Vec<String>| {
        integer(palette, "palette", key, 0, 0xFFFF, errors).map_or(fallback, |v| Rgb565(v as u16))
    };
    let palette = Palette {
        background: color("background", defaults.palette.background, errors),
        header: color("header", defaults.palette.header, errors),
        label: color("label", defaults.palette.label, errors),
        value: color("value", defaults.palette.value, errors),
        border: color("border", defaults.palette.border, errors),
    };

    DeviceConfig {
        ssid,
        passphrase,
        channel,
        address,
        prefix_len,
        http_port,
        rotation,
        frame_interval_ms,
        peer_idle_ms,
        palette,
    }
}

/// Optional table; a non-table value is an error
fn section<'a>(
    value: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match value.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => None,
    }
}

/// String value, leaked so it can sit in a `&'static str` config field
fn string(
    table: Option<&toml::value::Table>,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<&'static str> {
    match table?.get(key)? {
        toml::Value::String(s) => Some(Box::leak(s.clone().into_boxed_str())),
        _ => {
            errors.push(format!("[{}] {} must be a string", section, key));
            None
        }
    }
}

fn integer(
    table: Option<&toml::value::Table>,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table?.get(key)? {
        toml::Value::Integer(v) if (min..=max).contains(v) => Some(*v),
        toml::Value::Integer(_) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        _ => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

/// Write `DEVICE_CONFIG` to OUT_DIR/device_config.rs
fn generate_config(config: &DeviceConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let palette = &config.palette;
    let [a, b, c, d] = config.address;

    let code = format!(
        "/// Configuration compiled in from patro.toml\n\
        pub const DEVICE_CONFIG: DeviceConfig = DeviceConfig {{\n    \
            ssid: {:?},\n    \
            passphrase: {:?},\n    \
            channel: {},\n    \
            address: [{}, {}, {}, {}],\n    \
            prefix_len: {},\n    \
            http_port: {},\n    \
            rotation: Rotation::{:?},\n    \
            frame_interval_ms: {},\n    \
            peer_idle_ms: {},\n    \
            palette: Palette {{\n        \
                background: Rgb565({:#06X}),\n        \
                header: Rgb565({:#06X}),\n        \
                label: Rgb565({:#06X}),\n        \
                value: Rgb565({:#06X}),\n        \
                border: Rgb565({:#06X}),\n    \
            }},\n\
        }};\n",
        config.ssid,
        config.passphrase,
        config.channel,
        a,
        b,
        c,
        d,
        config.prefix_len,
        config.http_port,
        config.rotation,
        config.frame_interval_ms,
        config.peer_idle_ms,
        palette.background.raw(),
        palette.header.raw(),
        palette.label.raw(),
        palette.value.raw(),
        palette.border.raw(),
    );

    fs::write(out_dir.join("device_config.rs"), code).unwrap();
}
