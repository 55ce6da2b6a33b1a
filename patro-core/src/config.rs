//! Compiled-in device configuration
//!
//! The firmware's build script turns `patro.toml` into a `DeviceConfig`
//! constant. Defaults match the stock device: an open access point named
//! after the product, landscape orientation and a 20 ms frame interval.

use crate::color::Rgb565;

/// Longest SSID accepted by 802.11
pub const MAX_SSID_LEN: usize = 32;

/// WPA2 passphrase length bounds (empty means open network)
pub const MIN_PASSPHRASE_LEN: usize = 8;
pub const MAX_PASSPHRASE_LEN: usize = 63;

/// Upper bound on the frame interval
pub const MAX_FRAME_INTERVAL_MS: u32 = 1000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// SSID empty or longer than 32 bytes
    InvalidSsid,
    /// Passphrase neither empty nor 8-63 bytes
    InvalidPassphrase,
    /// Channel outside 1-13
    InvalidChannel,
    /// Network prefix outside 1-30
    InvalidPrefix,
    /// HTTP port of zero
    InvalidPort,
    /// Frame interval of zero or above the maximum
    InvalidFrameInterval,
    /// Rotation not a multiple of 90 degrees
    InvalidRotation,
}

/// Screen rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Deg0,
    /// Landscape, 320x240
    #[default]
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation given in degrees
    pub const fn from_degrees(degrees: u16) -> Result<Self, ConfigError> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ConfigError::InvalidRotation),
        }
    }

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether the long edge is horizontal
    pub const fn is_landscape(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Screen colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    /// Screen background, also used to erase values
    pub background: Rgb565,
    /// Header band
    pub header: Rgb565,
    /// Title and field labels
    pub label: Rgb565,
    /// Field values
    pub value: Rgb565,
    /// Preview swatch border
    pub border: Rgb565,
}

impl Palette {
    /// Dark grey background, dark blue header, yellow values
    pub const DEFAULT: Palette = Palette {
        background: Rgb565(0x10A2),
        header: Rgb565(0x3186),
        label: Rgb565::WHITE,
        value: Rgb565::YELLOW,
        border: Rgb565::CYAN,
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Access point network name
    pub ssid: &'static str,
    /// Access point passphrase, empty for an open network
    pub passphrase: &'static str,
    /// Wi-Fi channel
    pub channel: u8,
    /// Static address of the device on its own network. The default sits
    /// in 169.254.0.0/16 so clients without a lease reach it over their
    /// self-assigned link-local address.
    pub address: [u8; 4],
    /// Network prefix length
    pub prefix_len: u8,
    /// Port the portal listens on
    pub http_port: u16,
    /// Screen rotation
    pub rotation: Rotation,
    /// Time between frames
    pub frame_interval_ms: u32,
    /// How long a client counts as connected after its last request
    pub peer_idle_ms: u64,
    /// Screen colors
    pub palette: Palette,
}

impl DeviceConfig {
    /// Stock configuration
    pub const DEFAULT: DeviceConfig = DeviceConfig {
        ssid: "PatroMonitor",
        passphrase: "",
        channel: 6,
        address: [169, 254, 1, 1],
        prefix_len: 16,
        http_port: 80,
        rotation: Rotation::Deg90,
        frame_interval_ms: 20,
        peer_idle_ms: 60_000,
        palette: Palette::DEFAULT,
    };

    /// Whether the access point runs without encryption
    pub fn is_open(&self) -> bool {
        self.passphrase.is_empty()
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ssid.is_empty() || self.ssid.len() > MAX_SSID_LEN {
            return Err(ConfigError::InvalidSsid);
        }
        if !self.passphrase.is_empty()
            && !(MIN_PASSPHRASE_LEN..=MAX_PASSPHRASE_LEN).contains(&self.passphrase.len())
        {
            return Err(ConfigError::InvalidPassphrase);
        }
        if !(1..=13).contains(&self.channel) {
            return Err(ConfigError::InvalidChannel);
        }
        if !(1..=30).contains(&self.prefix_len) {
            return Err(ConfigError::InvalidPrefix);
        }
        if self.http_port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.frame_interval_ms == 0 || self.frame_interval_ms > MAX_FRAME_INTERVAL_MS {
            return Err(ConfigError::InvalidFrameInterval);
        }
        Ok(())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(DeviceConfig::DEFAULT.validate(), Ok(()));
        assert!(DeviceConfig::DEFAULT.is_open());
    }

    #[test]
    fn test_default_address_is_link_local() {
        // Clients without a lease self-assign inside 169.254.0.0/16
        let config = DeviceConfig::DEFAULT;
        let address = core::net::Ipv4Addr::from(config.address);
        assert!(address.is_link_local());
        assert_eq!(config.prefix_len, 16);

        let client = core::net::Ipv4Addr::new(169, 254, 37, 200);
        let mask = u32::MAX << (32 - config.prefix_len);
        assert_eq!(u32::from(address) & mask, u32::from(client) & mask);
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(Rotation::from_degrees(90), Ok(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(270).map(Rotation::degrees), Ok(270));
        assert_eq!(Rotation::from_degrees(45), Err(ConfigError::InvalidRotation));
        assert!(Rotation::default().is_landscape());
    }

    #[test]
    fn test_short_passphrase_rejected() {
        let config = DeviceConfig {
            passphrase: "short",
            ..DeviceConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidPassphrase));

        let config = DeviceConfig {
            passphrase: "long enough",
            ..DeviceConfig::DEFAULT
        };
        assert_eq!(config.validate(), Ok(()));
        assert!(!config.is_open());
    }

    #[test]
    fn test_bad_ranges_rejected() {
        let base = DeviceConfig::DEFAULT;
        assert_eq!(
            DeviceConfig { ssid: "", ..base }.validate(),
            Err(ConfigError::InvalidSsid)
        );
        assert_eq!(
            DeviceConfig { channel: 14, ..base }.validate(),
            Err(ConfigError::InvalidChannel)
        );
        assert_eq!(
            DeviceConfig { prefix_len: 0, ..base }.validate(),
            Err(ConfigError::InvalidPrefix)
        );
        assert_eq!(
            DeviceConfig { http_port: 0, ..base }.validate(),
            Err(ConfigError::InvalidPort)
        );
        assert_eq!(
            DeviceConfig {
                frame_interval_ms: 0,
                ..base
            }
            .validate(),
            Err(ConfigError::InvalidFrameInterval)
        );
    }
}
