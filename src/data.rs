//! Decoding and encoding of register payloads.
//!
//! Everything here is a pure function of the bytes on the wire. All
//! multi-byte fields are big-endian; nothing depends on host byte order.

use crate::registers::{
    len, ENV_TEMPERATURE_OFFSET, STATUS_APP_VALID, STATUS_DATA_READY, STATUS_ERROR,
    STATUS_FW_MODE,
};

/// Which firmware image the chip is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FirmwareMode {
    /// Bootloader. No measurements are taken.
    Boot,
    /// Application firmware. Measurements are available.
    Application,
}

/// Decoded `STATUS` register.
///
/// Status bytes are ephemeral: read, inspected and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(pub u8);

impl Status {
    /// The chip flagged an error; the source is in `ERROR_ID`.
    pub fn has_error(&self) -> bool {
        self.0 & STATUS_ERROR != 0
    }

    /// A new sample is waiting in `ALG_RESULT_DATA`.
    pub fn data_ready(&self) -> bool {
        self.0 & STATUS_DATA_READY != 0
    }

    /// Valid application firmware is loaded.
    pub fn app_valid(&self) -> bool {
        self.0 & STATUS_APP_VALID != 0
    }

    pub fn firmware_mode(&self) -> FirmwareMode {
        if self.0 & STATUS_FW_MODE != 0 {
            FirmwareMode::Application
        } else {
            FirmwareMode::Boot
        }
    }
}

/// One decoded `ALG_RESULT_DATA` block.
///
/// Layout: `[eCO2 hi][eCO2 lo][TVOC hi][TVOC lo][status]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlgorithmResult {
    pub eco2: u16,
    pub tvoc: u16,
    pub status: Status,
}

impl AlgorithmResult {
    pub fn decode(buffer: &[u8; len::ALG_RESULT_DATA]) -> Self {
        Self {
            eco2: u16::from_be_bytes([buffer[0], buffer[1]]),
            tvoc: u16::from_be_bytes([buffer[2], buffer[3]]),
            status: Status(buffer[4]),
        }
    }
}

/// Last committed measurement.
///
/// # Units
/// - **eCO2**: parts per million.
/// - **TVOC**: parts per billion.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Equivalent CO2 in ppm.
    pub eco2: u16,
    /// Total volatile organic compounds in ppb.
    pub tvoc: u16,
}

/// Firmware version as stored in `FW_BOOT_VERSION` / `FW_APP_VERSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub trivial: u8,
}

impl FirmwareVersion {
    /// First byte carries major/minor nibbles, second byte the trivial number.
    pub fn decode(buffer: &[u8; len::FW_VERSION]) -> Self {
        Self {
            major: buffer[0] >> 4,
            minor: buffer[0] & 0x0F,
            trivial: buffer[1],
        }
    }
}

/// Decoded `RAW_DATA` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawData {
    /// Current through the sensor in µA (0-63).
    pub current_ua: u8,
    /// Raw ADC reading of the sensor voltage (10 bits, 1023 = 1.65 V).
    pub adc: u16,
}

impl RawData {
    pub fn decode(buffer: &[u8; len::RAW_DATA]) -> Self {
        Self {
            current_ua: buffer[0] >> 2,
            adc: (((buffer[0] & 0x03) as u16) << 8) | buffer[1] as u16,
        }
    }
}

/// Encodes the `ENV_DATA` payload.
///
/// `humidity` is %RH × 512 and goes out unchanged. `temperature` is °C × 512
/// without any offset; the +25 °C wire offset is added here. Temperatures
/// that fall outside the unsigned wire range after offsetting are clamped.
///
/// # Example
/// ```rust
/// use ccs811_driver::encode_env_data;
/// // 50 %RH, 0 °C
/// assert_eq!(encode_env_data(0x6400, 0), [0x64, 0x00, 0x32, 0x00]);
/// ```
pub fn encode_env_data(humidity: u16, temperature: i16) -> [u8; len::ENV_DATA] {
    let adjusted = (temperature as i32 + ENV_TEMPERATURE_OFFSET).clamp(0, u16::MAX as i32) as u16;
    let [h_hi, h_lo] = humidity.to_be_bytes();
    let [t_hi, t_lo] = adjusted.to_be_bytes();
    [h_hi, h_lo, t_hi, t_lo]
}

/// Baseline tokens are opaque 16-bit values, big-endian on the wire.
pub fn decode_baseline(buffer: &[u8; len::BASELINE]) -> u16 {
    u16::from_be_bytes(*buffer)
}

pub fn encode_baseline(value: u16) -> [u8; len::BASELINE] {
    value.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_result_fields_are_big_endian() {
        let result = AlgorithmResult::decode(&[0x01, 0x90, 0x00, 0x64, 0x08]);
        assert_eq!(result.eco2, 400);
        assert_eq!(result.tvoc, 100);
        assert!(result.status.data_ready());
        assert!(!result.status.has_error());
    }

    #[test]
    fn status_bits() {
        let boot = Status(0x10);
        assert_eq!(boot.firmware_mode(), FirmwareMode::Boot);
        assert!(boot.app_valid());

        let app = Status(0x99);
        assert_eq!(app.firmware_mode(), FirmwareMode::Application);
        assert!(app.has_error());
        assert!(app.data_ready());
    }

    #[test]
    fn env_data_applies_temperature_offset() {
        assert_eq!(encode_env_data(0x6400, 0), [0x64, 0x00, 0x32, 0x00]);
        // -2 °C
        assert_eq!(encode_env_data(0x6400, -0x400), [0x64, 0x00, 0x2E, 0x00]);
        // 25.5 °C
        assert_eq!(encode_env_data(0, 25 * 512 + 256), [0x00, 0x00, 0x65, 0x00]);
    }

    #[test]
    fn env_data_clamps_below_wire_range() {
        assert_eq!(encode_env_data(0, -26 * 512), [0x00, 0x00, 0x00, 0x00]);
        assert_eq!(encode_env_data(0, i16::MIN), [0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn baseline_is_big_endian() {
        assert_eq!(encode_baseline(0xABCD), [0xAB, 0xCD]);
        assert_eq!(decode_baseline(&[0xAB, 0xCD]), 0xABCD);
    }

    #[test]
    fn firmware_version_nibbles() {
        let version = FirmwareVersion::decode(&[0x20, 0x05]);
        assert_eq!(
            version,
            FirmwareVersion {
                major: 2,
                minor: 0,
                trivial: 5
            }
        );
    }

    #[test]
    fn raw_data_split() {
        let raw = RawData::decode(&[0b1010_1110, 0xFF]);
        assert_eq!(raw.current_ua, 0b10_1011);
        assert_eq!(raw.adc, 0x2FF);
    }
}
