//! Register map and protocol constants for the CCS811.
//!
//! Every register is a one-byte mailbox address. Payload lengths are fixed
//! by the chip; the comments note the number of bytes transferred.

// --- Application registers ---

/// Status register (1 byte, read-only).
pub const STATUS: u8 = 0x00;
/// Measurement mode and conditions (1 byte, read/write).
pub const MEAS_MODE: u8 = 0x01;
/// Algorithm result: eCO2, TVOC, status (5 bytes used, up to 8 available).
pub const ALG_RESULT_DATA: u8 = 0x02;
/// Raw ADC data: current and voltage across the sensor (2 bytes).
pub const RAW_DATA: u8 = 0x03;
/// Humidity and temperature compensation (4 bytes, write-only).
pub const ENV_DATA: u8 = 0x05;
/// Interrupt thresholds (5 bytes). Not used by this driver.
#[allow(dead_code)]
pub const THRESHOLDS: u8 = 0x10;
/// Encoded baseline (2 bytes, read/write).
pub const BASELINE: u8 = 0x11;

// --- Identity registers ---

/// Hardware identifier (1 byte, always `0x81`).
pub const HW_ID: u8 = 0x20;
/// Hardware version (1 byte, `0x1X`).
pub const HW_VERSION: u8 = 0x21;
/// Firmware boot version (2 bytes).
pub const FW_BOOT_VERSION: u8 = 0x23;
/// Firmware application version (2 bytes).
pub const FW_APP_VERSION: u8 = 0x24;
/// Error source when the status error bit is set (1 byte).
pub const ERROR_ID: u8 = 0xE0;

// --- Boot-mode registers ---

/// Application erase (4 bytes). Firmware flashing is not supported.
#[allow(dead_code)]
pub const APP_ERASE: u8 = 0xF1;
/// Application data (9 bytes). Firmware flashing is not supported.
#[allow(dead_code)]
pub const APP_DATA: u8 = 0xF2;
/// Application verify (0 bytes). Firmware flashing is not supported.
#[allow(dead_code)]
pub const APP_VERIFY: u8 = 0xF3;
/// Application start (address-only write).
pub const APP_START: u8 = 0xF4;
/// Software reset (4 magic bytes).
pub const SW_RESET: u8 = 0xFF;

/// Payload sizes for multi-byte registers.
pub mod len {
    pub const ALG_RESULT_DATA: usize = 5;
    pub const RAW_DATA: usize = 2;
    pub const ENV_DATA: usize = 4;
    pub const BASELINE: usize = 2;
    pub const FW_VERSION: usize = 2;
    pub const SW_RESET: usize = 4;
}

// --- Protocol constants ---

/// Magic sequence that triggers a software reset when written to `SW_RESET`.
pub const SW_RESET_SEQUENCE: [u8; len::SW_RESET] = [0x11, 0xE5, 0x72, 0x8A];

/// Value of `HW_ID` for every CCS811.
pub const EXPECTED_HW_ID: u8 = 0x81;
/// High nibble of `HW_VERSION` for every CCS811 (`0x1X`).
pub const EXPECTED_HW_VERSION: u8 = 0x10;
pub const HW_VERSION_MASK: u8 = 0xF0;

/// Status after reset: boot mode, valid application firmware loaded.
pub const STATUS_BOOT_READY: u8 = 0x10;
/// Status after `APP_START`: application firmware running, valid firmware.
pub const STATUS_APP_RUNNING: u8 = 0x90;

/// Status bit: the chip flagged an error (source in `ERROR_ID`).
pub const STATUS_ERROR: u8 = 0x01;
/// Status bit: a new sample is available in `ALG_RESULT_DATA`.
pub const STATUS_DATA_READY: u8 = 0x08;
/// Status bit: valid application firmware is loaded.
pub const STATUS_APP_VALID: u8 = 0x10;
/// Status bit: application firmware is running (else boot mode).
pub const STATUS_FW_MODE: u8 = 0x80;

/// Settle time after a software reset, in milliseconds.
pub const RESET_DELAY_MS: u32 = 2;
/// Settle time after `APP_START`, in milliseconds.
pub const APP_START_DELAY_MS: u32 = 1;

/// Temperature offset baked into the `ENV_DATA` wire format (25 °C × 512).
pub const ENV_TEMPERATURE_OFFSET: i32 = 25 * 512;

/// Default I2C address (ADDR pin low).
pub const DEFAULT_ADDRESS: u8 = 0x5A;
/// Alternate I2C address (ADDR pin high).
pub const ALTERNATE_ADDRESS: u8 = 0x5B;
