/// Sampling cadence of the gas sensor (`MEAS_MODE` drive mode).
///
/// Only the drive-mode nibble is ever set; interrupt and threshold bits are
/// always written as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MeasurementMode {
    /// No measurements. The chip keeps its firmware running but idles.
    #[default]
    Idle = 0,
    /// A new sample every second.
    Every1s = 1,
    /// A new sample every 10 seconds.
    Every10s = 2,
    /// A new sample every 60 seconds.
    Every60s = 3,
}

impl MeasurementMode {
    /// The byte written to `MEAS_MODE` (drive mode in bits 6:4).
    pub fn register_value(self) -> u8 {
        (self as u8) << 4
    }
}

/// Humidity and temperature used by the chip to compensate its readings.
///
/// Both values are fixed point with 9 fractional bits (× 512).
/// `temperature` is plain °C × 512; the driver adds the +25 °C wire offset
/// when transmitting, so callers must not apply it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnvironmentData {
    /// Relative humidity in % × 512 (`0x6400` = 50 %).
    pub humidity: u16,
    /// Temperature in °C × 512 (`-0x400` = -2 °C).
    pub temperature: i16,
}

impl Default for EnvironmentData {
    /// The chip's power-on default: 50 %RH, 25 °C.
    fn default() -> Self {
        Self {
            humidity: 50 * 512,
            temperature: 25 * 512,
        }
    }
}

impl EnvironmentData {
    /// Builds compensation data from milli-units without floating point.
    ///
    /// # Arguments
    /// * `rh_milli_percent` - Relative humidity × 1000 (45123 = 45.123 %).
    /// * `temp_milli_celsius` - Temperature × 1000 (23500 = 23.5 °C).
    ///
    /// # Example
    /// ```rust
    /// use ccs811_driver::EnvironmentData;
    /// let env = EnvironmentData::from_milli(50_000, -2_000);
    /// assert_eq!(env.humidity, 0x6400);
    /// assert_eq!(env.temperature, -0x400);
    /// ```
    pub fn from_milli(rh_milli_percent: u32, temp_milli_celsius: i32) -> Self {
        let humidity = (rh_milli_percent as u64 * 512 / 1000).min(u16::MAX as u64) as u16;
        let temperature = (temp_milli_celsius as i64 * 512 / 1000)
            .clamp(i16::MIN as i64, i16::MAX as i64) as i16;

        Self {
            humidity,
            temperature,
        }
    }
}

/// Settings applied by [`Ccs811::configure`](crate::Ccs811::configure).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub mode: MeasurementMode,
    /// Compensation data. `None` leaves the chip's current values in place.
    pub environment: Option<EnvironmentData>,
    /// A baseline saved from an earlier session, restored before measuring.
    pub baseline: Option<u16>,
}

/// Builder for [`Config`].
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: MeasurementMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn environment(mut self, env: EnvironmentData) -> Self {
        self.config.environment = Some(env);
        self
    }

    /// Restores a baseline token previously read with `baseline()`.
    pub fn baseline(mut self, token: u16) -> Self {
        self.config.baseline = Some(token);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_occupies_high_nibble() {
        assert_eq!(MeasurementMode::Idle.register_value(), 0);
        assert_eq!(MeasurementMode::Every1s.register_value(), 16);
        assert_eq!(MeasurementMode::Every10s.register_value(), 32);
        assert_eq!(MeasurementMode::Every60s.register_value(), 48);
    }

    #[test]
    fn environment_from_milli_units() {
        let env = EnvironmentData::from_milli(50_000, 0);
        assert_eq!(env.humidity, 0x6400);
        assert_eq!(env.temperature, 0);

        let env = EnvironmentData::from_milli(100_000, 25_500);
        assert_eq!(env.humidity, 100 * 512);
        assert_eq!(env.temperature, 25 * 512 + 256);
    }

    #[test]
    fn environment_from_milli_saturates() {
        let env = EnvironmentData::from_milli(u32::MAX, i32::MIN);
        assert_eq!(env.humidity, u16::MAX);
        assert_eq!(env.temperature, i16::MIN);
    }

    #[test]
    fn builder_collects_settings() {
        let config = ConfigBuilder::new()
            .mode(MeasurementMode::Every10s)
            .baseline(0xABCD)
            .build();

        assert_eq!(config.mode, MeasurementMode::Every10s);
        assert_eq!(config.baseline, Some(0xABCD));
        assert_eq!(config.environment, None);
    }
}
