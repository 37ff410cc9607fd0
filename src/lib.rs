#![cfg_attr(not(test), no_std)]

//! # CCS811 Gas Sensor Driver
//!
//! A type-safe, `no_std` driver for the ams CCS811 indoor air quality sensor.
//! This driver uses the typestate pattern to ensure the chip has been reset,
//! identified and switched into application firmware before any measurement
//! or configuration register is touched.
//!
//! ## Features
//! - **Verified Boot Sequence**: Every step of reset → boot → app is checked
//!   by re-reading the status register, not assumed from timing.
//! - **Transport Agnostic**: The protocol engine only needs [`Transport`];
//!   [`I2cTransport`] binds it to any `embedded-hal` 1.0 I2C bus and delay.
//! - **Fixed-Point Compensation**: Humidity and temperature are encoded
//!   without an FPU.
//! - **Typestate Pattern**: Prevents measuring before initialization.
//!
//! ## Units
//! - **eCO2**: parts per million (ppm), 400 to 8192.
//! - **TVOC**: parts per billion (ppb), 0 to 1187.
//! - **Humidity / Temperature**: value × 512 (`0x6400` = 50 %RH).
//!
//! ## Example
//! ```rust
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
//! # let expectations = [
//! #     Transaction::transaction_start(0x5A),
//! #     Transaction::write(0x5A, vec![0xFF]),
//! #     Transaction::write(0x5A, vec![0x11, 0xE5, 0x72, 0x8A]),
//! #     Transaction::transaction_end(0x5A),
//! #     Transaction::write_read(0x5A, vec![0x20], vec![0x81]),
//! #     Transaction::write_read(0x5A, vec![0x21], vec![0x12]),
//! #     Transaction::write_read(0x5A, vec![0x00], vec![0x10]),
//! #     Transaction::transaction_start(0x5A),
//! #     Transaction::write(0x5A, vec![0xF4]),
//! #     Transaction::transaction_end(0x5A),
//! #     Transaction::write_read(0x5A, vec![0x00], vec![0x90]),
//! #     Transaction::transaction_start(0x5A),
//! #     Transaction::write(0x5A, vec![0x01]),
//! #     Transaction::write(0x5A, vec![0x10]),
//! #     Transaction::transaction_end(0x5A),
//! #     Transaction::write_read(0x5A, vec![0x02], vec![0x01, 0x90, 0x00, 0x64, 0x98]),
//! # ];
//! # let i2c = I2cMock::new(&expectations);
//! # let delay = NoopDelay::new();
//! use ccs811_driver::{Ccs811, I2cTransport, MeasurementMode, DEFAULT_ADDRESS};
//!
//! let transport = I2cTransport::new(i2c, delay);
//! let mut sensor = Ccs811::new(transport, DEFAULT_ADDRESS).init()?;
//!
//! sensor.set_mode(MeasurementMode::Every1s)?;
//! let measurement = sensor.refresh_data()?;
//! assert_eq!(measurement.eco2, 400);
//! assert_eq!(measurement.tvoc, 100);
//! # let (mut i2c, _) = sensor.release().release();
//! # i2c.done();
//! # Ok::<(), ccs811_driver::error::Ccs811Error<embedded_hal::i2c::ErrorKind>>(())
//! ```

mod data;
mod registers;
mod settings;
mod transport;

use core::marker::PhantomData;

pub use data::{
    decode_baseline, encode_baseline, encode_env_data, AlgorithmResult, FirmwareMode,
    FirmwareVersion, Measurement, RawData, Status,
};
pub use registers::{ALTERNATE_ADDRESS, DEFAULT_ADDRESS};
pub use settings::{Config, ConfigBuilder, EnvironmentData, MeasurementMode};
pub use transport::{I2cTransport, Transport};

use registers::len;

// --- Typestates ---

/// Sensor has been created (or reset) but not yet switched to application mode.
#[derive(Debug)]
pub struct Uninitialized;
/// Sensor is running application firmware and accepts measurement commands.
#[derive(Debug)]
pub struct Ready;

/// Error types for the CCS811 driver.
pub mod error {
    use core::fmt;

    /// Errors reported by driver operations.
    ///
    /// Every operation reports the first failure it meets and issues no
    /// further bus transactions for that call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Ccs811Error<E> {
        /// Bus transaction failed (NACK, timeout, ...). Retryable.
        IoError(E),
        /// `HW_ID` or `HW_VERSION` did not match a CCS811.
        /// Wrong address or no device; retrying will not help.
        NotFound,
        /// The status register did not hold the expected value at a
        /// checkpoint. A full re-initialization may be attempted.
        InvalidState,
        /// The chip flagged an internal fault. See `sensor_error()`.
        SensorError,
        /// No new sample since the last read. The decoded values were
        /// still committed; wait and read again.
        StaleData,
    }

    /// Result type alias for CCS811 operations.
    pub type Result<T, E> = core::result::Result<T, Ccs811Error<E>>;

    impl<E: fmt::Debug> fmt::Display for Ccs811Error<E> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                Ccs811Error::IoError(e) => write!(f, "I/O error: {:?}", e),
                Ccs811Error::NotFound => write!(f, "CCS811 not found (identity mismatch)"),
                Ccs811Error::InvalidState => write!(f, "CCS811 in unexpected firmware state"),
                Ccs811Error::SensorError => write!(f, "CCS811 reported a sensor error"),
                Ccs811Error::StaleData => write!(f, "no new data available"),
            }
        }
    }

    #[cfg(feature = "defmt")]
    impl<E: defmt::Format> defmt::Format for Ccs811Error<E> {
        fn format(&self, f: defmt::Formatter) {
            match self {
                Ccs811Error::IoError(e) => defmt::write!(f, "I/O error: {}", e),
                Ccs811Error::NotFound => defmt::write!(f, "CCS811 not found"),
                Ccs811Error::InvalidState => defmt::write!(f, "Invalid state"),
                Ccs811Error::SensorError => defmt::write!(f, "Sensor error"),
                Ccs811Error::StaleData => defmt::write!(f, "Stale data"),
            }
        }
    }

    /// A failed state transition.
    ///
    /// Carries the device back in its `Uninitialized` state so the caller can
    /// retry or release the bus. Converts into [`Ccs811Error`] with `?`.
    pub struct TransitionError<D, E> {
        pub device: D,
        pub error: Ccs811Error<E>,
    }

    impl<D, E> TransitionError<D, E> {
        /// Splits into the device and the error.
        pub fn into_parts(self) -> (D, Ccs811Error<E>) {
            (self.device, self.error)
        }
    }

    impl<D, E> From<TransitionError<D, E>> for Ccs811Error<E> {
        fn from(e: TransitionError<D, E>) -> Self {
            e.error
        }
    }

    impl<D, E: fmt::Debug> fmt::Debug for TransitionError<D, E> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.debug_struct("TransitionError")
                .field("error", &self.error)
                .finish_non_exhaustive()
        }
    }
}

/// The main CCS811 driver structure.
///
/// Use `Ccs811::new(...)` to start. The `STATE` generic uses the Typestate
/// pattern to track the chip's firmware mode at compile time.
///
/// The handle caches the last committed eCO2/TVOC pair; the accessors
/// [`co2`](Ccs811::co2) and [`tvoc`](Ccs811::tvoc) never touch the bus.
#[derive(Debug)]
pub struct Ccs811<T, STATE> {
    transport: T,
    address: u8,
    eco2: u16,
    tvoc: u16,
    _state: PhantomData<STATE>,
}

impl<T, E> Ccs811<T, Uninitialized>
where
    T: Transport<Error = E>,
{
    /// Creates a new driver instance in the `Uninitialized` state.
    ///
    /// This does not communicate with the sensor yet.
    ///
    /// # Arguments
    /// * `transport` - Register access to the bus, e.g. [`I2cTransport`].
    /// * `address` - The 7-bit bus address (`0x5A` or `0x5B`).
    pub fn new(transport: T, address: u8) -> Self {
        Ccs811 {
            transport,
            address,
            eco2: 0,
            tvoc: 0,
            _state: PhantomData,
        }
    }

    /// Resets the chip and starts its application firmware.
    ///
    /// Sequence, each step gated on the previous one:
    /// 1. Software reset, then wait 2 ms.
    /// 2. `HW_ID` must read `0x81`, `HW_VERSION` must read `0x1X`.
    /// 3. `STATUS` must read `0x10` (boot mode, valid app).
    /// 4. `APP_START`, then wait 1 ms.
    /// 5. `STATUS` must read `0x90` (application running).
    ///
    /// This transitions the driver state from `Uninitialized` to `Ready`.
    ///
    /// # Errors
    /// * [`IoError`](error::Ccs811Error::IoError) if any bus transaction fails.
    /// * [`NotFound`](error::Ccs811Error::NotFound) on an identity mismatch.
    /// * [`InvalidState`](error::Ccs811Error::InvalidState) if a status
    ///   checkpoint does not match.
    ///
    /// On failure the device is handed back inside the error.
    pub fn init(
        mut self,
    ) -> core::result::Result<Ccs811<T, Ready>, error::TransitionError<Self, E>> {
        match self.start_application() {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("ccs811: application firmware running");
                Ok(self.into_state())
            }
            Err(error) => Err(error::TransitionError {
                device: self,
                error,
            }),
        }
    }

    fn start_application(&mut self) -> error::Result<(), E> {
        self.software_reset()?;

        let hw_id = self.read_reg_byte(registers::HW_ID)?;
        if hw_id != registers::EXPECTED_HW_ID {
            #[cfg(feature = "defmt")]
            defmt::debug!("ccs811: unexpected HW_ID {=u8:#x}", hw_id);
            return Err(error::Ccs811Error::NotFound);
        }

        let hw_version = self.read_reg_byte(registers::HW_VERSION)?;
        if hw_version & registers::HW_VERSION_MASK != registers::EXPECTED_HW_VERSION {
            #[cfg(feature = "defmt")]
            defmt::debug!("ccs811: unexpected HW_VERSION {=u8:#x}", hw_version);
            return Err(error::Ccs811Error::NotFound);
        }

        self.expect_status(registers::STATUS_BOOT_READY)?;

        self.write_reg(registers::APP_START, &[])?;
        self.transport.delay_ms(registers::APP_START_DELAY_MS);

        self.expect_status(registers::STATUS_APP_RUNNING)
    }

    /// Reads `STATUS` and compares it with a checkpoint value.
    fn expect_status(&mut self, expected: u8) -> error::Result<(), E> {
        let status = self.read_reg_byte(registers::STATUS)?;
        if status != expected {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "ccs811: STATUS {=u8:#x}, expected {=u8:#x}",
                status,
                expected
            );
            return Err(error::Ccs811Error::InvalidState);
        }
        Ok(())
    }
}

impl<T, STATE, E> Ccs811<T, STATE>
where
    T: Transport<Error = E>,
{
    /// The bus address this handle talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Reads `HW_ID` (expected value: 0x81).
    pub fn hardware_id(&mut self) -> error::Result<u8, E> {
        self.read_reg_byte(registers::HW_ID)
    }

    /// Reads `HW_VERSION` (expected value: 0x1X).
    pub fn hardware_version(&mut self) -> error::Result<u8, E> {
        self.read_reg_byte(registers::HW_VERSION)
    }

    /// Reads the bootloader firmware version.
    pub fn firmware_boot_version(&mut self) -> error::Result<FirmwareVersion, E> {
        let mut buffer = [0u8; len::FW_VERSION];
        self.read_into(registers::FW_BOOT_VERSION, &mut buffer)?;
        Ok(FirmwareVersion::decode(&buffer))
    }

    /// Reads the application firmware version.
    pub fn firmware_app_version(&mut self) -> error::Result<FirmwareVersion, E> {
        let mut buffer = [0u8; len::FW_VERSION];
        self.read_into(registers::FW_APP_VERSION, &mut buffer)?;
        Ok(FirmwareVersion::decode(&buffer))
    }

    /// Reads and decodes the status register.
    pub fn status(&mut self) -> error::Result<Status, E> {
        Ok(Status(self.read_reg_byte(registers::STATUS)?))
    }

    /// Destroys the driver and returns the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Writes the reset sequence and waits out the settle time.
    ///
    /// The chip returns to boot mode. No transaction may be issued before
    /// the 2 ms delay has elapsed.
    fn software_reset(&mut self) -> error::Result<(), E> {
        self.write_reg(registers::SW_RESET, &registers::SW_RESET_SEQUENCE)?;

        self.transport.delay_ms(registers::RESET_DELAY_MS);

        Ok(())
    }

    /// Reads data from a register into a provided buffer.
    fn read_into(&mut self, register: u8, buffer: &mut [u8]) -> error::Result<(), E> {
        self.transport
            .read(self.address, register, buffer)
            .map_err(error::Ccs811Error::IoError)
    }

    /// Reads a single byte from a register.
    fn read_reg_byte(&mut self, register: u8) -> error::Result<u8, E> {
        let mut buffer = [0];
        self.read_into(register, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Writes a payload to a register. An empty payload sends the address only.
    fn write_reg(&mut self, register: u8, payload: &[u8]) -> error::Result<(), E> {
        self.transport
            .write(self.address, register, payload)
            .map_err(error::Ccs811Error::IoError)
    }

    fn into_state<S>(self) -> Ccs811<T, S> {
        Ccs811 {
            transport: self.transport,
            address: self.address,
            eco2: self.eco2,
            tvoc: self.tvoc,
            _state: PhantomData,
        }
    }
}

impl<T, E> Ccs811<T, Ready>
where
    T: Transport<Error = E>,
{
    /// Applies a full configuration.
    ///
    /// Restores the baseline (if any), then writes the compensation data
    /// (if any), then sets the measurement mode. Stops at the first failure.
    pub fn configure(&mut self, config: &Config) -> error::Result<(), E> {
        if let Some(token) = config.baseline {
            self.set_baseline(token)?;
        }

        if let Some(env) = config.environment {
            self.set_environment(env)?;
        }

        self.set_mode(config.mode)
    }

    /// Sets the sampling cadence.
    ///
    /// A single write; there is no read-back.
    pub fn set_mode(&mut self, mode: MeasurementMode) -> error::Result<(), E> {
        self.write_reg(registers::MEAS_MODE, &[mode.register_value()])
    }

    /// Reads `ALG_RESULT_DATA` and updates the cached measurement.
    ///
    /// # Commit policy
    /// - Error bit set: returns `SensorError`, the cache is left untouched.
    /// - Otherwise the decoded eCO2/TVOC are committed.
    /// - Data-ready bit clear: returns `StaleData` even though the values
    ///   were committed.
    ///
    /// A bus failure returns `IoError` with no change to the cache.
    pub fn refresh_data(&mut self) -> error::Result<Measurement, E> {
        let mut buffer = [0u8; len::ALG_RESULT_DATA];
        self.read_into(registers::ALG_RESULT_DATA, &mut buffer)?;

        let result = AlgorithmResult::decode(&buffer);

        if result.status.has_error() {
            return Err(error::Ccs811Error::SensorError);
        }

        self.eco2 = result.eco2;
        self.tvoc = result.tvoc;

        if !result.status.data_ready() {
            return Err(error::Ccs811Error::StaleData);
        }

        Ok(self.measurement())
    }

    /// Last committed eCO2 in ppm.
    pub fn co2(&self) -> u16 {
        self.eco2
    }

    /// Last committed TVOC in ppb.
    pub fn tvoc(&self) -> u16 {
        self.tvoc
    }

    /// Last committed measurement; no bus access.
    pub fn measurement(&self) -> Measurement {
        Measurement {
            eco2: self.eco2,
            tvoc: self.tvoc,
        }
    }

    /// Reads the current baseline token.
    ///
    /// The value is opaque. Save it and hand it back to
    /// [`set_baseline`](Self::set_baseline) after a power cycle.
    pub fn baseline(&mut self) -> error::Result<u16, E> {
        let mut buffer = [0u8; len::BASELINE];
        self.read_into(registers::BASELINE, &mut buffer)?;
        Ok(data::decode_baseline(&buffer))
    }

    /// Writes a previously saved baseline token.
    pub fn set_baseline(&mut self, token: u16) -> error::Result<(), E> {
        self.write_reg(registers::BASELINE, &data::encode_baseline(token))
    }

    /// Writes humidity and temperature compensation.
    ///
    /// # Arguments
    /// * `humidity` - Relative humidity in % × 512 (`0x6400` = 50 %).
    /// * `temperature` - Temperature in °C × 512, without any offset.
    ///   The +25 °C wire offset is added by the driver.
    pub fn set_env_data(&mut self, humidity: u16, temperature: i16) -> error::Result<(), E> {
        self.write_reg(
            registers::ENV_DATA,
            &data::encode_env_data(humidity, temperature),
        )
    }

    /// Same as [`set_env_data`](Self::set_env_data) for an [`EnvironmentData`].
    pub fn set_environment(&mut self, env: EnvironmentData) -> error::Result<(), E> {
        self.set_env_data(env.humidity, env.temperature)
    }

    /// Reads `ERROR_ID`.
    ///
    /// The byte is returned verbatim; see the datasheet's error table.
    pub fn sensor_error(&mut self) -> error::Result<u8, E> {
        self.read_reg_byte(registers::ERROR_ID)
    }

    /// Reads the raw sensor current and voltage.
    pub fn raw_data(&mut self) -> error::Result<RawData, E> {
        let mut buffer = [0u8; len::RAW_DATA];
        self.read_into(registers::RAW_DATA, &mut buffer)?;
        Ok(RawData::decode(&buffer))
    }

    /// Performs a software reset, returning the chip to boot mode.
    ///
    /// The cached measurement is kept. Call `init()` on the returned handle
    /// to resume measuring. If the reset write fails the handle is still
    /// returned (inside the error) as `Uninitialized`, since the chip's
    /// firmware state is then unknown.
    pub fn reset(
        mut self,
    ) -> core::result::Result<
        Ccs811<T, Uninitialized>,
        error::TransitionError<Ccs811<T, Uninitialized>, E>,
    > {
        match self.software_reset() {
            Ok(()) => Ok(self.into_state()),
            Err(error) => Err(error::TransitionError {
                device: self.into_state(),
                error,
            }),
        }
    }
}
