//! Bus transport capability used by the protocol engine.
//!
//! The driver never talks to a bus directly. It issues register writes,
//! register reads and blocking delays through [`Transport`], so the same
//! state machine runs on any host that can provide those three primitives.
//! [`I2cTransport`] is the ready-made binding for `embedded-hal` 1.0.

use embedded_hal::{
    delay::DelayNs,
    i2c::{self, Operation},
};

/// Register-level access to a device on a two-wire addressable bus.
pub trait Transport {
    /// Error reported by the underlying bus.
    type Error;

    /// Writes `register` followed immediately by `payload` in a single
    /// addressed transaction. An empty payload is an address-only command.
    fn write(&mut self, address: u8, register: u8, payload: &[u8]) -> Result<(), Self::Error>;

    /// Writes `register` without a stop condition, then reads
    /// `buffer.len()` bytes from the device.
    fn read(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Blocks for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// [`Transport`] implementation over an `embedded-hal` I2C bus and delay.
#[derive(Debug)]
pub struct I2cTransport<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> I2cTransport<I2C, D>
where
    I2C: i2c::I2c,
    D: DelayNs,
{
    /// Wraps an I2C bus and a delay provider.
    ///
    /// # Arguments
    /// * `i2c` - The I2C bus object (taken by value for exclusive access).
    /// * `delay` - Any blocking `DelayNs` implementation.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Returns the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Transport for I2cTransport<I2C, D>
where
    I2C: i2c::I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn write(&mut self, address: u8, register: u8, payload: &[u8]) -> Result<(), Self::Error> {
        if payload.is_empty() {
            return self.i2c.transaction(address, &mut [Operation::Write(&[register])]);
        }

        // Adjacent write operations go out as one write with no restart
        // between them, so the chip sees [register, payload...].
        self.i2c.transaction(
            address,
            &mut [Operation::Write(&[register]), Operation::Write(payload)],
        )
    }

    fn read(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], buffer)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
