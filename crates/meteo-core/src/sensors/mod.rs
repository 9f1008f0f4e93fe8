pub mod bmp180;
pub mod htu21d;
mod reader;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::ErrorKind;
use thiserror_no_std::Error;

pub use bmp180::{Bmp180, PressureReading};
pub use htu21d::Htu21d;
pub use reader::{SensorReader, SensorSnapshot};

/// A two-wire transaction that failed at the bus layer (device absent, NACK,
/// arbitration loss, ...).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("I2C transaction with device {address:#04x} failed: {kind:?}")]
pub struct BusError {
    pub address: u8,
    pub kind: ErrorKind,
}

impl BusError {
    pub fn from_i2c<E: embedded_hal::i2c::Error>(address: u8, error: &E) -> Self {
        Self {
            address,
            kind: error.kind(),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("{sensor}: {operation} failed: {error}")]
    Bus {
        sensor: &'static str,
        operation: &'static str,
        error: BusError,
    },
    #[error("{sensor}: verification register read back {found:#04x}, expected {expected:#04x}")]
    VerificationFailed {
        sensor: &'static str,
        expected: u8,
        found: u8,
    },
    #[error("{sensor}: calibration data yields a zero divisor")]
    InvalidCalibration { sensor: &'static str },
}

/// Trait for sensors that produce typed readings.
///
/// Reads are blocking: the implementation issues its register sequence and
/// waits out the conversion times on `delay` before returning.
pub trait Sensor {
    /// The type of readings this sensor produces.
    type Readings;

    /// Run one complete measurement.
    fn read<D: DelayNs>(&mut self, delay: &mut D) -> Result<Self::Readings, SensorError>;
}
