//! BMP180 barometric pressure / temperature sensor.
//!
//! One measurement is a fixed register sequence:
//! 1. read the eleven calibration words (0xAA..=0xBF)
//! 2. verify the chip-id register reads back 0x55
//! 3. start a temperature conversion, wait 5 ms, read two result bytes
//! 4. start a pressure conversion, wait for the oversampling settle time,
//!    read three result bytes
//!
//! Every register access is a one-byte register select followed by a
//! fixed-length read.

mod calibration;
pub mod config;
pub mod registers;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, error};

use crate::sensors::{BusError, Sensor, SensorError};

pub use calibration::{CalibrationCoefficients, PressureReading, RawMeasurement, compensate_pressure};
pub use config::{Oversampling, TEMPERATURE_SETTLE_MS};
use registers::{BMP180_CHIP_ID, Bmp180Register, CALIBRATION_REGISTERS, TEMPERATURE_COMMAND};

const SENSOR_NAME: &str = "BMP180";

pub struct Bmp180<I> {
    i2c: I,
    address: u8,
    oversampling: Oversampling,
}

impl<I: I2c> Bmp180<I> {
    pub fn new(i2c: I, address: u8, oversampling: Oversampling) -> Self {
        Self {
            i2c,
            address,
            oversampling,
        }
    }

    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }

    /// Give the bus device back.
    pub fn release(self) -> I {
        self.i2c
    }

    /// Select `register` and read `N` bytes from it.
    fn read_register<const N: usize>(
        &mut self,
        register: Bmp180Register,
        operation: &'static str,
    ) -> Result<[u8; N], SensorError> {
        let address = self.address;
        let mut buffer = [0u8; N];
        self.i2c
            .write_read(address, &[register as u8], &mut buffer)
            .map_err(|e| {
                error!("{} {} failed: {:?}", SENSOR_NAME, operation, e);
                bus_error(address, operation, &e)
            })?;
        Ok(buffer)
    }

    /// Write a conversion command to the control register.
    fn start_conversion(&mut self, command: u8, operation: &'static str) -> Result<(), SensorError> {
        let address = self.address;
        self.i2c
            .write(address, &[Bmp180Register::Control as u8, command])
            .map_err(|e| {
                error!("{} {} failed: {:?}", SENSOR_NAME, operation, e);
                bus_error(address, operation, &e)
            })
    }

    /// Read the factory calibration block, one word per register.
    pub fn read_calibration(&mut self) -> Result<CalibrationCoefficients, SensorError> {
        let mut words = [0u16; 11];
        for (word, register) in words.iter_mut().zip(CALIBRATION_REGISTERS) {
            let bytes = self.read_register::<2>(register, "read calibration")?;
            *word = u16::from_be_bytes(bytes);
        }
        Ok(CalibrationCoefficients::from_words(words))
    }

    /// Confirm the link is alive before trusting calibration data.
    pub fn verify(&mut self) -> Result<(), SensorError> {
        let [found] = self.read_register::<1>(Bmp180Register::ChipId, "read chip id")?;
        if found != BMP180_CHIP_ID {
            error!(
                "{} chip id mismatch: read {:#04x}, expected {:#04x}",
                SENSOR_NAME, found, BMP180_CHIP_ID
            );
            return Err(SensorError::VerificationFailed {
                sensor: SENSOR_NAME,
                expected: BMP180_CHIP_ID,
                found,
            });
        }
        Ok(())
    }

    /// Run the temperature and pressure conversions and return the raw results.
    ///
    /// Both settle delays elapse in full; the result register is not valid
    /// before that.
    pub fn read_raw<D: DelayNs>(&mut self, delay: &mut D) -> Result<RawMeasurement, SensorError> {
        self.start_conversion(TEMPERATURE_COMMAND, "start temperature conversion")?;
        delay.delay_ms(TEMPERATURE_SETTLE_MS);
        let ut = u16::from_be_bytes(
            self.read_register::<2>(Bmp180Register::Result, "read temperature result")?,
        );

        self.start_conversion(
            self.oversampling.control_value(),
            "start pressure conversion",
        )?;
        delay.delay_ms(self.oversampling.settle_ms());
        let bytes = self.read_register::<3>(Bmp180Register::Result, "read pressure result")?;
        let up = RawMeasurement::pressure_from_bytes(bytes, self.oversampling);

        debug!("{} raw ut={} up={}", SENSOR_NAME, ut, up);
        Ok(RawMeasurement { ut, up })
    }
}

fn bus_error<E: embedded_hal::i2c::Error>(
    address: u8,
    operation: &'static str,
    error: &E,
) -> SensorError {
    SensorError::Bus {
        sensor: SENSOR_NAME,
        operation,
        error: BusError::from_i2c(address, error),
    }
}

impl<I: I2c> Sensor for Bmp180<I> {
    type Readings = PressureReading;

    fn read<D: DelayNs>(&mut self, delay: &mut D) -> Result<PressureReading, SensorError> {
        let calibration = self.read_calibration()?;
        self.verify()?;
        let raw = self.read_raw(delay)?;
        compensate_pressure(&calibration, raw, self.oversampling)
    }
}
