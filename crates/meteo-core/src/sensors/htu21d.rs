//! HTU21D relative humidity sensor (no-hold-master measurement).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, error};

use crate::sensors::{BusError, Sensor, SensorError};

const SENSOR_NAME: &str = "HTU21D";

/// Default 7-bit bus address.
pub const HTU21D_ADDRESS: u8 = 0x40;

/// Trigger a humidity measurement without holding the bus clock.
pub const TRIGGER_HUMIDITY_NO_HOLD: u8 = 0xF5;

/// The two low bits of the result carry status, not data.
pub const STATUS_BITS_MASK: u16 = 0xFFFC;

/// Default settle time between the trigger and the result read.
pub const HUMIDITY_SETTLE_MS: u32 = 13;

/// Convert a raw humidity word into whole %RH, clamped to `0..=100`.
///
/// `rh = -6 + 125 * srh / 65536` with the status bits cleared first. The
/// result is monotonically non-decreasing in `raw`.
pub fn compensate_humidity(raw: u16) -> i16 {
    let srh = (raw & STATUS_BITS_MASK) as i32;
    let rh = -6 + 125 * srh / 65536;
    rh.clamp(0, 100) as i16
}

pub struct Htu21d<I> {
    i2c: I,
    address: u8,
    settle_ms: u32,
}

impl<I: I2c> Htu21d<I> {
    pub fn new(i2c: I, address: u8, settle_ms: u32) -> Self {
        Self {
            i2c,
            address,
            settle_ms,
        }
    }

    /// Give the bus device back.
    pub fn release(self) -> I {
        self.i2c
    }

    /// Trigger a conversion, wait it out and return the raw result word.
    pub fn read_raw<D: DelayNs>(&mut self, delay: &mut D) -> Result<u16, SensorError> {
        let address = self.address;
        self.i2c
            .write(address, &[TRIGGER_HUMIDITY_NO_HOLD])
            .map_err(|e| {
                error!("{} trigger failed: {:?}", SENSOR_NAME, e);
                bus_error(address, "trigger humidity measurement", &e)
            })?;

        delay.delay_ms(self.settle_ms);

        let mut buffer = [0u8; 2];
        self.i2c.read(address, &mut buffer).map_err(|e| {
            error!("{} result read failed: {:?}", SENSOR_NAME, e);
            bus_error(address, "read humidity result", &e)
        })?;

        let raw = u16::from_be_bytes(buffer);
        debug!("{} raw srh={:#06x}", SENSOR_NAME, raw);
        Ok(raw)
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

impl<I: I2c> Sensor for Htu21d<I> {
    /// Relative humidity in whole percent.
    type Readings = i16;

    fn read<D: DelayNs>(&mut self, delay: &mut D) -> Result<i16, SensorError> {
        self.read_raw(delay).map(compensate_humidity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBus, RecordingDelay};
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

    #[test]
    fn test_compensation_reference_points() {
        assert_eq!(compensate_humidity(0x1000), 1);
        assert_eq!(compensate_humidity(0x6850), 44);
        assert_eq!(compensate_humidity(0x8000), 56);
    }

    #[test]
    fn test_compensation_clamps_to_percent_range() {
        assert_eq!(compensate_humidity(0x0000), 0, "-6 %RH clamps to 0");
        assert_eq!(compensate_humidity(0xFFFC), 100, "118 %RH clamps to 100");
    }

    #[test]
    fn test_status_bits_are_ignored() {
        assert_eq!(compensate_humidity(0x6853), compensate_humidity(0x6850));
    }

    #[test]
    fn test_compensation_is_monotonic_and_bounded() {
        let mut previous = compensate_humidity(0);
        for raw in (0..=u16::MAX).step_by(7) {
            let rh = compensate_humidity(raw);
            assert!((0..=100).contains(&rh), "rh {} out of range for {:#06x}", rh, raw);
            assert!(rh >= previous, "not monotonic at {:#06x}", raw);
            previous = rh;
        }
    }

    #[test]
    fn test_read_waits_for_settle_time() {
        let mut bus = FakeBus::new();
        bus.htu21d.raw = 0x6850;
        let mut sensor = Htu21d::new(bus, HTU21D_ADDRESS, HUMIDITY_SETTLE_MS);
        let mut delay = RecordingDelay::new();

        assert_eq!(sensor.read(&mut delay), Ok(44));
        assert_eq!(delay.calls_ms(), [13]);
        assert_eq!(sensor.release().htu21d.triggers, 1);
    }

    #[test]
    fn test_failed_trigger_is_error_not_zero() {
        let mut bus = FakeBus::new();
        bus.htu21d.present = false;
        let mut sensor = Htu21d::new(bus, HTU21D_ADDRESS, HUMIDITY_SETTLE_MS);
        let mut delay = RecordingDelay::new();

        assert_eq!(
            sensor.read(&mut delay),
            Err(SensorError::Bus {
                sensor: "HTU21D",
                operation: "trigger humidity measurement",
                error: BusError {
                    address: HTU21D_ADDRESS,
                    kind: ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
                },
            })
        );
        assert!(delay.calls_ms().is_empty());
    }
}
