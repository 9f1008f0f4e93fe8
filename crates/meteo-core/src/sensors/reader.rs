use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::warn;

use crate::config::StationConfig;
use crate::sensors::{Bmp180, Htu21d, PressureReading, Sensor, SensorError};

/// Outcome of one sensor pass. Each field fails independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSnapshot {
    pub pressure: Result<PressureReading, SensorError>,
    pub humidity: Result<i16, SensorError>,
}

impl SensorSnapshot {
    pub fn has_fault(&self) -> bool {
        self.pressure.is_err() || self.humidity.is_err()
    }
}

/// Owns both station sensors and runs their register sequences.
///
/// The two sensors may sit on separate buses or share one through a bus
/// sharing device such as `embedded_hal_bus::i2c::RefCellDevice`.
pub struct SensorReader<P, H> {
    pressure: Bmp180<P>,
    humidity: Htu21d<H>,
}

impl<P: I2c, H: I2c> SensorReader<P, H> {
    pub fn new(pressure_i2c: P, humidity_i2c: H, config: &StationConfig) -> Self {
        Self {
            pressure: Bmp180::new(pressure_i2c, config.pressure_address, config.oversampling),
            humidity: Htu21d::new(
                humidity_i2c,
                config.humidity_address,
                config.humidity_settle_ms,
            ),
        }
    }

    /// Read pressure, then humidity.
    ///
    /// A failure of one sensor does not skip the other. There is no retry;
    /// the next call attempts a fresh read.
    pub fn read_all<D: DelayNs>(&mut self, delay: &mut D) -> SensorSnapshot {
        let pressure = self.pressure.read(delay);
        if let Err(e) = &pressure {
            warn!("Pressure read failed: {}", e);
        }

        let humidity = self.humidity.read(delay);
        if let Err(e) = &humidity {
            warn!("Humidity read failed: {}", e);
        }

        SensorSnapshot { pressure, humidity }
    }

    pub fn release(self) -> (P, H) {
        (self.pressure.release(), self.humidity.release())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBus, RecordingDelay};
    use core::cell::RefCell;
    use embedded_hal_bus::i2c::RefCellDevice;

    #[test]
    fn test_shared_bus_reads_both_sensors() {
        let bus = RefCell::new(FakeBus::new());
        bus.borrow_mut().htu21d.raw = 0x6850;
        let config = StationConfig::default();
        let mut reader =
            SensorReader::new(RefCellDevice::new(&bus), RefCellDevice::new(&bus), &config);
        let mut delay = RecordingDelay::new();

        let snapshot = reader.read_all(&mut delay);

        assert_eq!(
            snapshot.pressure,
            Ok(PressureReading {
                pressure_pa: 69963,
                temperature_decicelsius: 150,
            })
        );
        assert_eq!(snapshot.humidity, Ok(44));
        assert!(!snapshot.has_fault());
        assert_eq!(delay.calls_ms(), [5, 14, 13]);
    }

    #[test]
    fn test_pressure_failure_does_not_skip_humidity() {
        let bus = RefCell::new(FakeBus::new());
        bus.borrow_mut().bmp180.set_chip_id(0x00);
        bus.borrow_mut().htu21d.raw = 0x8000;
        let config = StationConfig::default();
        let mut reader =
            SensorReader::new(RefCellDevice::new(&bus), RefCellDevice::new(&bus), &config);
        let mut delay = RecordingDelay::new();

        let snapshot = reader.read_all(&mut delay);

        assert!(matches!(
            snapshot.pressure,
            Err(SensorError::VerificationFailed { found: 0x00, .. })
        ));
        assert_eq!(snapshot.humidity, Ok(56));
        assert!(snapshot.has_fault());
    }
}
