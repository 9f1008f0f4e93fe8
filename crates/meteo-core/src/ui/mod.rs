//! Display geometry, page identifiers and the events pages react to.

pub mod text;

use crate::clock::DateTime;
use crate::navigation::CursorState;
use crate::sensors::SensorSnapshot;

/// Monochrome OLED, 96×64 pixels.
pub const DISPLAY_WIDTH_PX: u32 = 96;
pub const DISPLAY_HEIGHT_PX: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageId {
    Readout,
    ClockEditor,
}

impl PageId {
    /// The other page. The station only ever flips between two.
    pub const fn toggled(self) -> Self {
        match self {
            PageId::Readout => PageId::ClockEditor,
            PageId::ClockEditor => PageId::Readout,
        }
    }
}

/// Last known-good sensor values plus per-field fault flags.
///
/// A failed read never overwrites a value; it only raises the fault flag
/// for that field until the next successful read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Readings {
    pub temperature_decicelsius: Option<i32>,
    pub pressure_pa: Option<i32>,
    pub humidity_percent: Option<i16>,
    pub pressure_fault: bool,
    pub humidity_fault: bool,
}

impl Readings {
    /// Fold one sensor pass in. Returns `true` if anything visible changed.
    pub fn apply(&mut self, snapshot: &SensorSnapshot) -> bool {
        let before = *self;

        match snapshot.pressure {
            Ok(reading) => {
                self.pressure_pa = Some(reading.pressure_pa);
                self.temperature_decicelsius = Some(reading.temperature_decicelsius);
                self.pressure_fault = false;
            }
            Err(_) => self.pressure_fault = true,
        }

        match snapshot.humidity {
            Ok(humidity) => {
                self.humidity_percent = Some(humidity);
                self.humidity_fault = false;
            }
            Err(_) => self.humidity_fault = true,
        }

        *self != before
    }
}

/// Events dispatched to the active page before it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    SensorUpdate(Readings),
    ClockUpdate(DateTime),
    CursorMoved {
        from: CursorState,
        to: CursorState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{PressureReading, SensorError};

    fn good_snapshot() -> SensorSnapshot {
        SensorSnapshot {
            pressure: Ok(PressureReading {
                pressure_pa: 101_325,
                temperature_decicelsius: 215,
            }),
            humidity: Ok(44),
        }
    }

    #[test]
    fn test_apply_stores_good_values() {
        let mut readings = Readings::default();

        assert!(readings.apply(&good_snapshot()));
        assert_eq!(readings.pressure_pa, Some(101_325));
        assert_eq!(readings.temperature_decicelsius, Some(215));
        assert_eq!(readings.humidity_percent, Some(44));

        assert!(!readings.apply(&good_snapshot()), "same values, no change");
    }

    #[test]
    fn test_failure_keeps_last_good_value() {
        let mut readings = Readings::default();
        readings.apply(&good_snapshot());

        let failed = SensorSnapshot {
            pressure: Err(SensorError::VerificationFailed {
                sensor: "BMP180",
                expected: 0x55,
                found: 0xFF,
            }),
            humidity: Ok(45),
        };
        assert!(readings.apply(&failed));

        assert_eq!(readings.pressure_pa, Some(101_325));
        assert_eq!(readings.temperature_decicelsius, Some(215));
        assert!(readings.pressure_fault);
        assert_eq!(readings.humidity_percent, Some(45));
        assert!(!readings.humidity_fault);

        readings.apply(&good_snapshot());
        assert!(!readings.pressure_fault, "cleared by the next good read");
    }

    #[test]
    fn test_page_toggle() {
        assert_eq!(PageId::Readout.toggled(), PageId::ClockEditor);
        assert_eq!(PageId::Readout.toggled().toggled(), PageId::Readout);
    }
}
