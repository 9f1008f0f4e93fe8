//! BMP180 calibration coefficients and the fixed-point compensation formula.
//!
//! The arithmetic follows the datasheet's integer algorithm (BST-BMP180-DS000,
//! section 3.5 "Calculating pressure and temperature") step by step. Truncating
//! shifts and divisions make the result order-sensitive, so every intermediate
//! keeps the datasheet's 32-bit width and signedness. Wrapping operations give
//! the same two's-complement results as the reference C code without panicking
//! on garbage calibration data.

use crate::sensors::SensorError;
use crate::sensors::bmp180::config::Oversampling;

const SENSOR_NAME: &str = "BMP180";

/// Factory-trimmed calibration coefficients.
///
/// Loaded from the eleven big-endian words at 0xAA..=0xBF. They are re-read
/// on every measurement and never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalibrationCoefficients {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    /// Stored one above the register value; the station has always applied
    /// this offset. `mb` does not enter the pressure formula.
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl CalibrationCoefficients {
    /// Build the coefficient set from the raw register words, in register
    /// order (`ac1` first, `md` last).
    pub fn from_words(words: [u16; 11]) -> Self {
        Self {
            ac1: words[0] as i16,
            ac2: words[1] as i16,
            ac3: words[2] as i16,
            ac4: words[3],
            ac5: words[4],
            ac6: words[5],
            b1: words[6] as i16,
            b2: words[7] as i16,
            mb: (words[8] as i16).wrapping_add(1),
            mc: words[9] as i16,
            md: words[10] as i16,
        }
    }
}

/// Uncompensated conversion results, consumed immediately by
/// [`compensate_pressure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMeasurement {
    /// Uncompensated temperature (16 bit).
    pub ut: u16,
    /// Uncompensated pressure, already shifted right by `8 - oss`.
    pub up: i32,
}

impl RawMeasurement {
    /// Assemble `up` from the three result bytes (MSB, LSB, XLSB).
    pub fn pressure_from_bytes(bytes: [u8; 3], oversampling: Oversampling) -> i32 {
        let raw = ((bytes[0] as i32) << 16) | ((bytes[1] as i32) << 8) | bytes[2] as i32;
        raw >> (8 - oversampling.oss())
    }
}

/// Compensated output of one BMP180 measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressureReading {
    /// Pressure in Pa.
    pub pressure_pa: i32,
    /// Temperature in 0.1 °C.
    pub temperature_decicelsius: i32,
}

/// Convert raw conversion results into Pa and 0.1 °C.
///
/// Pure and deterministic. Fails only when the coefficients would make the
/// formula divide by zero, which a healthy sensor never produces.
pub fn compensate_pressure(
    calib: &CalibrationCoefficients,
    raw: RawMeasurement,
    oversampling: Oversampling,
) -> Result<PressureReading, SensorError> {
    let oss = oversampling.oss() as u32;
    let ut = raw.ut as i32;

    // Temperature
    let x1 = ut.wrapping_sub(calib.ac6 as i32).wrapping_mul(calib.ac5 as i32) >> 15;
    let divisor = x1.wrapping_add(calib.md as i32);
    if divisor == 0 {
        return Err(SensorError::InvalidCalibration {
            sensor: SENSOR_NAME,
        });
    }
    let x2 = ((calib.mc as i32) << 11).wrapping_div(divisor);
    let b5 = x1.wrapping_add(x2);
    let temperature_decicelsius = b5.wrapping_add(8) >> 4;

    // Pressure
    let b6 = b5.wrapping_sub(4000);
    let b6_squared = b6.wrapping_mul(b6) >> 12;
    let x1 = (calib.b2 as i32).wrapping_mul(b6_squared) >> 11;
    let x2 = (calib.ac2 as i32).wrapping_mul(b6) >> 11;
    let x3 = x1.wrapping_add(x2);
    let b3 = (((calib.ac1 as i32).wrapping_mul(4).wrapping_add(x3) << oss).wrapping_add(2)) >> 2;
    let x1 = (calib.ac3 as i32).wrapping_mul(b6) >> 13;
    let x2 = (calib.b1 as i32).wrapping_mul(b6_squared) >> 16;
    let x3 = x1.wrapping_add(x2).wrapping_add(2) >> 2;
    let b4 = (calib.ac4 as u32).wrapping_mul(x3.wrapping_add(32768) as u32) >> 15;
    if b4 == 0 {
        return Err(SensorError::InvalidCalibration {
            sensor: SENSOR_NAME,
        });
    }
    let b7 = (raw.up as u32)
        .wrapping_sub(b3 as u32)
        .wrapping_mul(50000 >> oss);

    // The branch picks the multiply/divide order that stays inside 32 bits.
    let p = if b7 < 0x8000_0000 {
        (b7 * 2) / b4
    } else {
        (b7 / b4).wrapping_mul(2)
    } as i32;

    let x1 = (p >> 8).wrapping_mul(p >> 8);
    let x1 = x1.wrapping_mul(3038) >> 16;
    let x2 = (-7357i32).wrapping_mul(p) >> 16;
    let pressure_pa = p.wrapping_add(x1.wrapping_add(x2).wrapping_add(3791) >> 4);

    Ok(PressureReading {
        pressure_pa,
        temperature_decicelsius,
    })
}
