use serde::{Deserialize, Serialize};

use crate::sensors::bmp180::registers::PRESSURE_COMMAND_BASE;

/// Settle time of a temperature conversion (4.5 ms max, rounded up).
pub const TEMPERATURE_SETTLE_MS: u32 = 5;

/// Pressure oversampling setting (`oss`, bits 7:6 of the control register).
///
/// Higher oversampling trades conversion time for resolution. The raw
/// pressure result is always read as three bytes and shifted right by
/// `8 - oss`.
///
/// | Variant             | oss | Control | Conversion time (max) | RMS noise (typ) |
/// |---------------------|-----|---------|-----------------------|-----------------|
/// | UltraLowPower       | 0   | 0x34    | 4.5 ms                | 0.06 hPa        |
/// | Standard            | 1   | 0x74    | 7.5 ms                | 0.05 hPa        |
/// | HighResolution      | 2   | 0xB4    | 13.5 ms               | 0.04 hPa        |
/// | UltraHighResolution | 3   | 0xF4    | 25.5 ms               | 0.03 hPa        |
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Oversampling {
    UltraLowPower,
    Standard,
    #[default]
    HighResolution,
    UltraHighResolution,
}

impl Oversampling {
    /// The `oss` exponent used by the compensation formula.
    pub const fn oss(self) -> u8 {
        match self {
            Oversampling::UltraLowPower => 0,
            Oversampling::Standard => 1,
            Oversampling::HighResolution => 2,
            Oversampling::UltraHighResolution => 3,
        }
    }

    /// Value written to the control register to start a pressure conversion.
    pub const fn control_value(self) -> u8 {
        PRESSURE_COMMAND_BASE + (self.oss() << 6)
    }

    /// Settle time before the pressure result register is valid.
    pub const fn settle_ms(self) -> u32 {
        match self {
            Oversampling::UltraLowPower => 5,
            Oversampling::Standard => 8,
            Oversampling::HighResolution => 14,
            Oversampling::UltraHighResolution => 26,
        }
    }
}
