/// BMP180 register map (Bosch Sensortec BMP180 datasheet, BST-BMP180-DS000).
///
/// Calibration words are 16-bit big-endian, MSB at the listed address.
/// The measurement result register holds either the 16-bit uncompensated
/// temperature or the up-to-19-bit uncompensated pressure (MSB, LSB, XLSB),
/// depending on the last command written to [`Bmp180Register::Control`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Bmp180Register {
    Ac1 = 0xAA,
    Ac2 = 0xAC,
    Ac3 = 0xAE,
    Ac4 = 0xB0,
    Ac5 = 0xB2,
    Ac6 = 0xB4,
    B1 = 0xB6,
    B2 = 0xB8,
    Mb = 0xBA,
    Mc = 0xBC,
    Md = 0xBE,
    // Chip identification number, always 0x55
    ChipId = 0xD0,
    // Measurement control, a write starts a conversion
    Control = 0xF4,
    // Conversion result (MSB), followed by LSB and XLSB
    Result = 0xF6,
}

/// Default 7-bit bus address.
pub const BMP180_ADDRESS: u8 = 0x77;

/// Value of [`Bmp180Register::ChipId`] on a healthy device.
pub const BMP180_CHIP_ID: u8 = 0x55;

/// Control value that starts a temperature conversion.
pub const TEMPERATURE_COMMAND: u8 = 0x2E;

/// Base control value of a pressure conversion, `oss` goes into bits 7:6.
pub const PRESSURE_COMMAND_BASE: u8 = 0x34;

/// Calibration registers in the order the compensation formula names them.
pub const CALIBRATION_REGISTERS: [Bmp180Register; 11] = [
    Bmp180Register::Ac1,
    Bmp180Register::Ac2,
    Bmp180Register::Ac3,
    Bmp180Register::Ac4,
    Bmp180Register::Ac5,
    Bmp180Register::Ac6,
    Bmp180Register::B1,
    Bmp180Register::B2,
    Bmp180Register::Mb,
    Bmp180Register::Mc,
    Bmp180Register::Md,
];
