//! Simulated two-wire bus with a BMP180 and an HTU21D on it.
//!
//! Both devices answer at register level the way the real parts do, so the
//! core's drivers run unchanged. Raw conversion results drift slowly with
//! the frame counter so the readout page has something to redraw.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use log::debug;

use meteo_core::sensors::bmp180::registers::{
    BMP180_ADDRESS, BMP180_CHIP_ID, Bmp180Register, TEMPERATURE_COMMAND,
};
use meteo_core::sensors::htu21d::{HTU21D_ADDRESS, TRIGGER_HUMIDITY_NO_HOLD};

/// BMP180 datasheet example calibration, AC1..MD.
const CALIBRATION: [u16; 11] = [
    408, 0xFFB8, 0xC7D1, 32741, 32757, 23153, 6190, 4, 0x8000, 0xDDF9, 2868,
];

/// Raw temperature around 15 °C.
const BASE_UT: f64 = 27898.0;

/// Raw 19-bit pressure at oss=3 (shifted down for lower settings).
const BASE_UP_OSS3: f64 = 190_744.0;

/// Raw humidity word around 44 %RH.
const BASE_SRH: f64 = 26_704.0;

pub struct SimulatedBus {
    frame: u32,
    pressure_sensor_ok: bool,
    humidity_triggered: bool,
    registers: [u8; 256],
    pointer: u8,
}

impl SimulatedBus {
    pub fn new() -> Self {
        let mut registers = [0u8; 256];
        for (i, word) in CALIBRATION.iter().enumerate() {
            let offset = Bmp180Register::Ac1 as usize + 2 * i;
            registers[offset..offset + 2].copy_from_slice(&word.to_be_bytes());
        }
        registers[Bmp180Register::ChipId as usize] = BMP180_CHIP_ID;

        Self {
            frame: 0,
            pressure_sensor_ok: true,
            humidity_triggered: false,
            registers,
            pointer: 0,
        }
    }

    /// Advance the drift of the simulated environment by one loop iteration.
    pub fn next_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Flip the pressure sensor between healthy and a bad chip id.
    pub fn toggle_pressure_fault(&mut self) -> bool {
        self.pressure_sensor_ok = !self.pressure_sensor_ok;
        self.registers[Bmp180Register::ChipId as usize] = if self.pressure_sensor_ok {
            BMP180_CHIP_ID
        } else {
            0x00
        };
        !self.pressure_sensor_ok
    }

    fn t(&self) -> f64 {
        self.frame as f64
    }

    fn raw_temperature(&self) -> u16 {
        (BASE_UT + 60.0 * (self.t() / 40.0).sin()) as u16
    }

    /// Three result bytes for a pressure conversion at `oss`.
    fn raw_pressure_bytes(&self, oss: u8) -> [u8; 3] {
        let up_oss3 = (BASE_UP_OSS3 + 400.0 * (self.t() / 25.0).sin()) as u32;
        let up = up_oss3 >> (3 - oss);
        let word = up << (8 - oss);
        let [_, msb, lsb, xlsb] = word.to_be_bytes();
        [msb, lsb, xlsb]
    }

    fn raw_humidity(&self) -> u16 {
        ((BASE_SRH + 1500.0 * (self.t() / 15.0).sin()) as u16) & 0xFFFC
    }

    fn bmp180_write(&mut self, bytes: &[u8]) {
        let Some((&register, rest)) = bytes.split_first() else {
            return;
        };
        self.pointer = register;

        if register != Bmp180Register::Control as u8 {
            return;
        }
        let Some(&command) = rest.first() else {
            return;
        };

        let result = Bmp180Register::Result as usize;
        if command == TEMPERATURE_COMMAND {
            let ut = self.raw_temperature();
            self.registers[result..result + 2].copy_from_slice(&ut.to_be_bytes());
        } else {
            let oss = command >> 6;
            let bytes = self.raw_pressure_bytes(oss);
            self.registers[result..result + 3].copy_from_slice(&bytes);
        }
        debug!("BMP180 conversion {:#04x}", command);
    }

    fn bmp180_read(&self, buffer: &mut [u8]) {
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self.registers[(self.pointer as usize + i) % 256];
        }
    }
}

impl ErrorType for SimulatedBus {
    type Error = ErrorKind;
}

impl I2c for SimulatedBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        match address {
            BMP180_ADDRESS => {
                for operation in operations {
                    match operation {
                        Operation::Write(bytes) => self.bmp180_write(bytes),
                        Operation::Read(buffer) => self.bmp180_read(buffer),
                    }
                }
                Ok(())
            }
            HTU21D_ADDRESS => {
                for operation in operations {
                    match operation {
                        Operation::Write(bytes) => {
                            if bytes.first() == Some(&TRIGGER_HUMIDITY_NO_HOLD) {
                                self.humidity_triggered = true;
                            }
                        }
                        // No measurement pending: the part NACKs the read.
                        Operation::Read(_) if !self.humidity_triggered => {
                            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
                        }
                        Operation::Read(buffer) => {
                            self.humidity_triggered = false;
                            for (byte, value) in buffer.iter_mut().zip(self.raw_humidity().to_be_bytes()) {
                                *byte = value;
                            }
                        }
                    }
                }
                Ok(())
            }
            _ => Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
        }
    }
}
