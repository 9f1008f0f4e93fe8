//! Register-level fakes for unit tests.

extern crate std;

use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use crate::clock::{DateTime, Rtc};
use crate::input::{Joystick, JoystickState};
use crate::sensors::bmp180::registers::{BMP180_ADDRESS, BMP180_CHIP_ID, Bmp180Register};
use crate::sensors::htu21d::{HTU21D_ADDRESS, TRIGGER_HUMIDITY_NO_HOLD};
use crate::status::{StatusCode, StatusIndicator};

/// Calibration words of the BMP180 datasheet worked example, in register
/// order 0xAA..=0xBE.
pub const DATASHEET_CALIBRATION: [i16; 11] = [
    408, -72, -14383, 32741u16 as i16, 32757u16 as i16, 23153, 6190, 4, -32768, -8711, 2868,
];

/// Raw temperature of the datasheet example (15.0 °C).
pub const DATASHEET_UT: u16 = 27898;

/// Result bytes whose oss=2 raw pressure is 95372 and oss=0 value 23843.
pub const PRESSURE_RESULT_BYTES: [u8; 3] = [0x5D, 0x23, 0x00];

pub struct FakeBmp180 {
    pub present: bool,
    pub ut: u16,
    pub pressure_bytes: [u8; 3],
    pub calibration_reads: usize,
    pub last_command: Option<u8>,
    registers: [u8; 256],
    pointer: u8,
}

impl FakeBmp180 {
    fn new() -> Self {
        let mut registers = [0u8; 256];
        for (i, word) in DATASHEET_CALIBRATION.iter().enumerate() {
            let offset = Bmp180Register::Ac1 as usize + 2 * i;
            registers[offset..offset + 2].copy_from_slice(&word.to_be_bytes());
        }
        registers[Bmp180Register::ChipId as usize] = BMP180_CHIP_ID;

        Self {
            present: true,
            ut: DATASHEET_UT,
            pressure_bytes: PRESSURE_RESULT_BYTES,
            calibration_reads: 0,
            last_command: None,
            registers,
            pointer: 0,
        }
    }

    pub fn set_chip_id(&mut self, id: u8) {
        self.registers[Bmp180Register::ChipId as usize] = id;
    }

    /// Overwrite one calibration word, `index` counted from AC1.
    pub fn set_calibration_word(&mut self, index: usize, word: u16) {
        let offset = Bmp180Register::Ac1 as usize + 2 * index;
        self.registers[offset..offset + 2].copy_from_slice(&word.to_be_bytes());
    }

    fn write(&mut self, bytes: &[u8]) {
        let Some((&register, rest)) = bytes.split_first() else {
            return;
        };
        self.pointer = register;

        if register == Bmp180Register::Control as u8
            && let Some(&command) = rest.first()
        {
            self.last_command = Some(command);
            let result = Bmp180Register::Result as usize;
            if command == 0x2E {
                self.registers[result..result + 2].copy_from_slice(&self.ut.to_be_bytes());
            } else {
                self.registers[result..result + 3].copy_from_slice(&self.pressure_bytes);
            }
        }
    }

    fn read(&mut self, buffer: &mut [u8]) {
        if (Bmp180Register::Ac1 as u8..=0xBF).contains(&self.pointer) {
            self.calibration_reads += 1;
        }
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self.registers[(self.pointer as usize + i) % 256];
        }
    }
}

pub struct FakeHtu21d {
    pub present: bool,
    pub raw: u16,
    pub triggers: usize,
}

impl FakeHtu21d {
    fn write(&mut self, bytes: &[u8]) {
        if bytes.first() == Some(&TRIGGER_HUMIDITY_NO_HOLD) {
            self.triggers += 1;
        }
    }

    fn read(&mut self, buffer: &mut [u8]) {
        for (byte, value) in buffer.iter_mut().zip(self.raw.to_be_bytes()) {
            *byte = value;
        }
    }
}

/// Two-wire bus with a BMP180 at 0x77 and an HTU21D at 0x40. Any other
/// address, or a device marked absent, NACKs its address.
pub struct FakeBus {
    pub bmp180: FakeBmp180,
    pub htu21d: FakeHtu21d,
}

impl FakeBus {
    pub fn new() -> Self {
        Self {
            bmp180: FakeBmp180::new(),
            htu21d: FakeHtu21d {
                present: true,
                raw: 0x6850,
                triggers: 0,
            },
        }
    }
}

impl ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let nack = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);
        match address {
            BMP180_ADDRESS if self.bmp180.present => {
                for operation in operations {
                    match operation {
                        Operation::Write(bytes) => self.bmp180.write(bytes),
                        Operation::Read(buffer) => self.bmp180.read(buffer),
                    }
                }
                Ok(())
            }
            HTU21D_ADDRESS if self.htu21d.present => {
                for operation in operations {
                    match operation {
                        Operation::Write(bytes) => self.htu21d.write(bytes),
                        Operation::Read(buffer) => self.htu21d.read(buffer),
                    }
                }
                Ok(())
            }
            _ => Err(nack),
        }
    }
}

/// Delay that returns immediately and remembers every millisecond wait.
pub struct RecordingDelay {
    calls_ms: Vec<u32>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self {
            calls_ms: Vec::new(),
        }
    }

    pub fn calls_ms(&self) -> &[u32] {
        &self.calls_ms
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls_ms.push(ns.div_ceil(1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
    }
}

/// Joystick that plays back a fixed list of samples, then stays idle.
pub struct FakeJoystick {
    samples: Vec<JoystickState>,
}

impl FakeJoystick {
    pub fn new(samples: &[JoystickState]) -> Self {
        let mut samples = samples.to_vec();
        samples.reverse();
        Self { samples }
    }
}

impl Joystick for FakeJoystick {
    fn sample(&mut self) -> JoystickState {
        self.samples.pop().unwrap_or_default()
    }
}

/// Active-low button pin with a settable level.
pub struct FakeButton {
    pub low: bool,
}

impl PinErrorType for FakeButton {
    type Error = Infallible;
}

impl InputPin for FakeButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.low)
    }
}

/// Status digit that records every code shown.
#[derive(Default)]
pub struct FakeStatus {
    pub shown: Vec<StatusCode>,
}

impl FakeStatus {
    pub fn last(&self) -> Option<StatusCode> {
        self.shown.last().copied()
    }
}

impl StatusIndicator for FakeStatus {
    fn show(&mut self, code: StatusCode) {
        self.shown.push(code);
    }
}

/// RTC that counts writes, to check which rows an edit touches.
pub struct CountingRtc {
    pub now: DateTime,
    pub date_writes: usize,
    pub time_writes: usize,
}

impl CountingRtc {
    pub fn new(now: DateTime) -> Self {
        Self {
            now,
            date_writes: 0,
            time_writes: 0,
        }
    }
}

impl Rtc for CountingRtc {
    fn now(&mut self) -> DateTime {
        self.now
    }

    fn set_date(&mut self, day: u8, month: u8, year: u16) {
        self.date_writes += 1;
        self.now.day = day;
        self.now.month = month;
        self.now.year = year;
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) {
        self.time_writes += 1;
        self.now.hour = hour;
        self.now.minute = minute;
        self.now.second = second;
    }
}
