//! Desktop simulator for the meteo weather station.
//!
//! Runs the meteo-core station loop against a simulated sensor bus, a
//! software RTC and scripted joystick/page-button input. Frames are drawn
//! into the core's framebuffer, flushed onto a headless
//! `embedded-graphics-simulator` display and printed as ASCII art whenever
//! they change.
//!
//! ```text
//! meteo-simulator [--fast] [--png PATH] [SCRIPT TOKEN...]
//! ```
//!
//! See [`script`] for the input tokens. `RUST_LOG=debug` shows the
//! per-iteration detail logged by the core.

mod bus;
mod script;

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay};
use embedded_hal::delay::DelayNs;
use embedded_hal_bus::i2c::RefCellDevice;
use log::{error, info};
use thiserror_no_std::Error;

use meteo_core::app_state::Station;
use meteo_core::clock::SoftRtc;
use meteo_core::config::{DEFAULT_INITIAL_DATETIME, StationConfig};
use meteo_core::framebuffer::FrameBuffer;
use meteo_core::sensors::SensorReader;
use meteo_core::status::{StatusCode, StatusIndicator};
use meteo_core::ticks::TickCounter;
use meteo_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

use crate::bus::SimulatedBus;
use crate::script::{ScriptedButton, ScriptedJoystick};

/// Pixel scale of the PNG snapshot.
const PNG_SCALE: u32 = 4;

/// Script used when none is given: show the readout, open the editor, move
/// to the month and step it, inject a pressure fault, return to the readout.
const DEFAULT_SCRIPT: &str = ". . p . r u u . c d . p . x . . x .";

const USAGE: &str = "usage: meteo-simulator [--fast] [--png PATH] [SCRIPT TOKEN...]";

/// Millisecond counter, driven by [`SimDelay`] in place of a timer interrupt.
static TICKS: TickCounter = TickCounter::new();

/// Blocking delay backed by `thread::sleep`.
///
/// Every elapsed millisecond also ticks [`TICKS`]. With `fast` set the
/// delay returns immediately but still advances the counter, so simulated
/// time runs exactly as on hardware.
struct SimDelay {
    fast: bool,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        if !self.fast {
            thread::sleep(Duration::from_nanos(ns as u64));
        }
        TICKS.advance(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        if !self.fast {
            thread::sleep(Duration::from_millis(ms as u64));
        }
        for _ in 0..ms {
            TICKS.increment();
        }
    }
}

/// Logs the seven-segment status digit whenever it changes.
#[derive(Default)]
struct ConsoleStatus {
    shown: Option<StatusCode>,
}

impl StatusIndicator for ConsoleStatus {
    fn show(&mut self, code: StatusCode) {
        if self.shown != Some(code) {
            info!("Status digit: {}", code.glyph());
            self.shown = Some(code);
        }
    }
}

#[derive(Error, Debug)]
enum ArgsError {
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("unknown option {0}")]
    UnknownOption(String),
}

struct Options {
    fast: bool,
    png: Option<PathBuf>,
    script: String,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut options = Options {
            fast: false,
            png: None,
            script: String::new(),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fast" => options.fast = true,
                "--png" => {
                    let path = args.next().ok_or(ArgsError::MissingValue("--png"))?;
                    options.png = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => {
                    return Err(ArgsError::UnknownOption(flag.to_string()));
                }
                _ => {
                    options.script.push_str(&arg);
                    options.script.push(' ');
                }
            }
        }

        if options.script.trim().is_empty() {
            options.script = DEFAULT_SCRIPT.to_string();
        }
        Ok(options)
    }
}

/// Print the display as ASCII art, `#` for a lit pixel.
fn print_frame(iteration: usize, display: &SimulatorDisplay<BinaryColor>) {
    println!("--- iteration {} ---", iteration);
    for y in 0..DISPLAY_HEIGHT_PX as i32 {
        let row: String = (0..DISPLAY_WIDTH_PX as i32)
            .map(|x| match display.get_pixel(Point::new(x, y)) {
                BinaryColor::On => '#',
                BinaryColor::Off => '.',
            })
            .collect();
        println!("{}", row);
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };
    let frames = match script::parse(&options.script) {
        Ok(frames) => frames,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    info!("Starting meteo simulator");
    info!(
        "Display: {}x{}, {} scripted iterations",
        DISPLAY_WIDTH_PX,
        DISPLAY_HEIGHT_PX,
        frames.len()
    );

    let config = StationConfig::default();
    let bus = RefCell::new(SimulatedBus::new());
    let sensors = SensorReader::new(RefCellDevice::new(&bus), RefCellDevice::new(&bus), &config);
    let rtc = SoftRtc::new(DEFAULT_INITIAL_DATETIME);
    let mut station = Station::new(
        config,
        sensors,
        SimDelay { fast: options.fast },
        rtc,
        ConsoleStatus::default(),
        &TICKS,
        false,
    );

    let mut frame_buffer = FrameBuffer::new();
    let mut display =
        SimulatorDisplay::<BinaryColor>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));

    for (iteration, input) in frames.iter().enumerate() {
        if input.toggle_fault {
            let faulty = bus.borrow_mut().toggle_pressure_fault();
            info!("Pressure sensor fault {}", if faulty { "injected" } else { "cleared" });
        }

        let start = TICKS.now_ms();
        let mut joystick = ScriptedJoystick(input.joystick);
        let mut button = ScriptedButton {
            low: input.page_button_low,
        };
        // The framebuffer cannot fail to draw.
        let Ok(()) = station.step(&mut frame_buffer, &mut joystick, &mut button);

        station.rtc_mut().advance_ms(TICKS.elapsed_since(start));
        bus.borrow_mut().next_frame();

        if frame_buffer.is_dirty() {
            let Ok(()) = frame_buffer.flush(&mut display);
            print_frame(iteration, &display);
        }
    }

    if let Some(path) = options.png {
        let settings = OutputSettingsBuilder::new()
            .scale(PNG_SCALE)
            .theme(BinaryColorTheme::OledBlue)
            .build();
        if let Err(e) = display.to_rgb_output_image(&settings).save_png(&path) {
            error!("Could not write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        info!("Saved final frame to {}", path.display());
    }

    info!("Simulator exiting");
    ExitCode::SUCCESS
}
