//! Live sensor readout page.
//!
//! ```text
//! Temp:     21.5°C
//! Press:    1038hPa
//! Humidity: 44 %
//! ```
//!
//! Values are fixed-width fields on an opaque background, so a redraw
//! overwrites the previous value without clearing the screen. A field with
//! no reading yet shows dashes; a field whose last read failed keeps its last
//! good value and gets a `?` marker at the right edge.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::pages::page::Page;
use crate::ui::text::{draw_pixel, draw_text, format_field};
use crate::ui::{PageEvent, PageId, Readings};

const LABEL_X: i32 = 1;
const TEMPERATURE_Y: i32 = 1;
const PRESSURE_Y: i32 = 12;
const HUMIDITY_Y: i32 = 23;

const TEMPERATURE_WHOLE_X: i32 = 42;
const TEMPERATURE_POINT_X: i32 = 60;
const TEMPERATURE_TENTHS_X: i32 = 66;
const DEGREE_X: i32 = 73;
const CELSIUS_X: i32 = 76;

const PRESSURE_VALUE_X: i32 = 48;
const PRESSURE_UNIT_X: i32 = 72;

const HUMIDITY_VALUE_X: i32 = 61;
const HUMIDITY_UNIT_X: i32 = 79;

const FAULT_MARKER_X: i32 = 90;

pub struct ReadoutPage {
    readings: Readings,
    pressure_offset_hpa: i32,
    dirty: bool,
}

impl ReadoutPage {
    pub fn new(pressure_offset_hpa: i32) -> Self {
        Self {
            readings: Readings::default(),
            pressure_offset_hpa,
            dirty: true,
        }
    }

    fn draw_temperature<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        draw_text(display, LABEL_X, TEMPERATURE_Y, "Temp: ")?;

        let (whole, tenths) = match self.readings.temperature_decicelsius {
            Some(t) => {
                let sign = if t < 0 { "-" } else { "" };
                let whole = format_field(format_args!("{}{}", sign, t.unsigned_abs() / 10));
                (
                    format_field(format_args!("{:>3}", whole.as_str())),
                    format_field(format_args!("{}", t.unsigned_abs() % 10)),
                )
            }
            None => (
                format_field(format_args!("{:>3}", "--")),
                format_field(format_args!("-")),
            ),
        };

        draw_text(display, TEMPERATURE_WHOLE_X, TEMPERATURE_Y, &whole)?;
        draw_text(display, TEMPERATURE_POINT_X, TEMPERATURE_Y, ".")?;
        draw_text(display, TEMPERATURE_TENTHS_X, TEMPERATURE_Y, &tenths)?;

        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            draw_pixel(
                display,
                DEGREE_X + dx,
                TEMPERATURE_Y + dy,
                BinaryColor::On,
            )?;
        }
        draw_text(display, CELSIUS_X, TEMPERATURE_Y, "C")?;
        draw_fault_marker(display, TEMPERATURE_Y, self.readings.pressure_fault)
    }

    fn draw_pressure<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        draw_text(display, LABEL_X, PRESSURE_Y, "Press: ")?;

        let value = match self.readings.pressure_pa {
            Some(pa) => format_field(format_args!(
                "{:>4}",
                pa / 100 + self.pressure_offset_hpa
            )),
            None => format_field(format_args!("{:>4}", "--")),
        };
        draw_text(display, PRESSURE_VALUE_X, PRESSURE_Y, &value)?;
        draw_text(display, PRESSURE_UNIT_X, PRESSURE_Y, "hPa")?;
        draw_fault_marker(display, PRESSURE_Y, self.readings.pressure_fault)
    }

    fn draw_humidity<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        draw_text(display, LABEL_X, HUMIDITY_Y, "Humidity: ")?;

        let value = match self.readings.humidity_percent {
            Some(rh) => format_field(format_args!("{:<3}", rh)),
            None => format_field(format_args!("{:<3}", "--")),
        };
        draw_text(display, HUMIDITY_VALUE_X, HUMIDITY_Y, &value)?;
        draw_text(display, HUMIDITY_UNIT_X, HUMIDITY_Y, "%")?;
        draw_fault_marker(display, HUMIDITY_Y, self.readings.humidity_fault)
    }
}

fn draw_fault_marker<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    y: i32,
    fault: bool,
) -> Result<(), D::Error> {
    draw_text(display, FAULT_MARKER_X, y, if fault { "?" } else { " " })
}

impl Page for ReadoutPage {
    fn id(&self) -> PageId {
        PageId::Readout
    }

    fn title(&self) -> &str {
        "Readout"
    }

    fn on_activate(&mut self) {
        self.dirty = true;
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::SensorUpdate(readings) if *readings != self.readings => {
                self.readings = *readings;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    fn draw_page<D: DrawTarget<Color = BinaryColor>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.draw_temperature(display)?;
        self.draw_pressure(display)?;
        self.draw_humidity(display)
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
