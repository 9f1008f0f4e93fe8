//! Station state and the main-loop driver.
//!
//! [`Station`] owns every piece of mutable loop state (last readings,
//! cursor, active page, page-button history) next to the peripherals it
//! drives. One call to [`Station::step`] is one loop iteration:
//!
//! 1. read both sensors, updating the status digit
//! 2. sample the page button and switch pages on a press edge
//! 3. sample the joystick and apply it to the clock editor
//! 4. redraw whatever changed
//! 5. wait out the refresh delay

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;
use log::{debug, info, warn};

use crate::clock::Rtc;
use crate::config::StationConfig;
use crate::input::{ButtonEdge, Joystick, JoystickEvent};
use crate::navigation::{CursorState, NavigationOutcome, Navigator};
use crate::pages::{ClockEditorPage, PageManager, ReadoutPage};
use crate::sensors::{SensorReader, SensorSnapshot};
use crate::status::{StatusCode, StatusIndicator};
use crate::ticks::TickCounter;
use crate::ui::{PageEvent, PageId, Readings};

pub struct Station<'a, P, H, D, R, S> {
    config: StationConfig,
    sensors: SensorReader<P, H>,
    delay: D,
    rtc: R,
    status: S,
    ticks: &'a TickCounter,
    navigator: Navigator,
    readings: Readings,
    pages: PageManager,
    page_button: ButtonEdge,
}

impl<'a, P, H, D, R, S> Station<'a, P, H, D, R, S>
where
    P: I2c,
    H: I2c,
    D: DelayNs,
    R: Rtc,
    S: StatusIndicator,
{
    /// Build the station and apply the configured boot date/time to the RTC.
    ///
    /// `page_button_low` is the button level sampled before the loop starts.
    pub fn new(
        config: StationConfig,
        sensors: SensorReader<P, H>,
        delay: D,
        mut rtc: R,
        status: S,
        ticks: &'a TickCounter,
        page_button_low: bool,
    ) -> Self {
        if let Some(start) = config.initial_datetime {
            info!("Setting RTC to {:?}", start);
            rtc.set_date(start.day, start.month, start.year);
            rtc.set_time(start.hour, start.minute, start.second);
        }

        let mut pages = PageManager::new(PageId::Readout);
        pages.register_page(ReadoutPage::new(config.pressure_offset_hpa));
        pages.register_page(ClockEditorPage::new());

        Self {
            config,
            sensors,
            delay,
            rtc,
            status,
            ticks,
            navigator: Navigator::new(),
            readings: Readings::default(),
            pages,
            page_button: ButtonEdge::new(page_button_low),
        }
    }

    /// Read both sensors once and fold the results into the readings.
    ///
    /// The status digit shows `0` first and switches to the fault code if
    /// either sensor failed. Failed fields keep their previous value.
    pub fn read_sensors(&mut self) -> SensorSnapshot {
        self.status.show(StatusCode::Ok);

        let snapshot = self.sensors.read_all(&mut self.delay);
        self.readings.apply(&snapshot);

        if snapshot.has_fault() {
            self.status.show(StatusCode::SensorFault);
        }
        snapshot
    }

    /// Feed one page-button sample. Returns `true` if the page switched.
    pub fn on_page_button(&mut self, low: bool) -> bool {
        if !self.page_button.update(low) {
            return false;
        }
        self.pages.toggle();
        true
    }

    /// Apply one joystick event to the clock editor.
    ///
    /// Returns `None` when the readout page is showing; the joystick only
    /// drives the editor.
    pub fn handle_navigation(&mut self, event: JoystickEvent) -> Option<NavigationOutcome> {
        if self.pages.current_page_id() != PageId::ClockEditor {
            debug!("Ignoring {:?} outside the clock editor", event);
            return None;
        }

        let outcome = self.navigator.handle(event, &mut self.rtc);
        if let NavigationOutcome::CursorMoved { from, to } = outcome {
            self.pages.dispatch_event(&PageEvent::CursorMoved { from, to });
        }
        Some(outcome)
    }

    /// Push the latest state to the active page and draw it if it changed.
    pub fn render<G>(&mut self, display: &mut G) -> Result<bool, G::Error>
    where
        G: DrawTarget<Color = BinaryColor>,
    {
        self.pages.dispatch_event(&PageEvent::SensorUpdate(self.readings));
        if self.pages.current_page_id() == PageId::ClockEditor {
            let now = self.rtc.now();
            self.pages.dispatch_event(&PageEvent::ClockUpdate(now));
        }
        self.pages.draw(display)
    }

    /// Run one full loop iteration, including the trailing refresh delay.
    pub fn step<G, J, B>(
        &mut self,
        display: &mut G,
        joystick: &mut J,
        page_button: &mut B,
    ) -> Result<(), G::Error>
    where
        G: DrawTarget<Color = BinaryColor>,
        J: Joystick,
        B: InputPin,
    {
        let start = self.ticks.now_ms();

        self.read_sensors();

        match page_button.is_low() {
            Ok(low) => {
                self.on_page_button(low);
            }
            Err(e) => warn!("Page button read failed: {:?}", e),
        }

        for event in joystick.sample().events() {
            self.handle_navigation(event);
        }

        self.render(display)?;

        debug!("Loop iteration took {} ms", self.ticks.elapsed_since(start));
        self.delay.delay_ms(self.config.refresh_ms);
        Ok(())
    }

    pub fn current_page(&self) -> PageId {
        self.pages.current_page_id()
    }

    pub fn cursor(&self) -> CursorState {
        self.navigator.cursor()
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn rtc_mut(&mut self) -> &mut R {
        &mut self.rtc
    }
}
