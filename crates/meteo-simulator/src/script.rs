//! Scripted joystick and page-button input.
//!
//! A script is a whitespace-separated list of tokens, one per loop
//! iteration:
//!
//! | Token | Input during that iteration          |
//! |-------|--------------------------------------|
//! | `u`   | joystick up                          |
//! | `d`   | joystick down                        |
//! | `l`   | joystick left                        |
//! | `r`   | joystick right                       |
//! | `c`   | joystick center                      |
//! | `p`   | page button held low                 |
//! | `x`   | toggle a pressure sensor fault       |
//! | `.`   | nothing                              |
//!
//! Tokens may be combined, e.g. `pu` presses the page button and holds the
//! joystick up in the same iteration.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use meteo_core::input::{Joystick, JoystickEvent, JoystickState};
use thiserror_no_std::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub joystick: JoystickState,
    pub page_button_low: bool,
    pub toggle_fault: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown input '{symbol}' in token '{token}'")]
pub struct ScriptError {
    pub token: String,
    pub symbol: char,
}

pub fn parse(script: &str) -> Result<Vec<Frame>, ScriptError> {
    script.split_whitespace().map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<Frame, ScriptError> {
    let mut frame = Frame::default();
    for symbol in token.chars() {
        match symbol {
            'u' => frame.joystick = frame.joystick.with(JoystickEvent::Up),
            'd' => frame.joystick = frame.joystick.with(JoystickEvent::Down),
            'l' => frame.joystick = frame.joystick.with(JoystickEvent::Left),
            'r' => frame.joystick = frame.joystick.with(JoystickEvent::Right),
            'c' => frame.joystick = frame.joystick.with(JoystickEvent::Center),
            'p' => frame.page_button_low = true,
            'x' => frame.toggle_fault = true,
            '.' => {}
            _ => {
                return Err(ScriptError {
                    token: token.to_string(),
                    symbol,
                });
            }
        }
    }
    Ok(frame)
}

/// Joystick that reports the sample of the current frame.
pub struct ScriptedJoystick(pub JoystickState);

impl Joystick for ScriptedJoystick {
    fn sample(&mut self) -> JoystickState {
        self.0
    }
}

/// Active-low page button at the level of the current frame.
pub struct ScriptedButton {
    pub low: bool,
}

impl ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.low)
    }
}
