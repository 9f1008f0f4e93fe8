//! Joystick and page-button sampling.

/// Directional input events produced by the five-way joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickEvent {
    Center,
    Up,
    Down,
    Left,
    Right,
}

impl JoystickEvent {
    /// Bit of this direction in a [`JoystickState`].
    pub const fn mask(self) -> u8 {
        match self {
            JoystickEvent::Center => 0x01,
            JoystickEvent::Up => 0x02,
            JoystickEvent::Down => 0x04,
            JoystickEvent::Left => 0x08,
            JoystickEvent::Right => 0x10,
        }
    }
}

/// Order in which simultaneous directions are handled within one sample.
const DISPATCH_ORDER: [JoystickEvent; 5] = [
    JoystickEvent::Center,
    JoystickEvent::Left,
    JoystickEvent::Right,
    JoystickEvent::Up,
    JoystickEvent::Down,
];

/// One joystick sample: a bitmask of the directions currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoystickState(u8);

impl JoystickState {
    const ALL: u8 = 0x1F;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn with(self, event: JoystickEvent) -> Self {
        Self(self.0 | event.mask())
    }

    pub const fn is_pressed(self, event: JoystickEvent) -> bool {
        self.0 & event.mask() != 0
    }

    pub const fn is_idle(self) -> bool {
        self.0 == 0
    }

    /// Held directions in dispatch order: center, left, right, up, down.
    pub fn events(self) -> impl Iterator<Item = JoystickEvent> {
        DISPATCH_ORDER
            .into_iter()
            .filter(move |event| self.is_pressed(*event))
    }
}

impl From<JoystickEvent> for JoystickState {
    fn from(event: JoystickEvent) -> Self {
        Self(event.mask())
    }
}

/// Source of joystick samples.
pub trait Joystick {
    fn sample(&mut self) -> JoystickState;
}

/// Edge detector for the active-low page button.
///
/// Reports a press once, on the sample where the line goes from released to
/// held. Holding the button down does not repeat the press.
#[derive(Debug, Clone, Copy)]
pub struct ButtonEdge {
    previous_low: bool,
}

impl ButtonEdge {
    /// `initial_low` is the level sampled before the loop starts, so a button
    /// held through boot does not count as a press.
    pub const fn new(initial_low: bool) -> Self {
        Self {
            previous_low: initial_low,
        }
    }

    /// Feed the latest sample; returns `true` on a press edge.
    pub fn update(&mut self, low: bool) -> bool {
        let pressed = low && !self.previous_low;
        self.previous_low = low;
        pressed
    }
}
