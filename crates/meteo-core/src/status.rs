//! Seven-segment status digit.

/// Code shown on the status digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// Shown at the start of every loop iteration.
    Ok,
    /// A sensor read failed during this iteration.
    SensorFault,
}

impl StatusCode {
    pub const fn glyph(self) -> char {
        match self {
            StatusCode::Ok => '0',
            StatusCode::SensorFault => '3',
        }
    }
}

pub trait StatusIndicator {
    fn show(&mut self, code: StatusCode);
}

impl<T: StatusIndicator + ?Sized> StatusIndicator for &mut T {
    fn show(&mut self, code: StatusCode) {
        T::show(self, code)
    }
}

/// Stations without a status digit.
impl StatusIndicator for () {
    fn show(&mut self, _code: StatusCode) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs() {
        assert_eq!(StatusCode::Ok.glyph(), '0');
        assert_eq!(StatusCode::SensorFault.glyph(), '3');
    }
}
