//! Free-running millisecond counter.
//!
//! Incremented from a 1 ms timer interrupt and read from the main loop. The
//! counter wraps silently after ~49.7 days, so durations must be taken with
//! [`TickCounter::elapsed_since`] rather than by subtracting raw values.

use core::cell::Cell;

use critical_section::Mutex;

pub struct TickCounter {
    ms: Mutex<Cell<u32>>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ms: Mutex::new(Cell::new(0)),
        }
    }

    /// Called from the timer interrupt once per millisecond.
    pub fn increment(&self) {
        self.advance(1);
    }

    pub fn advance(&self, ms: u32) {
        critical_section::with(|cs| {
            let cell = self.ms.borrow(cs);
            cell.set(cell.get().wrapping_add(ms));
        });
    }

    pub fn now_ms(&self) -> u32 {
        critical_section::with(|cs| self.ms.borrow(cs).get())
    }

    /// Milliseconds since `start`, correct across one wrap of the counter.
    pub fn elapsed_since(&self, start: u32) -> u32 {
        self.now_ms().wrapping_sub(start)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_milliseconds() {
        let ticks = TickCounter::new();
        ticks.increment();
        ticks.increment();
        ticks.advance(198);
        assert_eq!(ticks.now_ms(), 200);
        assert_eq!(ticks.elapsed_since(50), 150);
    }

    #[test]
    fn test_elapsed_across_wraparound() {
        let ticks = TickCounter::new();
        ticks.advance(u32::MAX - 9);
        let start = ticks.now_ms();

        ticks.advance(25);

        assert_eq!(ticks.now_ms(), 15);
        assert_eq!(ticks.elapsed_since(start), 25);
    }
}
