//! Cursor navigation and field editing for the date/time editor.
//!
//! The editor shows a 2×3 grid: the date row (day, month, year) and the time
//! row (hour, minute, second). Left/right move the cursor within a row and
//! clamp at the edges, center switches rows, up/down step the selected field
//! with wraparound and write the row back to the RTC.

use log::{debug, info};

use crate::clock::{ClockFieldGrid, Rtc};
use crate::input::JoystickEvent;

/// Row of the editor grid, also called the DateEditor/TimeEditor page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorRow {
    #[default]
    Date,
    Time,
}

impl EditorRow {
    pub const fn index(self) -> usize {
        match self {
            EditorRow::Date => 0,
            EditorRow::Time => 1,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            EditorRow::Date => EditorRow::Time,
            EditorRow::Time => EditorRow::Date,
        }
    }
}

/// Selected field within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Column {
    #[default]
    Left,
    Center,
    Right,
}

impl Column {
    pub const fn index(self) -> usize {
        match self {
            Column::Left => 0,
            Column::Center => 1,
            Column::Right => 2,
        }
    }

    /// One column to the left, clamped at the first column.
    pub const fn moved_left(self) -> Self {
        match self {
            Column::Left | Column::Center => Column::Left,
            Column::Right => Column::Center,
        }
    }

    /// One column to the right, clamped at the last column.
    pub const fn moved_right(self) -> Self {
        match self {
            Column::Left => Column::Center,
            Column::Center | Column::Right => Column::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub row: EditorRow,
    pub column: Column,
}

/// What a navigation event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Center/left/right: the selection underline has to be redrawn, even
    /// when the cursor was already at an edge.
    CursorMoved { from: CursorState, to: CursorState },
    /// Up/down: the field at `cursor` now holds `value` in the RTC.
    FieldEdited { cursor: CursorState, value: i32 },
}

#[derive(Debug, Default)]
pub struct Navigator {
    cursor: CursorState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Apply one joystick event. Up/down edit the RTC through a transient
    /// field grid; only the active row is written back.
    pub fn handle<R: Rtc>(&mut self, event: JoystickEvent, rtc: &mut R) -> NavigationOutcome {
        let from = self.cursor;
        match event {
            JoystickEvent::Center => self.cursor.row = from.row.toggled(),
            JoystickEvent::Left => self.cursor.column = from.column.moved_left(),
            JoystickEvent::Right => self.cursor.column = from.column.moved_right(),
            JoystickEvent::Up => return self.edit(rtc, 1),
            JoystickEvent::Down => return self.edit(rtc, -1),
        }

        debug!("Cursor {:?} -> {:?}", from, self.cursor);
        NavigationOutcome::CursorMoved {
            from,
            to: self.cursor,
        }
    }

    fn edit<R: Rtc>(&mut self, rtc: &mut R, delta: i32) -> NavigationOutcome {
        let CursorState { row, column } = self.cursor;

        let mut grid = ClockFieldGrid::from_datetime(&rtc.now());
        grid.adjust(row, column, delta);
        grid.wrap_all();
        grid.write_back(row, rtc);

        let value = grid.get(row, column);
        info!("Clock field {:?}/{:?} set to {}", row, column, value);
        NavigationOutcome::FieldEdited {
            cursor: self.cursor,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{DateTime, SoftRtc};
    use crate::testing::CountingRtc;

    fn rtc() -> SoftRtc {
        SoftRtc::new(DateTime::new(31, 12, 2024, 23, 59, 59))
    }

    #[test]
    fn test_initial_cursor() {
        let navigator = Navigator::new();
        assert_eq!(navigator.cursor().row, EditorRow::Date);
        assert_eq!(navigator.cursor().column, Column::Left);
    }

    #[test]
    fn test_left_clamps_at_first_column() {
        let mut navigator = Navigator::new();
        let mut rtc = rtc();

        let outcome = navigator.handle(JoystickEvent::Left, &mut rtc);

        assert_eq!(navigator.cursor().column, Column::Left);
        assert_eq!(
            outcome,
            NavigationOutcome::CursorMoved {
                from: CursorState::default(),
                to: CursorState::default(),
            }
        );
    }

    #[test]
    fn test_right_clamps_at_last_column() {
        let mut navigator = Navigator::new();
        let mut rtc = rtc();

        navigator.handle(JoystickEvent::Right, &mut rtc);
        navigator.handle(JoystickEvent::Right, &mut rtc);
        assert_eq!(navigator.cursor().column, Column::Right);

        navigator.handle(JoystickEvent::Right, &mut rtc);
        assert_eq!(navigator.cursor().column, Column::Right);
    }

    #[test]
    fn test_two_center_events_restore_row() {
        let mut navigator = Navigator::new();
        let mut rtc = rtc();

        navigator.handle(JoystickEvent::Center, &mut rtc);
        assert_eq!(navigator.cursor().row, EditorRow::Time);
        navigator.handle(JoystickEvent::Center, &mut rtc);
        assert_eq!(navigator.cursor().row, EditorRow::Date);
    }

    #[test]
    fn test_center_keeps_column() {
        let mut navigator = Navigator::new();
        let mut rtc = rtc();

        navigator.handle(JoystickEvent::Right, &mut rtc);
        navigator.handle(JoystickEvent::Center, &mut rtc);

        assert_eq!(
            navigator.cursor(),
            CursorState {
                row: EditorRow::Time,
                column: Column::Center,
            }
        );
    }

    #[test]
    fn test_up_on_last_day_wraps_to_first() {
        let mut navigator = Navigator::new();
        let mut rtc = rtc();

        let outcome = navigator.handle(JoystickEvent::Up, &mut rtc);

        assert_eq!(rtc.now(), DateTime::new(1, 12, 2024, 23, 59, 59));
        assert_eq!(
            outcome,
            NavigationOutcome::FieldEdited {
                cursor: CursorState::default(),
                value: 1,
            }
        );
    }

    #[test]
    fn test_date_edit_leaves_time_untouched() {
        let mut navigator = Navigator::new();
        let mut rtc = SoftRtc::new(DateTime::new(15, 6, 2024, 10, 20, 30));

        navigator.handle(JoystickEvent::Right, &mut rtc);
        navigator.handle(JoystickEvent::Down, &mut rtc);

        assert_eq!(rtc.now(), DateTime::new(15, 5, 2024, 10, 20, 30));
    }

    #[test]
    fn test_edit_writes_back_active_row_only() {
        let mut navigator = Navigator::new();
        let mut rtc = CountingRtc::new(DateTime::new(15, 6, 2024, 10, 20, 30));

        navigator.handle(JoystickEvent::Up, &mut rtc);
        assert_eq!((rtc.date_writes, rtc.time_writes), (1, 0));

        navigator.handle(JoystickEvent::Center, &mut rtc);
        navigator.handle(JoystickEvent::Up, &mut rtc);
        assert_eq!((rtc.date_writes, rtc.time_writes), (1, 1));

        navigator.handle(JoystickEvent::Left, &mut rtc);
        navigator.handle(JoystickEvent::Right, &mut rtc);
        assert_eq!((rtc.date_writes, rtc.time_writes), (1, 1), "moves never write");
    }

    #[test]
    fn test_time_edits_wrap() {
        let mut navigator = Navigator::new();
        let mut rtc = SoftRtc::new(DateTime::new(15, 6, 2024, 0, 59, 0));

        navigator.handle(JoystickEvent::Center, &mut rtc);
        navigator.handle(JoystickEvent::Down, &mut rtc);
        assert_eq!(rtc.now().hour, 23, "hour 0 - 1 wraps to 23");

        navigator.handle(JoystickEvent::Right, &mut rtc);
        navigator.handle(JoystickEvent::Up, &mut rtc);
        assert_eq!(rtc.now().minute, 0, "minute 59 + 1 wraps to 0");

        navigator.handle(JoystickEvent::Right, &mut rtc);
        navigator.handle(JoystickEvent::Down, &mut rtc);
        assert_eq!(rtc.now().second, 59, "second 0 - 1 wraps to 59");

        assert_eq!(rtc.now().day, 15);
        assert_eq!(rtc.now().month, 6);
        assert_eq!(rtc.now().year, 2024);
    }
}
