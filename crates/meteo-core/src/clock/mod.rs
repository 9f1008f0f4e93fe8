//! Date/time model used by the clock editor.
//!
//! The authoritative date and time live in an RTC behind the [`Rtc`] trait.
//! Edits go through a [`ClockFieldGrid`]: a transient 2×3 working copy that is
//! built from the RTC, changed by one step, wrapped back into range and
//! written back one row at a time.

mod soft_rtc;

use serde::{Deserialize, Serialize};

use crate::navigation::{Column, EditorRow};

pub use soft_rtc::SoftRtc;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    pub const fn new(day: u8, month: u8, year: u16, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            day,
            month,
            year,
            hour,
            minute,
            second,
        }
    }

    /// Every field lies within its editor range.
    pub fn is_valid(&self) -> bool {
        ClockFieldGrid::from_datetime(self).is_in_range()
    }
}

/// Authoritative date/time store.
///
/// Date and time are written separately so that editing one row never
/// touches the other.
pub trait Rtc {
    fn now(&mut self) -> DateTime;
    fn set_date(&mut self, day: u8, month: u8, year: u16);
    fn set_time(&mut self, hour: u8, minute: u8, second: u8);
}

impl<T: Rtc + ?Sized> Rtc for &mut T {
    fn now(&mut self) -> DateTime {
        T::now(self)
    }

    fn set_date(&mut self, day: u8, month: u8, year: u16) {
        T::set_date(self, day, month, year)
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) {
        T::set_time(self, hour, minute, second)
    }
}

/// Inclusive range of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub min: i32,
    pub max: i32,
}

impl FieldLimits {
    const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Limits indexed like the grid: row 0 is day/month/year, row 1 is
/// hour/minute/second.
pub const FIELD_LIMITS: [[FieldLimits; 3]; 2] = [
    [
        FieldLimits::new(1, 31),
        FieldLimits::new(1, 12),
        FieldLimits::new(1000, 3000),
    ],
    [
        FieldLimits::new(0, 23),
        FieldLimits::new(0, 59),
        FieldLimits::new(0, 59),
    ],
];

/// Wrap a field that stepped out of `min..=max` around to the other end.
///
/// Values below `min` become `max`, values above `max` become `min`, anything
/// else is returned unchanged. This wraps, it does not saturate.
pub fn wrap_limit(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        return max;
    }
    if value > max {
        return min;
    }
    value
}

/// Transient working copy of the six clock fields.
///
/// Values are signed so a decrement below a zero minimum is still visible
/// to [`wrap_limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFieldGrid {
    fields: [[i32; 3]; 2],
}

impl ClockFieldGrid {
    pub fn from_datetime(datetime: &DateTime) -> Self {
        Self {
            fields: [
                [
                    datetime.day as i32,
                    datetime.month as i32,
                    datetime.year as i32,
                ],
                [
                    datetime.hour as i32,
                    datetime.minute as i32,
                    datetime.second as i32,
                ],
            ],
        }
    }

    pub fn get(&self, row: EditorRow, column: Column) -> i32 {
        self.fields[row.index()][column.index()]
    }

    /// Step the selected field by `delta` without range checks.
    pub fn adjust(&mut self, row: EditorRow, column: Column, delta: i32) {
        let field = &mut self.fields[row.index()][column.index()];
        *field = field.saturating_add(delta);
    }

    /// Wrap every field back into its range.
    pub fn wrap_all(&mut self) {
        for (row, limits) in self.fields.iter_mut().zip(FIELD_LIMITS.iter()) {
            for (value, limit) in row.iter_mut().zip(limits.iter()) {
                *value = wrap_limit(*value, limit.min, limit.max);
            }
        }
    }

    fn is_in_range(&self) -> bool {
        self.fields
            .iter()
            .zip(FIELD_LIMITS.iter())
            .all(|(row, limits)| {
                row.iter()
                    .zip(limits.iter())
                    .all(|(value, limit)| (limit.min..=limit.max).contains(value))
            })
    }

    /// Write one row back to the RTC. The other row is left untouched.
    ///
    /// Call after [`ClockFieldGrid::wrap_all`]; every limit fits the target
    /// field type, so the narrowing casts are lossless.
    pub fn write_back<R: Rtc>(&self, row: EditorRow, rtc: &mut R) {
        let values = self.fields[row.index()];
        match row {
            EditorRow::Date => rtc.set_date(values[0] as u8, values[1] as u8, values[2] as u16),
            EditorRow::Time => rtc.set_time(values[0] as u8, values[1] as u8, values[2] as u8),
        }
    }
}
