use crate::clock::{DateTime, Rtc};

/// In-memory RTC that advances with elapsed milliseconds.
///
/// Rolls seconds into minutes, hours, days (month lengths, Gregorian leap
/// years), months and years the way a hardware calendar RTC does. A day
/// number set past the end of its month rolls into the next month on the
/// following day change.
#[derive(Debug, Clone)]
pub struct SoftRtc {
    now: DateTime,
    sub_second_ms: u32,
}

impl SoftRtc {
    pub const fn new(start: DateTime) -> Self {
        Self {
            now: start,
            sub_second_ms: 0,
        }
    }

    pub fn advance_ms(&mut self, ms: u32) {
        let total = self.sub_second_ms as u64 + ms as u64;
        for _ in 0..total / 1000 {
            self.tick_second();
        }
        self.sub_second_ms = (total % 1000) as u32;
    }

    fn tick_second(&mut self) {
        let now = &mut self.now;
        now.second += 1;
        if now.second < 60 {
            return;
        }
        now.second = 0;
        now.minute += 1;
        if now.minute < 60 {
            return;
        }
        now.minute = 0;
        now.hour += 1;
        if now.hour < 24 {
            return;
        }
        now.hour = 0;
        now.day += 1;
        if now.day <= days_in_month(now.month, now.year) {
            return;
        }
        now.day = 1;
        now.month += 1;
        if now.month <= 12 {
            return;
        }
        now.month = 1;
        now.year = now.year.wrapping_add(1);
    }
}

impl Rtc for SoftRtc {
    fn now(&mut self) -> DateTime {
        self.now
    }

    fn set_date(&mut self, day: u8, month: u8, year: u16) {
        self.now.day = day;
        self.now.month = month;
        self.now.year = year;
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) {
        self.now.hour = hour;
        self.now.minute = minute;
        self.now.second = second;
        self.sub_second_ms = 0;
    }
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(month: u8, year: u16) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
