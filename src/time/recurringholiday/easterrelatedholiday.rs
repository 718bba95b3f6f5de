use chrono::{NaiveDate, TimeDelta};

use super::recurringholiday::RecurringHoliday;

pub const CARNIVAL_SHIFT_DAYS: i64 = -47;
pub const GOOD_FRIDAY_SHIFT_DAYS: i64 = -2;
pub const CORPUS_CHRISTI_SHIFT_DAYS: i64 = 60;

/// Gregorian Easter Sunday, valid for 1583..=4099.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if !(1583..=4099).contains(&year) {
        return None;
    }

    let g = year % 19;
    let c = year / 100;
    let c_div_4 = c / 4;
    let h = (c - c_div_4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
    let h_div_28 = h / 28;
    let i = h - h_div_28 * (1 - h_div_28 * (29 / (h + 1)) * ((21 - g) / 11));
    let j = (year + year / 4 + i + 2 - c + c_div_4) % 7;
    // Days after March 21, offset so that it can be negative
    let p = i - j;

    let day = 1 + (p + 27 + (p + 6) / 40) % 31;
    let month = 3 + (p + 26) / 30;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// A holiday at a fixed distance in days from Easter Sunday.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EasterRelatedHoliday {
    shift_days: i64
}

impl EasterRelatedHoliday {
    pub fn new(shift_days: i64) -> EasterRelatedHoliday {
        EasterRelatedHoliday { shift_days }
    }

    pub fn carnival() -> EasterRelatedHoliday {
        EasterRelatedHoliday::new(CARNIVAL_SHIFT_DAYS)
    }

    pub fn good_friday() -> EasterRelatedHoliday {
        EasterRelatedHoliday::new(GOOD_FRIDAY_SHIFT_DAYS)
    }

    pub fn corpus_christi() -> EasterRelatedHoliday {
        EasterRelatedHoliday::new(CORPUS_CHRISTI_SHIFT_DAYS)
    }

    pub fn shift_days(&self) -> i64 {
        self.shift_days
    }
}

impl RecurringHoliday for EasterRelatedHoliday {
    fn holiday_date(&self, year: i32) -> Option<NaiveDate> {
        easter_sunday(year)?.checked_add_signed(TimeDelta::days(self.shift_days))
    }
}
