use chrono::NaiveDate;

use super::recurringholiday::RecurringHoliday;
use super::super::utility::max_days_of_month;

/// A holiday on the same calendar day every year.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FixedDateHoliday {
    month: u32,
    day: u32
}

impl FixedDateHoliday {
    pub fn new(month: u32, day: u32) -> Option<FixedDateHoliday> {
        if !(1..=12).contains(&month) || day == 0 || day > max_days_of_month(month) {
            None
        } else {
            Some(FixedDateHoliday { month, day })
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl RecurringHoliday for FixedDateHoliday {
    fn holiday_date(&self, year: i32) -> Option<NaiveDate> {
        // February 29 yields nothing in common years
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}
