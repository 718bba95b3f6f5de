use chrono_tz::Tz;

use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::timesource::{start_of_day, Instant};

/// A named holiday at the first instant of its day.
#[derive(Clone, Debug, PartialEq)]
pub struct HolidayEntry {
    name: String,
    date: Instant
}

impl HolidayEntry {
    pub fn new(name: impl Into<String>, date: Instant) -> HolidayEntry {
        HolidayEntry { name: name.into(), date }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> Instant {
        self.date
    }
}

/// Holidays of one year plus the first holiday of the next, in ascending order.
///
/// The trailing entry keeps a lookup made late on December 31 resolvable.
pub struct HolidayTable {
    year: i32,
    entries: Vec<HolidayEntry>
}

impl HolidayTable {
    pub fn build(calendar: &HolidayCalendar, year: i32, timezone: Tz) -> HolidayTable {
        let mut entries: Vec<HolidayEntry> = calendar
            .holidays_in(year)
            .into_iter()
            .filter_map(|(name, d)| start_of_day(timezone, d).map(|date| HolidayEntry::new(name, date)))
            .collect();

        let rollover = calendar
            .holidays_in(year + 1)
            .into_iter()
            .find_map(|(name, d)| start_of_day(timezone, d).map(|date| HolidayEntry::new(name, date)));
        entries.extend(rollover);

        // Stable, so equal dates keep calendar order
        entries.sort_by_key(|entry| entry.date);

        HolidayTable { year, entries }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn entries(&self) -> &[HolidayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry strictly later than `now`.
    pub fn first_after(&self, now: &Instant) -> Option<&HolidayEntry> {
        self.entries.iter().find(|entry| entry.date > *now)
    }
}
