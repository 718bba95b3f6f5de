use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, TimeDelta};
use thiserror::Error;

use crate::locale::ptbr::{day_month_label, weekday_label};
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::timesource::Instant;
use crate::time::utility::is_weekend;

use super::holidaytable::HolidayTable;

pub const HOLIDAY_FALLBACK_MESSAGE: &'static str = "Não foi possível calcular o próximo feriado.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HolidayError {
    #[error("no holiday found after the given instant")]
    NotFound
}

/// Article placed before the weekday name: "no sábado", "numa terça-feira".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preposition {
    No,
    Numa
}

impl Preposition {
    pub fn for_date(date: &Instant) -> Preposition {
        if is_weekend(date.date_naive()) {
            Preposition::No
        } else {
            Preposition::Numa
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preposition::No => "no",
            Preposition::Numa => "numa"
        }
    }
}

impl fmt::Display for Preposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingHoliday {
    name: String,
    date: Instant,
    day_count_remaining: i64,
    weekday_label: &'static str,
    date_label: String,
    preposition: Preposition
}

impl UpcomingHoliday {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> Instant {
        self.date
    }

    pub fn day_count_remaining(&self) -> i64 {
        self.day_count_remaining
    }

    pub fn weekday_label(&self) -> &'static str {
        self.weekday_label
    }

    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    pub fn preposition(&self) -> Preposition {
        self.preposition
    }

    pub fn to_markup(&self) -> String {
        format!(
            "O próximo feriado é <strong>{}</strong>, que cai {} <strong>{}</strong>, dia <strong>{}</strong>. Faltam <strong>{} dias</strong>.",
            self.name,
            self.preposition,
            self.weekday_label,
            self.date_label,
            self.day_count_remaining
        )
    }
}

/// Whole days until `delta` has elapsed, rounding any partial day up.
pub fn ceil_days(delta: TimeDelta) -> i64 {
    let whole = delta.num_days();
    if delta > TimeDelta::days(whole) {
        whole + 1
    } else {
        whole
    }
}

pub struct HolidayCalculator {
    calendar: Arc<HolidayCalendar>
}

impl HolidayCalculator {
    pub fn new(calendar: Arc<HolidayCalendar>) -> HolidayCalculator {
        HolidayCalculator { calendar }
    }

    pub fn brazil_national() -> HolidayCalculator {
        HolidayCalculator::new(Arc::new(HolidayCalendar::brazil_national()))
    }

    pub fn calendar(&self) -> &Arc<HolidayCalendar> {
        &self.calendar
    }

    /// Table used for a lookup at `now`, built in `now`'s own timezone.
    pub fn table_for(&self, now: &Instant) -> HolidayTable {
        HolidayTable::build(&self.calendar, now.year(), now.timezone())
    }

    /// First holiday strictly after `now`.
    pub fn next_holiday(&self, now: &Instant) -> Result<UpcomingHoliday, HolidayError> {
        let table = self.table_for(now);
        let entry = table.first_after(now).ok_or(HolidayError::NotFound)?;
        let date = entry.date();

        Ok(UpcomingHoliday {
            name: entry.name().to_owned(),
            date,
            day_count_remaining: ceil_days(date - *now),
            weekday_label: weekday_label(&date),
            date_label: day_month_label(&date),
            preposition: Preposition::for_date(&date)
        })
    }
}

/// Markup for the holiday region, or the fallback sentence.
pub fn render_holiday(outcome: &Result<UpcomingHoliday, HolidayError>) -> String {
    match outcome {
        Ok(upcoming) => upcoming.to_markup(),
        Err(HolidayError::NotFound) => HOLIDAY_FALLBACK_MESSAGE.to_owned()
    }
}
