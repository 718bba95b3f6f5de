use chrono::{Datelike, NaiveDate};


pub trait RecurringHoliday: Send + Sync {

    /// Date on which the holiday falls in `year`, if the rule is defined there.
    fn holiday_date(&self, year: i32) -> Option<NaiveDate>;

    fn is_holiday(&self, d: &NaiveDate) -> bool {
        self.holiday_date(d.year()).is_some_and(|holiday| holiday == *d)
    }
}
