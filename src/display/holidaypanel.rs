use chrono::NaiveDate;

use crate::holiday::holidaycalculator::{
    render_holiday,
    HolidayCalculator,
    HOLIDAY_FALLBACK_MESSAGE
};
use crate::time::timesource::TimeSource;

use super::displaysink::{DisplaySink, Region};

/// The next-holiday sentence. Recomputed only when the civil date changes,
/// since the remaining day count cannot move within a day.
pub struct HolidayPanel {
    calculator: HolidayCalculator,
    rendered_for: Option<NaiveDate>,
    showing_fallback: bool
}

impl HolidayPanel {
    pub fn new(calculator: HolidayCalculator) -> HolidayPanel {
        HolidayPanel { calculator, rendered_for: None, showing_fallback: false }
    }

    pub fn rendered_for(&self) -> Option<NaiveDate> {
        self.rendered_for
    }

    pub fn refresh(&mut self, source: &dyn TimeSource, sink: &dyn DisplaySink) {
        match source.now() {
            Ok(now) => {
                let today = now.date_naive();
                if self.rendered_for == Some(today) {
                    return;
                }

                let outcome = self.calculator.next_holiday(&now);
                match &outcome {
                    Ok(upcoming) => tracing::debug!(
                        holiday = upcoming.name(),
                        days = upcoming.day_count_remaining(),
                        "next holiday computed"
                    ),
                    Err(error) => tracing::warn!(%error, calendar = self.calculator.calendar().name(), "holiday lookup failed")
                }
                sink.set_markup(Region::Holiday, &render_holiday(&outcome));
                self.rendered_for = Some(today);
                self.showing_fallback = outcome.is_err();
            },
            Err(error) => {
                if !self.showing_fallback {
                    tracing::error!(%error, "holiday countdown disabled");
                    sink.set_text(Region::Holiday, HOLIDAY_FALLBACK_MESSAGE);
                    self.showing_fallback = true;
                }
                self.rendered_for = None;
            }
        }
    }
}
