use std::cell::RefCell;

use chrono::{
    DateTime,
    NaiveDate,
    NaiveTime,
    TimeDelta,
    TimeZone,
    Utc
};
use chrono_tz::Tz;
use thiserror::Error;

pub const BRASILIA_TIMEZONE: &'static str = "America/Sao_Paulo";

/// A point in civil time, normalized to one timezone.
pub type Instant = DateTime<Tz>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("timezone '{timezone}' could not be resolved")]
    Configuration { timezone: String }
}

pub trait TimeSource {
    fn now(&self) -> Result<Instant, ClockError>;
}

pub fn resolve_timezone(name: &str) -> Result<Tz, ClockError> {
    let trimmed = name.trim();
    trimmed.parse::<Tz>().map_err(|error| {
        tracing::error!(timezone = %trimmed, error = %error, "invalid timezone id");
        ClockError::Configuration { timezone: trimmed.to_owned() }
    })
}

/// Reads the system clock and converts it into a named timezone.
///
/// Resolution happens once, at construction. A source built from an unknown
/// zone keeps the error and returns it from every `now()` call.
pub struct CivilTimeSource {
    timezone: Result<Tz, ClockError>
}

impl CivilTimeSource {
    pub fn new(timezone_name: &str) -> CivilTimeSource {
        CivilTimeSource { timezone: resolve_timezone(timezone_name) }
    }

    pub fn brasilia() -> CivilTimeSource {
        CivilTimeSource::new(BRASILIA_TIMEZONE)
    }

    pub fn timezone(&self) -> Result<Tz, ClockError> {
        self.timezone.clone()
    }
}

impl TimeSource for CivilTimeSource {
    fn now(&self) -> Result<Instant, ClockError> {
        let timezone = self.timezone.clone()?;
        Ok(Utc::now().with_timezone(&timezone))
    }
}

/// Manually driven source for tests and reproducible runs.
pub struct FixedTimeSource {
    current: RefCell<Result<Instant, ClockError>>
}

impl FixedTimeSource {
    pub fn new(now: Instant) -> FixedTimeSource {
        FixedTimeSource { current: RefCell::new(Ok(now)) }
    }

    /// A source that always fails the way an unresolvable zone does.
    pub fn failing(timezone_name: &str) -> FixedTimeSource {
        FixedTimeSource {
            current: RefCell::new(Err(ClockError::Configuration { timezone: timezone_name.to_owned() }))
        }
    }

    pub fn set(&self, now: Instant) {
        *self.current.borrow_mut() = Ok(now);
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut current = self.current.borrow_mut();
        if let Ok(now) = current.as_mut() {
            *now = *now + by;
        }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Result<Instant, ClockError> {
        self.current.borrow().clone()
    }
}

/// Local midnight of `date` in `timezone`.
///
/// Where midnight was skipped by a daylight-saving jump, the first local time
/// that exists on that day is returned instead.
pub fn start_of_day(timezone: Tz, date: NaiveDate) -> Option<Instant> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(instant) = timezone.from_local_datetime(&midnight).earliest() {
        return Some(instant);
    }
    (1..=96)
        .map(|quarter| midnight + TimeDelta::minutes(15 * quarter))
        .find_map(|local| timezone.from_local_datetime(&local).earliest())
}
