use chrono::{Datelike, NaiveDate, Weekday};

#[inline]
pub const fn is_leap (year: i32) -> bool {
    ((year % 4 == 0) && (year % 100!= 0)) || (year % 400 == 0)
}


pub const fn days_of_month (year: i32, month: u32) -> u32 {
    const NO_LEAP_EOM: [u32; 13] = [
        0, 31, 28, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    const LEAP_EOM: [u32; 13] = [
        0, 31, 29, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    if is_leap(year) {
        LEAP_EOM[month as usize]
    } else {
        NO_LEAP_EOM[month as usize]
    }
}

/// Largest day number a fixed `(month, day)` pair may use in any year.
/// February allows 29 so that leap-day rules are accepted and simply skip non-leap years.
pub const fn max_days_of_month(month: u32) -> u32 {
    days_of_month(2000, month)
}

#[inline]
pub fn is_weekend(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap(2024));
        assert!(is_leap(2000));
        assert!(!is_leap(1900));
        assert!(!is_leap(2026));
    }

    #[test]
    fn february_length_follows_leap_rule() {
        assert_eq!(days_of_month(2026, 2), 28);
        assert_eq!(days_of_month(2028, 2), 29);
        assert_eq!(max_days_of_month(2), 29);
        assert_eq!(max_days_of_month(11), 30);
    }

    #[test]
    fn weekend_detection() {
        // 2026-02-17 is a Tuesday, 2026-02-21 a Saturday
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2026, 2, 17).unwrap()));
        assert!(is_weekend(NaiveDate::from_ymd_opt(2026, 2, 21).unwrap()));
        assert!(is_weekend(NaiveDate::from_ymd_opt(2026, 2, 22).unwrap()));
    }
}
