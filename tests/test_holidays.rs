use chrono::{NaiveDate, TimeDelta, TimeZone};
use chrono_tz::America::Sao_Paulo;
use proptest::prelude::*;

use dataehora::holiday::holidaycalculator::{HolidayCalculator, Preposition};
use dataehora::time::timesource::Instant;

fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> Instant {
    Sao_Paulo.with_ymd_and_hms(y, m, d, hh, mm, ss).unwrap()
}

/// Every second of a year maps to `start + offset`.
fn instant_in_year(year: i32, offset_secs: i64) -> Instant {
    at(year, 1, 1, 0, 0, 0) + TimeDelta::seconds(offset_secs)
}

const SECONDS_IN_COMMON_YEAR: i64 = 365 * 86_400;

#[test]
fn counts_down_through_2026() {
    let calculator = HolidayCalculator::brazil_national();
    let expected = [
        (at(2026, 1, 1, 0, 0, 1), "Carnaval", 47),
        (at(2026, 2, 17, 0, 0, 0), "Sexta-feira Santa", 45),
        (at(2026, 4, 4, 10, 0, 0), "Tiradentes", 17),
        (at(2026, 5, 1, 12, 0, 0), "Corpus Christi", 34),
        (at(2026, 6, 4, 0, 0, 0), "Independência", 95),
        (at(2026, 10, 14, 15, 30, 0), "Finados", 19),
        (at(2026, 11, 16, 8, 0, 0), "Consciência Negra", 4),
        (at(2026, 11, 21, 8, 0, 0), "Natal", 34),
    ];
    for (now, name, days) in expected {
        let upcoming = calculator.next_holiday(&now).unwrap();
        assert_eq!((upcoming.name(), upcoming.day_count_remaining()), (name, days), "at {}", now);
    }
}

#[test]
fn independence_day_2026_is_on_a_monday() {
    let upcoming = HolidayCalculator::brazil_national().next_holiday(&at(2026, 8, 1, 0, 0, 0)).unwrap();
    assert_eq!(upcoming.name(), "Independência");
    assert_eq!(upcoming.weekday_label(), "segunda-feira");
    assert_eq!(upcoming.date_label(), "7 de setembro");
    assert_eq!(upcoming.preposition(), Preposition::Numa);
}

#[test]
fn moveable_holidays_are_correct_after_2026() {
    let calculator = HolidayCalculator::brazil_national();
    let upcoming = calculator.next_holiday(&at(2027, 1, 2, 0, 0, 0)).unwrap();
    assert_eq!(upcoming.name(), "Carnaval");
    assert_eq!(upcoming.date().date_naive(), NaiveDate::from_ymd_opt(2027, 2, 9).unwrap());

    let upcoming = calculator.next_holiday(&at(2030, 3, 1, 0, 0, 0)).unwrap();
    assert_eq!(upcoming.name(), "Carnaval");
    assert_eq!(upcoming.date().date_naive(), NaiveDate::from_ymd_opt(2030, 3, 5).unwrap());
}

#[test]
fn weekend_new_year_uses_no() {
    // 2028-01-01 is a Saturday
    let upcoming = HolidayCalculator::brazil_national().next_holiday(&at(2027, 12, 26, 9, 0, 0)).unwrap();
    assert_eq!(upcoming.name(), "Ano Novo");
    assert_eq!(upcoming.weekday_label(), "sábado");
    assert_eq!(upcoming.preposition(), Preposition::No);
    assert_eq!(upcoming.day_count_remaining(), 6);
}

#[test]
fn count_decrements_once_per_midnight() {
    let calculator = HolidayCalculator::brazil_national();
    let mut now = at(2026, 8, 1, 0, 0, 1);
    let mut previous = calculator.next_holiday(&now).unwrap().day_count_remaining();
    let mut hours = 0;
    while previous > 1 {
        now = now + TimeDelta::hours(1);
        hours += 1;
        let count = calculator.next_holiday(&now).unwrap().day_count_remaining();
        if count != previous {
            assert_eq!(count, previous - 1, "at {}", now);
            assert_eq!(now.date_naive() - (now - TimeDelta::hours(1)).date_naive(), TimeDelta::days(1));
        }
        previous = count;
    }
    assert!(hours > 24 * 30);
}

proptest! {
    #[test]
    fn next_holiday_is_strictly_after_now(offset in 0i64..SECONDS_IN_COMMON_YEAR) {
        let now = instant_in_year(2026, offset);
        let upcoming = HolidayCalculator::brazil_national().next_holiday(&now).unwrap();
        prop_assert!(upcoming.date() > now);
        prop_assert!(upcoming.day_count_remaining() >= 1);
    }

    #[test]
    fn same_day_gives_same_holiday(day in 0i64..365, a in 0i64..86_400, b in 0i64..86_400) {
        let calculator = HolidayCalculator::brazil_national();
        let first = calculator.next_holiday(&instant_in_year(2026, day * 86_400 + a)).unwrap();
        let second = calculator.next_holiday(&instant_in_year(2026, day * 86_400 + b)).unwrap();
        prop_assert_eq!(first.name(), second.name());
        prop_assert_eq!(first.date(), second.date());
        prop_assert_eq!(first.day_count_remaining(), second.day_count_remaining());
    }

    #[test]
    fn count_matches_calendar_day_gap(year in 2020i32..2100, offset in 1i64..SECONDS_IN_COMMON_YEAR) {
        let now = instant_in_year(year, offset);
        let upcoming = HolidayCalculator::brazil_national().next_holiday(&now).unwrap();
        let gap = (upcoming.date().date_naive() - now.date_naive()).num_days();
        // now is never exactly midnight unless offset is a whole day
        if offset % 86_400 != 0 {
            prop_assert_eq!(upcoming.day_count_remaining(), gap);
        }
    }

    #[test]
    fn table_always_has_next_year_entry(year in 1583i32..4099) {
        let calculator = HolidayCalculator::brazil_national();
        let table = calculator.table_for(&at(year, 6, 1, 0, 0, 0));
        prop_assert_eq!(table.len(), 13);
        prop_assert!(table.entries().windows(2).all(|pair| pair[0].date() <= pair[1].date()));
    }
}
