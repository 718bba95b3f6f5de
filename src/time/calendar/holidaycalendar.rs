use std::sync::Arc;

use chrono::NaiveDate;

use crate::time::recurringholiday::easterrelatedholiday::EasterRelatedHoliday;
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;

pub const BRAZIL_NATIONAL: &'static str = "BrazilNational";

/// A display name paired with the rule producing its date.
///
/// Names are not keys: the same name may appear under different rules.
#[derive(Clone)]
pub struct NamedHoliday {
    name: String,
    rule: Arc<dyn RecurringHoliday>
}

impl NamedHoliday {
    pub fn new(name: impl Into<String>, rule: Arc<dyn RecurringHoliday>) -> NamedHoliday {
        NamedHoliday { name: name.into(), rule }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &Arc<dyn RecurringHoliday> {
        &self.rule
    }

    pub fn date_in(&self, year: i32) -> Option<NaiveDate> {
        self.rule.holiday_date(year)
    }
}

pub struct HolidayCalendar {
    name: String,
    holidays: Vec<NamedHoliday>
}

impl HolidayCalendar {
    pub fn new(name: impl Into<String>, holidays: Vec<NamedHoliday>) -> HolidayCalendar {
        HolidayCalendar { name: name.into(), holidays }
    }

    /// Brazilian national holidays, moveable feasts derived from Easter.
    pub fn brazil_national() -> HolidayCalendar {
        fn fixed(name: &str, month: u32, day: u32) -> NamedHoliday {
            let rule = FixedDateHoliday::new(month, day)
                .unwrap_or_else(|| unreachable!("invalid built-in holiday {}", name));
            NamedHoliday::new(name, Arc::new(rule))
        }

        fn easter_related(name: &str, rule: EasterRelatedHoliday) -> NamedHoliday {
            NamedHoliday::new(name, Arc::new(rule))
        }

        HolidayCalendar::new(BRAZIL_NATIONAL, vec![
            fixed("Ano Novo", 1, 1),
            easter_related("Carnaval", EasterRelatedHoliday::carnival()),
            easter_related("Sexta-feira Santa", EasterRelatedHoliday::good_friday()),
            fixed("Tiradentes", 4, 21),
            fixed("Dia do Trabalho", 5, 1),
            easter_related("Corpus Christi", EasterRelatedHoliday::corpus_christi()),
            fixed("Independência", 9, 7),
            fixed("Nossa Sra. Aparecida", 10, 12),
            fixed("Finados", 11, 2),
            fixed("Proclamação da República", 11, 15),
            fixed("Consciência Negra", 11, 20),
            fixed("Natal", 12, 25),
        ])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn holidays(&self) -> &[NamedHoliday] {
        &self.holidays
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// All holidays falling in `year`, in ascending date order.
    ///
    /// Rules undefined for the year are left out. Holidays sharing a date keep
    /// their declaration order.
    pub fn holidays_in(&self, year: i32) -> Vec<(&str, NaiveDate)> {
        let mut dated: Vec<(&str, NaiveDate)> = self.holidays
            .iter()
            .filter_map(|h| h.date_in(year).map(|d| (h.name(), d)))
            .collect();
        dated.sort_by_key(|&(_, d)| d);
        dated
    }

    pub fn is_holiday(&self, d: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.rule.is_holiday(&d))
    }

    pub fn holiday_name(&self, d: NaiveDate) -> Option<&str> {
        self.holidays
            .iter()
            .find(|h| h.rule.is_holiday(&d))
            .map(|h| h.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn brazil_has_twelve_holidays() {
        let calendar = HolidayCalendar::brazil_national();
        assert_eq!(calendar.name(), BRAZIL_NATIONAL);
        assert_eq!(calendar.len(), 12);
        assert_eq!(calendar.holidays_in(2026).len(), 12);
    }

    #[test]
    fn holidays_2026_in_calendar_order() {
        let calendar = HolidayCalendar::brazil_national();
        let expected = vec![
            ("Ano Novo", ymd(2026, 1, 1)),
            ("Carnaval", ymd(2026, 2, 17)),
            ("Sexta-feira Santa", ymd(2026, 4, 3)),
            ("Tiradentes", ymd(2026, 4, 21)),
            ("Dia do Trabalho", ymd(2026, 5, 1)),
            ("Corpus Christi", ymd(2026, 6, 4)),
            ("Independência", ymd(2026, 9, 7)),
            ("Nossa Sra. Aparecida", ymd(2026, 10, 12)),
            ("Finados", ymd(2026, 11, 2)),
            ("Proclamação da República", ymd(2026, 11, 15)),
            ("Consciência Negra", ymd(2026, 11, 20)),
            ("Natal", ymd(2026, 12, 25)),
        ];
        assert_eq!(calendar.holidays_in(2026), expected);
    }

    #[test]
    fn declaration_order_does_not_matter() {
        let calendar = HolidayCalendar::new("Shuffled", vec![
            NamedHoliday::new("Natal", Arc::new(FixedDateHoliday::new(12, 25).unwrap())),
            NamedHoliday::new("Carnaval", Arc::new(EasterRelatedHoliday::carnival())),
            NamedHoliday::new("Ano Novo", Arc::new(FixedDateHoliday::new(1, 1).unwrap())),
        ]);
        let names: Vec<&str> = calendar.holidays_in(2026).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Ano Novo", "Carnaval", "Natal"]);
    }

    #[test]
    fn lookup_by_date() {
        let calendar = HolidayCalendar::brazil_national();
        assert!(calendar.is_holiday(ymd(2026, 6, 4)));
        assert!(!calendar.is_holiday(ymd(2026, 6, 5)));
        assert_eq!(calendar.holiday_name(ymd(2027, 2, 9)), Some("Carnaval"));
        assert_eq!(calendar.holiday_name(ymd(2027, 2, 17)), None);
    }
}
