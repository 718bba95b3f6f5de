use chrono::{Datelike, Timelike, Weekday};

use crate::time::timesource::Instant;

const WEEKDAY_NAMES: [&'static str; 7] = [
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
    "domingo"
];

const MONTH_NAMES: [&'static str; 12] = [
    "janeiro", "fevereiro", "março", "abril",
    "maio", "junho", "julho", "agosto",
    "setembro", "outubro", "novembro", "dezembro"
];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// `month` is 1-based; anything outside 1..=12 has no name.
pub fn month_name(month: u32) -> Option<&'static str> {
    month.checked_sub(1).and_then(|index| MONTH_NAMES.get(index as usize).copied())
}

/// `terça-feira`
pub fn weekday_label(instant: &Instant) -> &'static str {
    weekday_name(instant.weekday())
}

/// `17 de fevereiro`
pub fn day_month_label(instant: &Instant) -> String {
    format!("{} de {}", instant.day(), month_name(instant.month()).unwrap_or_default())
}

/// `terça-feira, 17 de fevereiro de 2026`
pub fn long_date_label(instant: &Instant) -> String {
    format!("{}, {} de {}", weekday_label(instant), day_month_label(instant), instant.year())
}

/// `09:05:03`, 24-hour clock.
pub fn time_label(instant: &Instant) -> String {
    format!("{:02}:{:02}:{:02}", instant.hour(), instant.minute(), instant.second())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Sao_Paulo;

    #[test]
    fn labels_for_carnival_2026() {
        let instant = Sao_Paulo.with_ymd_and_hms(2026, 2, 17, 0, 0, 0).unwrap();
        assert_eq!(weekday_label(&instant), "terça-feira");
        assert_eq!(day_month_label(&instant), "17 de fevereiro");
        assert_eq!(long_date_label(&instant), "terça-feira, 17 de fevereiro de 2026");
        assert_eq!(time_label(&instant), "00:00:00");
    }

    #[test]
    fn weekend_names_have_no_suffix() {
        assert_eq!(weekday_name(Weekday::Sat), "sábado");
        assert_eq!(weekday_name(Weekday::Sun), "domingo");
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), Some("janeiro"));
        assert_eq!(month_name(3), Some("março"));
        assert_eq!(month_name(12), Some("dezembro"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn time_label_pads_fields() {
        let instant = Sao_Paulo.with_ymd_and_hms(2026, 10, 14, 9, 5, 3).unwrap();
        assert_eq!(time_label(&instant), "09:05:03");
        assert_eq!(long_date_label(&instant), "quarta-feira, 14 de outubro de 2026");
    }

    #[test]
    fn formatting_is_deterministic() {
        let instant = Sao_Paulo.with_ymd_and_hms(2026, 12, 25, 18, 30, 0).unwrap();
        let first = (weekday_label(&instant), day_month_label(&instant), time_label(&instant));
        for _ in 0..3 {
            assert_eq!((weekday_label(&instant), day_month_label(&instant), time_label(&instant)), first);
        }
    }
}
