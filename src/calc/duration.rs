use crate::calc::summary::MILLIS_PER_DAY;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub const TARGET_REACHED: &str = "Target date reached!";

fn unit(count: i64, name: &str) -> String {
    if count == 1 {
        format!("{} {}", count, name)
    } else {
        format!("{} {}s", count, name)
    }
}

/// Human readable form of a day count, e.g. `"1 year, 2 months, 3 days"`.
///
/// Years are 365 days, months 30 and weeks 7; each unit takes what is left
/// after the larger ones. Zero components are omitted.
pub fn format_time_remaining(days: i64) -> String {
    if days <= 0 {
        return TARGET_REACHED.to_string();
    }

    let years = days / 365;
    let rest = days % 365;
    let months = rest / 30;
    let rest = rest % 30;
    let weeks = rest / 7;
    let rest = rest % 7;

    [(years, "year"), (months, "month"), (weeks, "week"), (rest, "day")]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, name)| unit(count, name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Live countdown to the start of the target day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_millis: i64,
}

impl TimeLeft {
    pub fn until(target: NaiveDate, now: NaiveDateTime) -> Self {
        let difference = (target.and_time(NaiveTime::MIN) - now).num_milliseconds();
        if difference <= 0 {
            return TimeLeft::default();
        }
        TimeLeft {
            days: difference / MILLIS_PER_DAY,
            hours: (difference % MILLIS_PER_DAY) / 3_600_000,
            minutes: (difference % 3_600_000) / 60_000,
            seconds: (difference % 60_000) / 1_000,
            total_millis: difference,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.total_millis <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reached_for_zero_and_negative() {
        assert_eq!(format_time_remaining(0), "Target date reached!");
        assert_eq!(format_time_remaining(-5), "Target date reached!");
    }

    #[test]
    fn test_single_day() {
        assert_eq!(format_time_remaining(1), "1 day");
        assert_eq!(format_time_remaining(2), "2 days");
    }

    #[test]
    fn test_week_and_day() {
        assert_eq!(format_time_remaining(7), "1 week");
        assert_eq!(format_time_remaining(8), "1 week, 1 day");
        assert_eq!(format_time_remaining(22), "3 weeks, 1 day");
    }

    #[test]
    fn test_units_taken_from_remainders_in_order() {
        // 400 = 365 + 30 + 5
        assert_eq!(format_time_remaining(400), "1 year, 1 month, 5 days");
        // 59 = 30 + 28 + 1
        assert_eq!(format_time_remaining(59), "1 month, 4 weeks, 1 day");
    }

    #[test]
    fn test_zero_components_omitted() {
        assert_eq!(format_time_remaining(365), "1 year");
        assert_eq!(format_time_remaining(30), "1 month");
        assert_eq!(format_time_remaining(372), "1 year, 1 week");
    }

    #[test]
    fn test_plural_units() {
        assert_eq!(format_time_remaining(2 * 365 + 2 * 30 + 2 * 7 + 2), "2 years, 2 months, 2 weeks, 2 days");
    }

    #[test]
    fn test_time_left_breakdown() {
        let target = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(21, 29, 15)
            .unwrap();
        let left = TimeLeft::until(target, now);
        assert_eq!(left.days, 1);
        assert_eq!(left.hours, 2);
        assert_eq!(left.minutes, 30);
        assert_eq!(left.seconds, 45);
        assert!(!left.is_expired());
    }

    #[test]
    fn test_time_left_expired() {
        let target = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let now = target.and_hms_opt(0, 0, 1).unwrap();
        let left = TimeLeft::until(target, now);
        assert_eq!(left, TimeLeft::default());
        assert!(left.is_expired());
    }
}
