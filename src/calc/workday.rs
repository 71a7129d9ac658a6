use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Weekday names indexed the same way as `ScheduleConfig::work_days` (0 = Sunday).
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Monday through Friday.
pub const DEFAULT_WORK_DAYS: [u8; 5] = [1, 2, 3, 4, 5];

/// Schedule rules a date range is classified against.
///
/// All date sets hold plain calendar days, so membership is calendar-day
/// equality with no time-of-day component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub work_days: BTreeSet<u8>,
    pub holidays: BTreeSet<NaiveDate>,
    pub pto_days: BTreeSet<NaiveDate>,
    pub floating_holiday_budget: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            work_days: DEFAULT_WORK_DAYS.into_iter().collect(),
            holidays: BTreeSet::new(),
            pto_days: BTreeSet::new(),
            floating_holiday_budget: 0,
        }
    }
}

impl ScheduleConfig {
    pub fn new(work_days: impl IntoIterator<Item = u8>) -> Self {
        ScheduleConfig {
            work_days: work_days.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays = holidays.into_iter().collect();
        self
    }

    pub fn with_pto_days(mut self, pto_days: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.pto_days = pto_days.into_iter().collect();
        self
    }

    pub fn with_floating_holiday_budget(mut self, budget: u32) -> Self {
        self.floating_holiday_budget = budget;
        self
    }
}

/// Stateless flags for a single day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayFlags {
    pub is_work_day: bool,
    pub is_holiday: bool,
    pub is_pto_day: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayClassification {
    pub date: NaiveDate,
    pub day_of_week: u8,
    pub day_name: &'static str,
    pub is_work_day: bool,
    pub is_holiday: bool,
    pub is_pto_day: bool,
    pub is_floating_holiday: bool,
}

/// 0 = Sunday ... 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn day_name(index: u8) -> &'static str {
    DAY_NAMES.get(index as usize).copied().unwrap_or("Unknown")
}

pub fn classify_day(
    date: NaiveDate,
    work_days: &BTreeSet<u8>,
    holidays: &BTreeSet<NaiveDate>,
    pto_days: &BTreeSet<NaiveDate>,
) -> DayFlags {
    DayFlags {
        is_work_day: work_days.contains(&weekday_index(date)),
        is_holiday: holidays.contains(&date),
        is_pto_day: pto_days.contains(&date),
    }
}

/// Every calendar day in [start, end]. Empty when `end < start`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Classifies every day in [start, end] in date order.
///
/// The floating-holiday budget is consumed by the earliest eligible work days
/// (not a holiday, not PTO), so the running counter is carried across the
/// traversal rather than decided per day.
pub fn classify_range(
    start: NaiveDate,
    end: NaiveDate,
    schedule: &ScheduleConfig,
) -> Vec<DayClassification> {
    days_inclusive(start, end)
        .scan(0u32, |floating_used, date| {
            let flags = classify_day(
                date,
                &schedule.work_days,
                &schedule.holidays,
                &schedule.pto_days,
            );
            let is_floating_holiday = flags.is_work_day
                && !flags.is_holiday
                && !flags.is_pto_day
                && *floating_used < schedule.floating_holiday_budget;
            if is_floating_holiday {
                *floating_used += 1;
            }
            let day_of_week = weekday_index(date);
            Some(DayClassification {
                date,
                day_of_week,
                day_name: day_name(day_of_week),
                is_work_day: flags.is_work_day,
                is_holiday: flags.is_holiday,
                is_pto_day: flags.is_pto_day,
                is_floating_holiday,
            })
        })
        .collect()
}
