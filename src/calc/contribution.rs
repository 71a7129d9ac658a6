use crate::calc::workday::{classify_day, days_inclusive, ScheduleConfig};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Grid cell category. The numeric value is the record's `level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContributionLevel {
    NoWork = 0,
    WorkDay = 1,
    Holiday = 2,
    Pto = 3,
}

impl ContributionLevel {
    pub const ALL: [ContributionLevel; 4] = [
        ContributionLevel::WorkDay,
        ContributionLevel::Holiday,
        ContributionLevel::Pto,
        ContributionLevel::NoWork,
    ];

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(ContributionLevel::NoWork),
            1 => Some(ContributionLevel::WorkDay),
            2 => Some(ContributionLevel::Holiday),
            3 => Some(ContributionLevel::Pto),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            ContributionLevel::NoWork => "No Work",
            ContributionLevel::WorkDay => "Work Day",
            ContributionLevel::Holiday => "Holiday",
            ContributionLevel::Pto => "PTO Day",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ContributionLevel::NoWork => "No work scheduled",
            ContributionLevel::WorkDay => "Work day",
            ContributionLevel::Holiday => "Holiday",
            ContributionLevel::Pto => "PTO day",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContributionRecord {
    /// Calendar day as `YYYY-MM-DD`.
    pub date: String,
    pub count: u8,
    pub level: u8,
}

impl ContributionRecord {
    fn new(date: NaiveDate, level: ContributionLevel) -> Self {
        ContributionRecord {
            date: date.format("%Y-%m-%d").to_string(),
            count: u8::from(level == ContributionLevel::WorkDay),
            level: level.level(),
        }
    }

    pub fn kind(&self) -> ContributionLevel {
        ContributionLevel::from_level(self.level).unwrap_or(ContributionLevel::NoWork)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Hover text, e.g. `"Jan 6, 2025: Work day"`.
    pub fn tooltip(&self) -> String {
        match self.parsed_date() {
            Some(date) => format!("{}: {}", date.format("%b %-d, %Y"), self.kind().describe()),
            None => self.date.clone(),
        }
    }
}

/// One record per calendar day in [start, end], for the grid widget.
///
/// Unlike the summary, `start` is not clamped to the current day and the
/// floating-holiday budget is ignored. A day that is both a holiday and PTO
/// reports as a holiday. The serialized date is the same calendar day that was
/// classified.
pub fn generate_contribution_data(
    start: NaiveDate,
    end: NaiveDate,
    schedule: &ScheduleConfig,
) -> Vec<ContributionRecord> {
    days_inclusive(start, end)
        .map(|date| {
            let flags = classify_day(
                date,
                &schedule.work_days,
                &schedule.holidays,
                &schedule.pto_days,
            );
            let level = if flags.is_work_day && !flags.is_holiday && !flags.is_pto_day {
                ContributionLevel::WorkDay
            } else if flags.is_holiday {
                ContributionLevel::Holiday
            } else if flags.is_pto_day {
                ContributionLevel::Pto
            } else {
                ContributionLevel::NoWork
            };
            ContributionRecord::new(date, level)
        })
        .collect()
}

/// Splits a series into week columns. A new column starts at the first record
/// and at every Sunday.
pub fn group_into_weeks(records: &[ContributionRecord]) -> Vec<Vec<ContributionRecord>> {
    let mut weeks: Vec<Vec<ContributionRecord>> = Vec::new();
    let mut current: Vec<ContributionRecord> = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let is_sunday = record
            .parsed_date()
            .map(|d| d.weekday() == Weekday::Sun)
            .unwrap_or(false);
        if (is_sunday || i == 0) && !current.is_empty() {
            weeks.push(std::mem::take(&mut current));
        }
        current.push(record.clone());
    }
    if !current.is_empty() {
        weeks.push(current);
    }
    weeks
}

/// Lays a series out as week columns of seven rows, Sunday first. Days
/// outside the series are `None`.
pub fn week_columns(records: &[ContributionRecord]) -> Vec<[Option<ContributionLevel>; 7]> {
    group_into_weeks(records)
        .iter()
        .map(|week| {
            let mut column = [None; 7];
            for record in week {
                if let Some(date) = record.parsed_date() {
                    column[date.weekday().num_days_from_sunday() as usize] = Some(record.kind());
                }
            }
            column
        })
        .collect()
}
