use crate::calc::workday::{classify_range, ScheduleConfig};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkDaySummary {
    /// Calendar span from the clamped start to the target, not an inclusive count.
    pub total_days: i64,
    pub work_days: i64,
    /// Holidays falling on work days.
    pub holidays: i64,
    /// PTO days falling on work days.
    pub pto_days: i64,
    pub floating_holidays: i64,
    /// Unclamped; negative when the schedule books more days off than it has work days.
    pub remaining_work_days: i64,
    pub percentage_complete: f64,
    /// Measured from `now` itself, not from the clamped start.
    pub days_until_target: i64,
    pub weeks_until_target: i64,
    /// Fixed 30-day months.
    pub months_until_target: i64,
}

/// Colour band of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Low,
    Mid,
    High,
}

impl ProgressBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 75.0 {
            ProgressBand::High
        } else if percentage >= 50.0 {
            ProgressBand::Mid
        } else {
            ProgressBand::Low
        }
    }
}

impl WorkDaySummary {
    pub fn band(&self) -> ProgressBand {
        ProgressBand::from_percentage(self.percentage_complete)
    }

    /// Bar fill in [0, 1]. The percentage itself may fall outside 0-100.
    pub fn fill_ratio(&self) -> f64 {
        (self.percentage_complete / 100.0).clamp(0.0, 1.0)
    }
}

/// Ceiling division for a positive divisor, correct for negative numerators.
pub(crate) fn ceil_div(numerator: i64, divisor: i64) -> i64 {
    let q = numerator / divisor;
    if numerator % divisor > 0 { q + 1 } else { q }
}

/// Counts work days, days off and derived countdown metrics between `start`
/// and the target `end`.
///
/// The traversal starts at the later of `start` and `now`'s calendar day, so
/// past days never count toward remaining work. `percentage_complete` divides
/// a calendar-day total by a work-day remainder; that mix is the defined
/// progress measure.
pub fn calculate_work_days(
    start: NaiveDate,
    end: NaiveDate,
    schedule: &ScheduleConfig,
    now: NaiveDateTime,
) -> WorkDaySummary {
    let start = start.max(now.date());
    let total_days = (end - start).num_days();

    let mut work_days = 0i64;
    let mut holidays = 0i64;
    let mut pto_days = 0i64;
    let mut floating_holidays = 0i64;

    for day in classify_range(start, end, schedule) {
        if day.is_floating_holiday {
            floating_holidays += 1;
        }
        if day.is_work_day {
            work_days += 1;
            if day.is_holiday {
                holidays += 1;
            }
            if day.is_pto_day {
                pto_days += 1;
            }
        }
    }

    let remaining_work_days = work_days - holidays - pto_days - floating_holidays;
    let percentage_complete = if total_days > 0 {
        (total_days - remaining_work_days) as f64 / total_days as f64 * 100.0
    } else {
        0.0
    };

    let target = end.and_time(NaiveTime::MIN);
    let days_until_target = ceil_div((target - now).num_milliseconds(), MILLIS_PER_DAY);

    WorkDaySummary {
        total_days,
        work_days,
        holidays,
        pto_days,
        floating_holidays,
        remaining_work_days,
        percentage_complete,
        days_until_target,
        weeks_until_target: ceil_div(days_until_target, 7),
        months_until_target: ceil_div(days_until_target, 30),
    }
}
