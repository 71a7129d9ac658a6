use crate::data::countdown::{parse_date, CountdownUpdate, NewCountdown};
use crate::data::{AppSettings, WidgetKind};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;

/// Schedule options shared by `create` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScheduleArgs {
    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
    /// Work days as weekday numbers (0=Sunday) or names, comma separated
    #[arg(long, value_delimiter = ',', value_parser = parse_weekday_arg)]
    pub work_days: Option<Vec<u8>>,
    /// Holiday date (YYYY-MM-DD); repeat for several
    #[arg(long = "holiday", value_parser = parse_date_arg)]
    pub holidays: Option<Vec<NaiveDate>>,
    /// Remove every holiday
    #[arg(long, conflicts_with = "holidays")]
    pub clear_holidays: bool,
    /// PTO date (YYYY-MM-DD); repeat for several
    #[arg(long = "pto", value_parser = parse_date_arg)]
    pub pto_dates: Option<Vec<NaiveDate>>,
    /// Remove every PTO date
    #[arg(long, conflicts_with = "pto_dates")]
    pub clear_pto: bool,
    /// Number of floating holidays to spend on the earliest work days
    #[arg(long)]
    pub floating_holidays: Option<u32>,
    /// PTO allowance in days
    #[arg(long)]
    pub pto_days: Option<u32>,
    /// Enabled widgets, comma separated (timer,progress,contribution,stats)
    #[arg(long, value_delimiter = ',', value_parser = parse_widget_arg)]
    pub widgets: Option<Vec<WidgetKind>>,
}

impl ScheduleArgs {
    pub fn into_new(self, name: &str, target: NaiveDate, settings: &AppSettings) -> NewCountdown {
        let mut new = NewCountdown::new(name, target);
        new.description = self.description;
        if let Some(days) = self.work_days {
            new.work_days = days;
        }
        new.holidays = self.holidays.unwrap_or_default();
        new.pto_dates = self.pto_dates.unwrap_or_default();
        new.floating_holidays = self.floating_holidays.unwrap_or(0);
        new.pto_days = self.pto_days.unwrap_or(0);
        new.enabled_widgets = self
            .widgets
            .unwrap_or_else(|| settings.default_widgets.clone());
        new
    }

    pub fn into_update(self, name: Option<String>, target: Option<NaiveDate>) -> CountdownUpdate {
        CountdownUpdate {
            name,
            description: self.description,
            target_date: target,
            work_days: self.work_days,
            holidays: if self.clear_holidays {
                Some(Vec::new())
            } else {
                self.holidays
            },
            pto_dates: if self.clear_pto {
                Some(Vec::new())
            } else {
                self.pto_dates
            },
            floating_holidays: self.floating_holidays,
            pto_days: self.pto_days,
            enabled_widgets: self.widgets,
        }
    }
}

pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_now_arg(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN)))
        .map_err(|_| format!("invalid time '{}', expected YYYY-MM-DDTHH:MM:SS", s))
}

pub fn parse_weekday_arg(s: &str) -> Result<u8, String> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u8>() {
        return if n <= 6 {
            Ok(n)
        } else {
            Err(format!("weekday {} out of range 0-6", n))
        };
    }
    let lower = s.to_ascii_lowercase();
    crate::calc::workday::DAY_NAMES
        .iter()
        .position(|name| lower.len() >= 3 && name.to_ascii_lowercase().starts_with(&lower))
        .map(|i| i as u8)
        .ok_or_else(|| format!("unknown weekday '{}'", s))
}

pub fn parse_widget_arg(s: &str) -> Result<WidgetKind, String> {
    WidgetKind::from_id(s.trim()).ok_or_else(|| {
        let choices: Vec<String> = WidgetKind::ALL
            .iter()
            .map(|w| format!("  {:<14} {}", w.id(), w.description()))
            .collect();
        format!("unknown widget '{}', expected one of:\n{}", s, choices.join("\n"))
    })
}
