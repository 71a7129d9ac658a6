use crate::data::{AppSettings, CountdownData, NewCountdown, Store};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;

pub fn run(store: &Store) -> Result<()> {
    fs::create_dir_all(store.dir())
        .with_context(|| format!("failed to create {}", store.dir().display()))?;
    run_in_dir(store)?;
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes the default settings and sample countdowns. Existing files are
/// overwritten.
pub(crate) fn run_in_dir(store: &Store) -> Result<()> {
    let settings = AppSettings::default();
    settings.save(store)?;
    let data = sample_countdowns(&settings)?;
    store.save(&data)?;
    tracing::info!("initialized data directory {}", store.dir().display());
    Ok(())
}

fn sample_countdowns(settings: &AppSettings) -> Result<CountdownData> {
    let mut data = CountdownData::default();

    let mut year_end = NewCountdown::new("Year-end 2026", d(2026, 12, 31));
    year_end.description = Some("Work days left in the year".to_string());
    year_end.holidays = holidays_2026();
    year_end.enabled_widgets = settings.default_widgets.clone();
    data.create(&settings.user, year_end, at(2026, 1, 1))?;

    let mut summer = NewCountdown::new("Summer break", d(2026, 6, 26));
    summer.holidays = holidays_2026();
    summer.pto_dates = vec![d(2026, 4, 3), d(2026, 4, 6)];
    summer.floating_holidays = 2;
    summer.pto_days = 15;
    summer.enabled_widgets = settings.default_widgets.clone();
    data.create(&settings.user, summer, at(2026, 3, 2))?;

    Ok(data)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default()
}

fn at(y: i32, m: u32, day: u32) -> NaiveDateTime {
    d(y, m, day).and_time(chrono::NaiveTime::MIN)
}

fn holidays_2026() -> Vec<NaiveDate> {
    vec![
        d(2026, 1, 1),   // New Year's Day
        d(2026, 1, 19),  // Martin Luther King Jr. Day
        d(2026, 2, 16),  // Presidents' Day
        d(2026, 5, 25),  // Memorial Day
        d(2026, 6, 19),  // Juneteenth
        d(2026, 7, 3),   // Independence Day (observed)
        d(2026, 9, 7),   // Labor Day
        d(2026, 11, 11), // Veterans Day
        d(2026, 11, 26), // Thanksgiving Day
        d(2026, 11, 27),
        d(2026, 12, 24),
        d(2026, 12, 25), // Christmas Day
    ]
}
