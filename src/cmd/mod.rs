pub mod args;
pub mod create;
pub mod delete;
pub mod grid;
pub mod init;
pub mod list;
pub mod root;
pub mod stats;
pub mod update;

use crate::data::{Countdown, CountdownData};
use anyhow::{Context, Result};

/// Resolves the countdown a command acts on: the one named by `key`, or the
/// newest active countdown when no key is given.
pub(crate) fn select_countdown<'a>(data: &'a CountdownData, key: Option<&str>) -> Result<&'a Countdown> {
    match key {
        Some(key) => data.find(key),
        None => data
            .first_active()
            .context("No active countdowns. Create one with `countdown create`."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NewCountdown;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_select_defaults_to_newest() {
        let mut data = CountdownData::default();
        let first = NewCountdown::new("First", d(2025, 6, 1));
        let second = NewCountdown::new("Second", d(2025, 9, 1));
        data.create("me", first, d(2025, 1, 1).and_hms_opt(0, 0, 0).unwrap()).unwrap();
        let c = data
            .create("me", second, d(2025, 2, 1).and_hms_opt(0, 0, 0).unwrap())
            .unwrap();
        assert_eq!(select_countdown(&data, None).unwrap().id, c.id);
        assert_eq!(select_countdown(&data, Some(c.short_id())).unwrap().name, "Second");
    }

    #[test]
    fn test_select_errors() {
        let data = CountdownData::default();
        let err = select_countdown(&data, None).unwrap_err();
        assert!(err.to_string().contains("No active countdowns"));
        let err = select_countdown(&data, Some("abc")).unwrap_err();
        assert!(err.to_string().contains("'abc'"));
    }
}
