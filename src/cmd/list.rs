use crate::calc::{calculate_work_days, format_time_remaining};
use crate::data::{CountdownData, Store};
use anyhow::Result;
use chrono::NaiveDateTime;

pub fn run(store: &Store, now: NaiveDateTime) -> Result<()> {
    let data: CountdownData = store.load()?;
    write_countdowns(&data, now, &mut std::io::stdout())
}

pub(crate) fn write_countdowns<W: std::io::Write>(
    data: &CountdownData,
    now: NaiveDateTime,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Countdowns")?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<10} {:<24} {:<12} {}",
        "ID", "Name", "Target", "Remaining"
    )?;
    let active = data.active();
    for c in &active {
        let summary = calculate_work_days(c.start_date(), c.target_date, &c.schedule(), now);
        writeln!(
            out,
            "  {:<10} {:<24} {:<12} {}",
            c.short_id(),
            c.name,
            c.target_date.format("%Y-%m-%d"),
            format_time_remaining(summary.days_until_target)
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} countdown(s)", active.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NewCountdown;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn noon(y: i32, m: u32, day: u32) -> NaiveDateTime {
        d(y, m, day).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_write_countdowns_empty() {
        let mut buf = Vec::new();
        write_countdowns(&CountdownData::default(), noon(2025, 1, 1), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Total: 0 countdown(s)"));
    }

    #[test]
    fn test_write_countdowns_shows_remaining_time() {
        let mut data = CountdownData::default();
        data.create("me", NewCountdown::new("Launch", d(2025, 1, 9)), noon(2024, 12, 1))
            .unwrap();
        let mut buf = Vec::new();
        write_countdowns(&data, noon(2025, 1, 1), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Launch"));
        assert!(out.contains("2025-01-09"));
        // 7.5 days rounds up to 8
        assert!(out.contains("1 week, 1 day"));
        assert!(out.contains("Total: 1 countdown(s)"));
    }

    #[test]
    fn test_write_countdowns_hides_deleted_and_marks_reached() {
        let mut data = CountdownData::default();
        let gone = data
            .create("me", NewCountdown::new("Gone", d(2025, 6, 1)), noon(2024, 12, 1))
            .unwrap();
        data.create("me", NewCountdown::new("Past", d(2024, 12, 20)), noon(2024, 12, 2))
            .unwrap();
        data.delete(&gone.id, noon(2024, 12, 3)).unwrap();
        let mut buf = Vec::new();
        write_countdowns(&data, noon(2025, 1, 1), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(!out.contains("Gone"));
        assert!(out.contains("Target date reached!"));
        assert!(out.contains("Total: 1 countdown(s)"));
    }
}
