use crate::calc::workday::DAY_NAMES;
use crate::calc::{generate_contribution_data, week_columns, ContributionLevel, ContributionRecord};
use crate::cmd::select_countdown;
use crate::data::{Countdown, CountdownData, Store};
use anyhow::Result;

pub fn run(store: &Store, key: Option<&str>, json: bool) -> Result<()> {
    let data: CountdownData = store.load()?;
    let countdown = select_countdown(&data, key)?;
    let records = generate_contribution_data(
        countdown.start_date(),
        countdown.target_date,
        &countdown.schedule(),
    );

    let mut out = std::io::stdout();
    if json {
        serde_json::to_writer_pretty(&mut out, &records)?;
        println!();
        Ok(())
    } else {
        write_grid(countdown, &records, &mut out)
    }
}

pub(crate) fn cell_symbol(level: Option<ContributionLevel>) -> char {
    match level {
        Some(ContributionLevel::WorkDay) => '#',
        Some(ContributionLevel::Holiday) => 'H',
        Some(ContributionLevel::Pto) => 'P',
        Some(ContributionLevel::NoWork) => '.',
        None => ' ',
    }
}

pub(crate) fn write_grid<W: std::io::Write>(
    countdown: &Countdown,
    records: &[ContributionRecord],
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "Work schedule for {} [{} - {}]",
        countdown.name,
        countdown.start_date().format("%Y-%m-%d"),
        countdown.target_date.format("%Y-%m-%d")
    )?;
    writeln!(out, "---")?;

    let columns = week_columns(records);
    for (row, day) in DAY_NAMES.iter().enumerate() {
        let cells: String = columns.iter().map(|col| cell_symbol(col[row])).collect();
        writeln!(out, "{:<4}{}", &day[..3], cells.trim_end())?;
    }

    writeln!(out, "---")?;
    let legend: Vec<String> = ContributionLevel::ALL
        .iter()
        .map(|level| {
            let count = records.iter().filter(|r| r.kind() == *level).count();
            format!("{} {} ({})", cell_symbol(Some(*level)), level.label(), count)
        })
        .collect();
    writeln!(out, "{}", legend.join("  "))?;
    writeln!(out, "Total: {} day(s)", records.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NewCountdown;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn render(c: &Countdown) -> String {
        let records = generate_contribution_data(c.start_date(), c.target_date, &c.schedule());
        let mut buf = Vec::new();
        write_grid(c, &records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_grid_rows_and_legend() {
        let mut data = CountdownData::default();
        // Wed 2024-01-03 .. Tue 2024-01-09, holiday on Friday, PTO on Monday
        let mut new = NewCountdown::new("Sprint", d(2024, 1, 9));
        new.holidays = vec![d(2024, 1, 5)];
        new.pto_dates = vec![d(2024, 1, 8)];
        let c = data
            .create("me", new, d(2024, 1, 3).and_hms_opt(9, 0, 0).unwrap())
            .unwrap();
        let out = render(&c);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Work schedule for Sprint [2024-01-03 - 2024-01-09]");
        assert_eq!(lines[2], "Sun  .");
        assert_eq!(lines[3], "Mon  P");
        assert_eq!(lines[4], "Tue  #");
        assert_eq!(lines[5], "Wed #");
        assert_eq!(lines[6], "Thu #");
        assert_eq!(lines[7], "Fri H");
        assert_eq!(lines[8], "Sat .");
        assert!(out.contains("# Work Day (3)  H Holiday (1)  P PTO Day (1)  . No Work (2)"));
        assert!(out.contains("Total: 7 day(s)"));
    }

    #[test]
    fn test_cell_symbol_empty() {
        assert_eq!(cell_symbol(None), ' ');
    }

    #[test]
    fn test_run_unknown_key_is_error() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path());
        let err = run(&store, Some("nope"), false).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
