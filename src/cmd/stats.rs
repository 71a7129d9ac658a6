use crate::calc::{calculate_work_days, format_time_remaining, WorkDaySummary};
use crate::cmd::select_countdown;
use crate::data::{Countdown, CountdownData, Store};
use anyhow::Result;
use chrono::NaiveDateTime;

pub fn run(store: &Store, key: Option<&str>, json: bool, now: NaiveDateTime) -> Result<()> {
    let data: CountdownData = store.load()?;
    let countdown = select_countdown(&data, key)?;
    let summary = calculate_work_days(
        countdown.start_date(),
        countdown.target_date,
        &countdown.schedule(),
        now,
    );

    let mut out = std::io::stdout();
    if json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        println!();
        Ok(())
    } else {
        write_stats(countdown, &summary, &mut out)
    }
}

pub(crate) fn write_stats<W: std::io::Write>(
    countdown: &Countdown,
    stats: &WorkDaySummary,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Countdown: {}", countdown.name)?;
    if let Some(description) = &countdown.description {
        writeln!(out, "{}", description)?;
    }
    writeln!(
        out,
        "Range: [{} - {}]",
        countdown.start_date().format("%Y-%m-%d"),
        countdown.target_date.format("%Y-%m-%d")
    )?;
    writeln!(out, "Target: {}", countdown.target_date.format("%B %-d, %Y"))?;
    writeln!(out, "---")?;
    writeln!(out, "{:<26} {:.1}%", "Progress:", stats.percentage_complete)?;
    writeln!(out, "{:<26} {}", "Total Days:", stats.total_days)?;
    writeln!(out, "{:<26} {}", "Remaining Work Days:", stats.remaining_work_days)?;
    writeln!(out, "---")?;
    writeln!(out, "{:<26} {}", "Days Until Target:", stats.days_until_target)?;
    writeln!(out, "{:<26} {}", "Weeks Until Target:", stats.weeks_until_target)?;
    writeln!(out, "{:<26} {}", "Months Until Target:", stats.months_until_target)?;
    writeln!(out, "---")?;
    writeln!(out, "{:<26} {}", "Work Days:", stats.work_days)?;
    writeln!(out, "{:<26} {}", "Holidays:", stats.holidays)?;
    writeln!(
        out,
        "{:<26} {} of {}",
        "Floating Holidays:", stats.floating_holidays, countdown.floating_holidays
    )?;
    writeln!(out, "{:<26} {}", "PTO Days:", stats.pto_days)?;
    writeln!(out, "{:<26} {}", "PTO Allowance:", countdown.pto_days)?;
    writeln!(out, "---")?;
    let remaining = format_time_remaining(stats.days_until_target);
    if stats.days_until_target > 0 {
        writeln!(out, "{} until target date", remaining)?;
    } else {
        writeln!(out, "{}", remaining)?;
    }
    Ok(())
}
