use crate::cmd::args::ScheduleArgs;
use crate::data::{AppSettings, Countdown, CountdownData, Store};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

pub fn run(
    store: &Store,
    name: &str,
    target: NaiveDate,
    schedule: ScheduleArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let settings = AppSettings::load(store)?;
    let mut data: CountdownData = store.load()?;
    let new = schedule.into_new(name, target, &settings);
    let countdown = data.create(&settings.user, new, now)?;
    store.save(&data)?;
    write_created(&countdown, &mut std::io::stdout())
}

pub(crate) fn write_created<W: std::io::Write>(c: &Countdown, out: &mut W) -> Result<()> {
    writeln!(out, "Created countdown {} ({})", c.short_id(), c.name)?;
    writeln!(out, "  Target:  {}", c.target_date.format("%Y-%m-%d"))?;
    writeln!(out, "  Id:      {}", c.id)?;
    Ok(())
}
