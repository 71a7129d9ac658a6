use crate::cmd::args::ScheduleArgs;
use crate::data::{CountdownData, Store};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

pub fn run(
    store: &Store,
    key: &str,
    name: Option<String>,
    target: Option<NaiveDate>,
    schedule: ScheduleArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let mut data: CountdownData = store.load()?;
    let updated = data.update(key, schedule.into_update(name, target), now)?;
    store.save(&data)?;
    println!("Updated countdown {} ({})", updated.short_id(), updated.name);
    Ok(())
}
