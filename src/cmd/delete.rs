use crate::data::{CountdownData, Store};
use anyhow::Result;
use chrono::NaiveDateTime;

pub fn run(store: &Store, key: &str, now: NaiveDateTime) -> Result<()> {
    let mut data: CountdownData = store.load()?;
    let removed = data.delete(key, now)?;
    store.save(&data)?;
    println!("Deleted countdown {} ({})", removed.short_id(), removed.name);
    Ok(())
}
