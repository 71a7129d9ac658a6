use crate::data::{CountdownData, Store};
use crate::ui::dashboard::{run_app, App};
use crate::ui::{install_panic_hook, restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::NaiveDateTime;

/// Opens the dashboard. With `live` set the clock advances every second;
/// otherwise `now` stays frozen.
pub fn run(store: &Store, now: NaiveDateTime, live: bool) -> Result<()> {
    let data: CountdownData = store.load()?;
    let countdowns = data.active().into_iter().cloned().collect();

    // Decode schedules before entering the alternate screen so fallback
    // warnings land on a normal terminal.
    let mut app = App::new(countdowns, now);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app, live);
    restore_terminal(&mut terminal)?;

    result
}
