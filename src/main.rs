mod calc;
mod cmd;
mod data;
mod ui;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use cmd::args::{parse_date_arg, parse_now_arg, ScheduleArgs};
use data::{AppSettings, Store};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "countdown", about = "Count the work days left until a target date")]
struct Cli {
    /// Path to the data directory containing config and data files (default: ./config)
    #[arg(long, global = true, default_value = "./config")]
    data_dir: PathBuf,

    /// Use this time instead of the clock (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, global = true, value_parser = parse_now_arg)]
    now: Option<NaiveDateTime>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default settings and sample countdowns
    Init,
    /// List active countdowns
    List,
    /// Add a countdown
    Create {
        /// Display name
        name: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        target: NaiveDate,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Change fields of a countdown; omitted options are left alone
    Update {
        /// Countdown id or unique id prefix
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New target date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        target: Option<NaiveDate>,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Deactivate a countdown
    Delete {
        /// Countdown id or unique id prefix
        id: String,
    },
    /// Show work-day statistics for a countdown (newest when no id is given)
    Stats {
        /// Countdown id or unique id prefix
        id: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the work schedule grid for a countdown (newest when no id is given)
    Grid {
        /// Countdown id or unique id prefix
        id: Option<String>,
        /// Print the per-day records as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    let store = Store::open(data_dir);

    let settings = startup_settings(&store)?;
    init_logging(cli.verbose, &settings);

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && store.needs_init() {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            store.dir().display()
        );
        cmd::init::run(&store)?;
    }

    let live = cli.now.is_none();
    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());
    tracing::debug!("data dir {}, now {}", store.dir().display(), now);

    match cli.command {
        None => cmd::root::run(&store, now, live),
        Some(Commands::Init) => cmd::init::run(&store),
        Some(Commands::List) => cmd::list::run(&store, now),
        Some(Commands::Create {
            name,
            target,
            schedule,
        }) => cmd::create::run(&store, &name, target, schedule, now),
        Some(Commands::Update {
            id,
            name,
            target,
            schedule,
        }) => cmd::update::run(&store, &id, name, target, schedule, now),
        Some(Commands::Delete { id }) => cmd::delete::run(&store, &id, now),
        Some(Commands::Stats { id, json }) => cmd::stats::run(&store, id.as_deref(), json, now),
        Some(Commands::Grid { id, json }) => cmd::grid::run(&store, id.as_deref(), json),
    }
}

/// Settings used to configure logging. An uninitialized data directory gets
/// the defaults that `init` is about to write, without touching the disk.
fn startup_settings(store: &Store) -> anyhow::Result<AppSettings> {
    if store.needs_init() {
        Ok(AppSettings::default())
    } else {
        AppSettings::load(store)
    }
}

/// Filter precedence: `RUST_LOG`, then `--verbose`, then `settings.log_level`.
fn log_filter(verbose: u8, settings: &AppSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity_level(verbose, settings)))
}

fn verbosity_level(verbose: u8, settings: &AppSettings) -> String {
    match verbose {
        0 => settings.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_logging(verbose: u8, settings: &AppSettings) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, settings))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level_precedence() {
        let settings = AppSettings {
            log_level: "error".to_string(),
            ..Default::default()
        };
        assert_eq!(verbosity_level(0, &settings), "error");
        assert_eq!(verbosity_level(1, &settings), "debug");
        assert_eq!(verbosity_level(3, &settings), "trace");
    }

    #[test]
    fn test_parse_create_with_schedule_flags() {
        let cli = Cli::try_parse_from([
            "countdown",
            "create",
            "Launch",
            "--target",
            "2025-12-31",
            "--work-days",
            "mon,tue,3",
            "--holiday",
            "2025-07-04",
            "--holiday",
            "2025-11-27",
            "--floating-holidays",
            "2",
            "--widgets",
            "timer,stats",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Create {
                name,
                target,
                schedule,
            }) => {
                assert_eq!(name, "Launch");
                assert_eq!(target, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
                assert_eq!(schedule.work_days, Some(vec![1, 2, 3]));
                assert_eq!(schedule.holidays.map(|h| h.len()), Some(2));
                assert_eq!(schedule.floating_holidays, Some(2));
                assert_eq!(
                    schedule.widgets,
                    Some(vec![data::WidgetKind::Timer, data::WidgetKind::Stats])
                );
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_global_now_and_stats() {
        let cli = Cli::try_parse_from([
            "countdown",
            "stats",
            "abc123",
            "--json",
            "--now",
            "2025-01-02T03:04:05",
            "--data-dir",
            "/tmp/countdown-data",
        ])
        .unwrap();
        assert!(cli.now.is_some());
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/countdown-data"));
        assert!(matches!(
            cli.command,
            Some(Commands::Stats { id: Some(ref id), json: true }) if id == "abc123"
        ));
    }

    #[test]
    fn test_data_dir_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["countdown", "list", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_startup_settings_before_init_are_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = Store::open(tmp.path().join("fresh"));
        assert_eq!(startup_settings(&store).unwrap(), AppSettings::default());
        assert!(store.needs_init(), "nothing written before init runs");
    }

    #[test]
    fn test_startup_settings_read_existing_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = Store::open(tmp.path());
        let settings = AppSettings {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        settings.save(&store).unwrap();
        assert_eq!(startup_settings(&store).unwrap().log_level, "debug");
    }

    #[test]
    fn test_update_rejects_conflicting_holiday_flags() {
        let result = Cli::try_parse_from([
            "countdown",
            "update",
            "abc",
            "--holiday",
            "2025-07-04",
            "--clear-holidays",
        ]);
        assert!(result.is_err());
    }
}
