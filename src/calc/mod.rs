pub mod contribution;
pub mod duration;
pub mod summary;
pub mod workday;

pub use contribution::{generate_contribution_data, week_columns, ContributionLevel, ContributionRecord};
pub use duration::{format_time_remaining, TimeLeft};
pub use summary::{calculate_work_days, ProgressBand, WorkDaySummary};
pub use workday::ScheduleConfig;
