pub mod app_settings;
pub mod countdown;
pub mod persistence;
pub mod widget;

pub use app_settings::AppSettings;
pub use countdown::{Countdown, CountdownData, NewCountdown};
pub use persistence::Store;
pub use widget::WidgetKind;
