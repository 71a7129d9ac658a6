use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Timer,
    Progress,
    Contribution,
    Stats,
}

impl WidgetKind {
    /// Display order, and the set enabled when nothing else is configured.
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Timer,
        WidgetKind::Progress,
        WidgetKind::Contribution,
        WidgetKind::Stats,
    ];

    pub fn id(self) -> &'static str {
        match self {
            WidgetKind::Timer => "timer",
            WidgetKind::Progress => "progress",
            WidgetKind::Contribution => "contribution",
            WidgetKind::Stats => "stats",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        WidgetKind::ALL.into_iter().find(|w| w.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Timer => "Countdown Timer",
            WidgetKind::Progress => "Progress Indicator",
            WidgetKind::Contribution => "Work Schedule Grid",
            WidgetKind::Stats => "Quick Stats",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WidgetKind::Timer => "Real-time countdown showing days, hours, minutes, and seconds",
            WidgetKind::Progress => "Progress bar and percentage completion",
            WidgetKind::Contribution => "GitHub-style contribution grid showing work days",
            WidgetKind::Stats => "Summary statistics and time breakdown",
        }
    }
}

pub fn default_widgets() -> Vec<WidgetKind> {
    WidgetKind::ALL.to_vec()
}
