use crate::calc::workday::{ScheduleConfig, DEFAULT_WORK_DAYS};
use crate::data::persistence::Persistable;
use crate::data::widget::{default_widgets, WidgetKind};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A stored countdown. Schedule lists are kept as JSON-encoded strings and
/// decoded on read; see `parse_work_days`, `parse_holidays` and
/// `parse_enabled_widgets` for the fallback rules.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Countdown {
    pub id: String,
    pub user: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target_date: NaiveDate,
    #[serde(rename = "work_days", default, deserialize_with = "raw_field")]
    pub work_days_raw: String,
    #[serde(rename = "holidays", default, deserialize_with = "raw_field")]
    pub holidays_raw: String,
    #[serde(rename = "pto_dates", default = "empty_json_array", deserialize_with = "raw_field")]
    pub pto_dates_raw: String,
    /// Floating-holiday budget.
    #[serde(default)]
    pub floating_holidays: u32,
    /// PTO allowance in days. Shown in stats, not used by the day count.
    #[serde(default)]
    pub pto_days: u32,
    #[serde(rename = "enabled_widgets", default, deserialize_with = "raw_field")]
    pub enabled_widgets_raw: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn empty_json_array() -> String {
    "[]".to_string()
}

fn default_true() -> bool {
    true
}

/// Accepts any JSON value for a schedule field: strings are kept as-is,
/// null becomes empty, and anything else is stored as its JSON text. The
/// `parse_*` decoders then apply their fallbacks.
fn raw_field<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

impl Countdown {
    pub fn work_days(&self) -> Vec<u8> {
        parse_work_days(&self.work_days_raw)
    }

    pub fn holidays(&self) -> Vec<NaiveDate> {
        parse_holidays(&self.holidays_raw)
    }

    pub fn pto_dates(&self) -> Vec<NaiveDate> {
        parse_holidays(&self.pto_dates_raw)
    }

    pub fn enabled_widgets(&self) -> Vec<WidgetKind> {
        parse_enabled_widgets(&self.enabled_widgets_raw)
    }

    /// First day of the tracked range.
    pub fn start_date(&self) -> NaiveDate {
        self.created_at.date()
    }

    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig::new(self.work_days())
            .with_holidays(self.holidays())
            .with_pto_days(self.pto_dates())
            .with_floating_holiday_budget(self.floating_holidays)
    }

    /// First eight characters of the id, enough to address it from the CLI.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Decodes weekday indices. Unreadable input falls back to Monday-Friday.
pub fn parse_work_days(raw: &str) -> Vec<u8> {
    match serde_json::from_str::<Vec<u8>>(raw) {
        Ok(days) => days,
        Err(e) => {
            tracing::warn!("unreadable work days {:?} ({}), using Monday-Friday", raw, e);
            DEFAULT_WORK_DAYS.to_vec()
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; the calendar day is taken
/// as written, without timezone conversion.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Decodes a date list. Unreadable input falls back to an empty list and
/// unparseable entries are skipped.
pub fn parse_holidays(raw: &str) -> Vec<NaiveDate> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => items
            .iter()
            .filter_map(|s| {
                let date = parse_date(s);
                if date.is_none() {
                    tracing::warn!("skipping unparseable date {:?}", s);
                }
                date
            })
            .collect(),
        Err(e) => {
            tracing::warn!("unreadable date list {:?} ({}), using none", raw, e);
            Vec::new()
        }
    }
}

/// Decodes widget ids. Unreadable input falls back to every widget; unknown
/// ids are dropped.
pub fn parse_enabled_widgets(raw: &str) -> Vec<WidgetKind> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => ids
            .iter()
            .filter_map(|id| {
                let widget = WidgetKind::from_id(id);
                if widget.is_none() {
                    tracing::warn!("ignoring unknown widget {:?}", id);
                }
                widget
            })
            .collect(),
        Err(e) => {
            tracing::warn!("unreadable widget list {:?} ({}), enabling all", raw, e);
            default_widgets()
        }
    }
}

pub fn encode_work_days(days: &[u8]) -> Result<String> {
    serde_json::to_string(days).context("failed to encode work days")
}

pub fn encode_dates(dates: &[NaiveDate]) -> Result<String> {
    let strings: Vec<String> = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
    serde_json::to_string(&strings).context("failed to encode dates")
}

pub fn encode_widgets(widgets: &[WidgetKind]) -> Result<String> {
    serde_json::to_string(widgets).context("failed to encode widgets")
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCountdown {
    pub name: String,
    pub description: Option<String>,
    pub target_date: NaiveDate,
    pub work_days: Vec<u8>,
    pub holidays: Vec<NaiveDate>,
    pub pto_dates: Vec<NaiveDate>,
    pub floating_holidays: u32,
    pub pto_days: u32,
    pub enabled_widgets: Vec<WidgetKind>,
}

impl NewCountdown {
    pub fn new(name: &str, target_date: NaiveDate) -> Self {
        NewCountdown {
            name: name.to_string(),
            description: None,
            target_date,
            work_days: DEFAULT_WORK_DAYS.to_vec(),
            holidays: Vec::new(),
            pto_dates: Vec::new(),
            floating_holidays: 0,
            pto_days: 0,
            enabled_widgets: default_widgets(),
        }
    }
}

/// Partial update; `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountdownUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub work_days: Option<Vec<u8>>,
    pub holidays: Option<Vec<NaiveDate>>,
    pub pto_dates: Option<Vec<NaiveDate>>,
    pub floating_holidays: Option<u32>,
    pub pto_days: Option<u32>,
    pub enabled_widgets: Option<Vec<WidgetKind>>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct CountdownData {
    pub countdowns: Vec<Countdown>,
}

impl Persistable for CountdownData {
    fn filename() -> &'static str {
        "countdowns.json"
    }
    fn is_json() -> bool {
        true
    }
}

impl CountdownData {
    /// Active countdowns, newest first.
    pub fn active(&self) -> Vec<&Countdown> {
        let mut list: Vec<&Countdown> = self.countdowns.iter().filter(|c| c.is_active).collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    /// The newest active countdown.
    pub fn first_active(&self) -> Option<&Countdown> {
        self.active().into_iter().next()
    }

    /// Looks up an active countdown by full id or unique id prefix. The error
    /// says whether the key matched nothing or several countdowns.
    pub fn find(&self, key: &str) -> Result<&Countdown> {
        self.position(key).map(|i| &self.countdowns[i])
    }

    fn position(&self, key: &str) -> Result<usize> {
        if let Some(i) = self
            .countdowns
            .iter()
            .position(|c| c.is_active && c.id == key)
        {
            return Ok(i);
        }
        let matches: Vec<usize> = self
            .countdowns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_active && !key.is_empty() && c.id.starts_with(key))
            .map(|(i, _)| i)
            .collect();
        match matches.as_slice() {
            [i] => Ok(*i),
            [] => bail!("Countdown '{}' not found.", key),
            _ => bail!("Countdown id '{}' is ambiguous.", key),
        }
    }

    pub fn create(&mut self, user: &str, new: NewCountdown, now: NaiveDateTime) -> Result<Countdown> {
        if new.name.trim().is_empty() {
            bail!("Countdown name must not be empty.");
        }
        let countdown = Countdown {
            id: uuid::Uuid::new_v4().to_string(),
            user: user.to_string(),
            name: new.name,
            description: new.description,
            target_date: new.target_date,
            work_days_raw: encode_work_days(&new.work_days)?,
            holidays_raw: encode_dates(&new.holidays)?,
            pto_dates_raw: encode_dates(&new.pto_dates)?,
            floating_holidays: new.floating_holidays,
            pto_days: new.pto_days,
            enabled_widgets_raw: encode_widgets(&new.enabled_widgets)?,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!("created countdown {} ({})", countdown.id, countdown.name);
        self.countdowns.push(countdown.clone());
        Ok(countdown)
    }

    pub fn update(&mut self, key: &str, update: CountdownUpdate, now: NaiveDateTime) -> Result<Countdown> {
        let i = self.position(key)?;
        let c = &mut self.countdowns[i];

        // An empty name is ignored rather than clearing the field.
        if let Some(name) = update.name.filter(|n| !n.trim().is_empty()) {
            c.name = name;
        }
        if let Some(description) = update.description {
            c.description = Some(description);
        }
        if let Some(target_date) = update.target_date {
            c.target_date = target_date;
        }
        if let Some(work_days) = update.work_days {
            c.work_days_raw = encode_work_days(&work_days)?;
        }
        if let Some(holidays) = update.holidays {
            c.holidays_raw = encode_dates(&holidays)?;
        }
        if let Some(pto_dates) = update.pto_dates {
            c.pto_dates_raw = encode_dates(&pto_dates)?;
        }
        if let Some(floating_holidays) = update.floating_holidays {
            c.floating_holidays = floating_holidays;
        }
        if let Some(pto_days) = update.pto_days {
            c.pto_days = pto_days;
        }
        if let Some(widgets) = update.enabled_widgets {
            c.enabled_widgets_raw = encode_widgets(&widgets)?;
        }
        c.updated_at = now;
        tracing::debug!("updated countdown {}", c.id);
        Ok(c.clone())
    }

    /// Soft delete: the record stays on disk but is no longer listed.
    pub fn delete(&mut self, key: &str, now: NaiveDateTime) -> Result<Countdown> {
        let i = self.position(key)?;
        let c = &mut self.countdowns[i];
        c.is_active = false;
        c.updated_at = now;
        tracing::debug!("deactivated countdown {}", c.id);
        Ok(c.clone())
    }
}
