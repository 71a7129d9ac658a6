use crate::data::persistence::{Persistable, Store};
use crate::data::widget::{default_widgets, WidgetKind};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Owner recorded on new countdowns.
    pub user: String,
    /// Widgets enabled on new countdowns when none are given.
    pub default_widgets: Vec<WidgetKind>,
    /// `tracing` filter used when neither `RUST_LOG` nor `--verbose` is set.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            user: "local".to_string(),
            default_widgets: default_widgets(),
            log_level: "warn".to_string(),
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml, so other top-level
/// keys in the file are ignored.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl AppSettings {
    pub fn load(store: &Store) -> Result<Self> {
        Ok(store.load::<SettingsWrapper>()?.settings)
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        store.save(&wrapper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();
        assert_eq!(settings.user, "local");
        assert_eq!(settings.default_widgets.len(), 4);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_settings_wrapper_yaml_roundtrip() {
        let wrapper = SettingsWrapper {
            settings: AppSettings {
                user: "dana".to_string(),
                default_widgets: vec![WidgetKind::Stats],
                log_level: "debug".to_string(),
            },
        };
        let yaml = serde_norway::to_string(&wrapper).unwrap();
        let parsed: SettingsWrapper = serde_norway::from_str(&yaml).unwrap();
        assert_eq!(parsed.settings, wrapper.settings);
    }

    #[test]
    fn test_settings_wrapper_missing_key_uses_default() {
        let yaml = "other: []";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings, AppSettings::default());
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let yaml = "settings:\n  user: sam\n";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.user, "sam");
        assert_eq!(wrapper.settings.default_widgets, default_widgets());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let settings = AppSettings::load(&Store::open(tmp.path())).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(tmp.path());
        let settings = AppSettings {
            user: "kim".to_string(),
            ..Default::default()
        };
        settings.save(&store).unwrap();
        assert!(tmp.path().join("config.yaml").exists());
        assert_eq!(AppSettings::load(&store).unwrap(), settings);
    }
}
