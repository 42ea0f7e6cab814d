use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use figment::{
    Figment,
    providers::{Format, Json, Serialized},
};
use gpui::*;
use gpui_component::{Theme, ThemeMode, ThemeRegistry};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::{ResultExt, Snafu};

pub const SETTINGS_DIRECTORY_NAME: &str = "murmur";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const DEFAULT_TEAM_NAME: &str = "acme";
const DEFAULT_SIDEBAR_WIDTH: f32 = 260.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarSettings {
    #[serde(
        default = "default_theme_mode",
        serialize_with = "serialize_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub theme_name: String,
    #[serde(default = "default_team_name")]
    pub team_name: String,
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: f32,
    /// Category names whose member order is computed rather than arranged by
    /// hand; rows in these categories suppress floating drop visuals.
    #[serde(default)]
    pub auto_sorted_categories: Vec<String>,
    /// Disables channel drops entirely, e.g. while the workspace is read-only.
    #[serde(default)]
    pub drop_disabled: bool,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            theme_name: String::new(),
            team_name: default_team_name(),
            sidebar_width: default_sidebar_width(),
            auto_sorted_categories: Vec::new(),
            drop_disabled: false,
        }
    }
}

impl SidebarSettings {
    pub fn normalized(mut self) -> Self {
        self.theme_name = self.theme_name.trim().to_string();

        self.team_name = self.team_name.trim().to_string();
        if self.team_name.is_empty() {
            self.team_name = default_team_name();
        }

        if !self.sidebar_width.is_finite() || self.sidebar_width <= 0.0 {
            self.sidebar_width = default_sidebar_width();
        }

        // Keep the category list free of blanks and duplicates.
        let mut seen = Vec::new();
        self.auto_sorted_categories.retain(|name| {
            let trimmed = name.trim();
            if trimmed.is_empty() || seen.iter().any(|kept: &String| kept == trimmed) {
                false
            } else {
                seen.push(trimmed.to_string());
                true
            }
        });
        self.auto_sorted_categories = seen;

        self
    }

    pub fn apply_theme(&self, window: Option<&mut Window>, cx: &mut App) {
        if let Some(theme_config) = ThemeRegistry::global(cx)
            .themes()
            .get(&SharedString::from(self.theme_name.trim().to_string()))
            .cloned()
        {
            let mode = theme_config.mode;
            let theme = Theme::global_mut(cx);
            if mode.is_dark() {
                theme.dark_theme = theme_config;
            } else {
                theme.light_theme = theme_config;
            }
            Theme::change(mode, window, cx);
            return;
        }

        Theme::change(self.theme_mode, window, cx);
    }
}

pub struct SettingsStore {
    settings: Arc<ArcSwap<SidebarSettings>>,
    config_path: PathBuf,
}

impl SettingsStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".murmur"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    pub fn new(config_path: PathBuf) -> Self {
        let settings = Self::load_from_disk(&config_path);
        Self {
            settings: Arc::new(ArcSwap::from_pointee(settings)),
            config_path,
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn settings(&self) -> Arc<SidebarSettings> {
        self.settings.load_full()
    }

    pub fn update(&self, settings: SidebarSettings) -> Result<(), SettingsError> {
        let normalized_settings = settings.normalized();
        self.persist(&normalized_settings)?;
        self.settings.store(Arc::new(normalized_settings));
        Ok(())
    }

    fn load_from_disk(path: &PathBuf) -> SidebarSettings {
        if !path.exists() {
            tracing::info!("settings file not found at {:?}, using defaults", path);
            return SidebarSettings::default();
        }

        let figment =
            Figment::from(Serialized::defaults(SidebarSettings::default())).merge(Json::file(path));

        match figment.extract::<SidebarSettings>() {
            Ok(settings) => settings.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to parse settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                SidebarSettings::default()
            }
        }
    }

    fn persist(&self, settings: &SidebarSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context(CreateDirSnafu {
                stage: "create-settings-directory",
                path: parent.to_path_buf(),
            })?;
        }

        let content = serde_json::to_string_pretty(settings).context(SerializeConfigSnafu {
            stage: "serialize-settings-json",
        })?;

        let temp_path = self.config_path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).context(WriteFileSnafu {
            stage: "write-temporary-settings-file",
            path: temp_path.clone(),
        })?;

        std::fs::rename(&temp_path, &self.config_path).context(RenameTempFileSnafu {
            stage: "rename-temporary-settings-file",
            from: temp_path,
            to: self.config_path.clone(),
        })?;

        tracing::info!("saved settings to {:?}", self.config_path);
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to create settings directory at {path:?} on `{stage}`: {source}"))]
    CreateDir {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to serialize settings on `{stage}`: {source}"))]
    SerializeConfig {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("failed to write settings file at {path:?} on `{stage}`: {source}"))]
    WriteFile {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "failed to replace settings file from {from:?} to {to:?} on `{stage}`: {source}"
    ))]
    RenameTempFile {
        stage: &'static str,
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

fn default_team_name() -> String {
    DEFAULT_TEAM_NAME.to_string()
}

fn default_sidebar_width() -> f32 {
    DEFAULT_SIDEBAR_WIDTH
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

fn serialize_theme_mode<S>(value: &ThemeMode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.name())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(parse_theme_mode(&value))
}

fn parse_theme_mode(value: &str) -> ThemeMode {
    if value.trim().eq_ignore_ascii_case("dark") {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    }
}

#[cfg(test)]
mod tests {
    use core::prelude::v1::test;
    use super::*;

    fn temp_settings_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "murmur-settings-test-{tag}-{}.json",
            std::process::id()
        ))
    }

    #[test]
    fn normalization_repairs_blank_and_duplicate_inputs() {
        let settings = SidebarSettings {
            team_name: "  ".to_string(),
            sidebar_width: f32::NAN,
            auto_sorted_categories: vec![
                " Channels ".to_string(),
                String::new(),
                "Channels".to_string(),
                "Direct Messages".to_string(),
            ],
            ..SidebarSettings::default()
        }
        .normalized();

        assert_eq!(settings.team_name, DEFAULT_TEAM_NAME);
        assert_eq!(settings.sidebar_width, DEFAULT_SIDEBAR_WIDTH);
        assert_eq!(
            settings.auto_sorted_categories,
            vec!["Channels".to_string(), "Direct Messages".to_string()]
        );
    }

    #[test]
    fn missing_settings_file_falls_back_to_defaults() {
        let store = SettingsStore::new(temp_settings_path("missing"));
        assert_eq!(*store.settings(), SidebarSettings::default());
    }

    #[test]
    fn update_round_trips_through_disk() {
        let path = temp_settings_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let store = SettingsStore::new(path.clone());
        let mut settings = SidebarSettings::default();
        settings.team_name = "woodpecker".to_string();
        settings.drop_disabled = true;
        store.update(settings).expect("settings should persist");

        let reloaded = SettingsStore::new(path.clone());
        assert_eq!(reloaded.settings().team_name, "woodpecker");
        assert!(reloaded.settings().drop_disabled);

        let _ = std::fs::remove_file(&path);
    }
}
