use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::append_desktop_log;

/// Last known window bounds in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WindowGeometry {
    pub(crate) height: u32,
    pub(crate) width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) y: Option<i32>,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            height: 600,
            width: 800,
            x: None,
            y: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Settings {
    pub(crate) dark_mode: bool,
    pub(crate) follow_system_appearance: bool,
    pub(crate) last_window_state: WindowGeometry,
    pub(crate) launch_minimized: bool,
    pub(crate) quit_on_window_close: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            follow_system_appearance: true,
            last_window_state: WindowGeometry::default(),
            launch_minimized: false,
            quit_on_window_close: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlagSetting {
    DarkMode,
    FollowSystemAppearance,
    LaunchMinimized,
    QuitOnWindowClose,
}

impl FlagSetting {
    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::DarkMode => "darkMode",
            Self::FollowSystemAppearance => "followSystemAppearance",
            Self::LaunchMinimized => "launchMinimized",
            Self::QuitOnWindowClose => "quitOnWindowClose",
        }
    }
}

impl Settings {
    pub(crate) fn flag(&self, setting: FlagSetting) -> bool {
        match setting {
            FlagSetting::DarkMode => self.dark_mode,
            FlagSetting::FollowSystemAppearance => self.follow_system_appearance,
            FlagSetting::LaunchMinimized => self.launch_minimized,
            FlagSetting::QuitOnWindowClose => self.quit_on_window_close,
        }
    }

    fn flag_mut(&mut self, setting: FlagSetting) -> &mut bool {
        match setting {
            FlagSetting::DarkMode => &mut self.dark_mode,
            FlagSetting::FollowSystemAppearance => &mut self.follow_system_appearance,
            FlagSetting::LaunchMinimized => &mut self.launch_minimized,
            FlagSetting::QuitOnWindowClose => &mut self.quit_on_window_close,
        }
    }
}

/// Durable settings backed by a JSON file. The in-memory copy is only replaced
/// after the file write succeeds.
#[derive(Debug)]
pub(crate) struct SettingsStore {
    path: Option<PathBuf>,
    settings: Settings,
}

impl SettingsStore {
    pub(crate) fn load(path: Option<PathBuf>) -> Self {
        let settings = match path.as_deref() {
            Some(settings_path) => match read_settings(settings_path) {
                Ok(Some(settings)) => settings,
                Ok(None) => Settings::default(),
                Err(error) => {
                    append_desktop_log(&format!("{error}. falling back to default settings"));
                    Settings::default()
                }
            },
            None => {
                append_desktop_log("settings path is unavailable; settings will not persist");
                Settings::default()
            }
        };

        Self { path, settings }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn set_flag(&mut self, setting: FlagSetting, value: bool) -> Result<(), String> {
        let mut next = self.settings.clone();
        *next.flag_mut(setting) = value;
        self.commit(next)
    }

    pub(crate) fn toggle_flag(&mut self, setting: FlagSetting) -> Result<bool, String> {
        let value = !self.settings.flag(setting);
        self.set_flag(setting, value)?;
        Ok(value)
    }

    pub(crate) fn set_window_geometry(&mut self, geometry: WindowGeometry) -> Result<(), String> {
        let mut next = self.settings.clone();
        next.last_window_state = geometry;
        self.commit(next)
    }

    pub(crate) fn clear(&mut self) -> Result<(), String> {
        if let Some(path) = self.path.as_deref() {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
                Err(error) => {
                    return Err(format!(
                        "Failed to delete settings file {}: {}",
                        path.display(),
                        error
                    ));
                }
            }
        }

        self.settings = Settings::default();
        Ok(())
    }

    fn commit(&mut self, next: Settings) -> Result<(), String> {
        if let Some(path) = self.path.as_deref() {
            write_settings(path, &next)?;
        }
        self.settings = next;
        Ok(())
    }
}

pub(crate) fn read_settings(path: &Path) -> Result<Option<Settings>, String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(format!(
                "Failed to read settings {}: {}",
                path.display(),
                error
            ));
        }
    };

    serde_json::from_str::<Settings>(&raw)
        .map(Some)
        .map_err(|error| format!("Failed to parse settings {}: {}", path.display(), error))
}

fn write_settings(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create settings directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    let serialized = serde_json::to_string_pretty(settings)
        .map_err(|error| format!("Failed to serialize settings: {error}"))?;
    fs::write(path, serialized)
        .map_err(|error| format!("Failed to write settings {}: {}", path.display(), error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> SettingsStore {
        SettingsStore::load(Some(dir.join("settings.json")))
    }

    #[test]
    fn defaults_match_first_launch_preferences() {
        let settings = Settings::default();
        assert!(!settings.dark_mode);
        assert!(settings.follow_system_appearance);
        assert!(!settings.launch_minimized);
        assert!(!settings.quit_on_window_close);
        assert_eq!(
            settings.last_window_state,
            WindowGeometry {
                height: 600,
                width: 800,
                x: None,
                y: None
            }
        );
    }

    #[test]
    fn load_without_file_yields_defaults() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let store = store_in(temp.path());
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn load_fills_missing_keys_with_defaults() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(
            temp.path().join("settings.json"),
            r#"{"darkMode": true, "lastWindowState": {"height": 700, "width": 1200}}"#,
        )
        .expect("seed settings");

        let store = store_in(temp.path());
        assert!(store.settings().dark_mode);
        assert!(store.settings().follow_system_appearance);
        assert_eq!(store.settings().last_window_state.width, 1200);
        assert_eq!(store.settings().last_window_state.x, None);
    }

    #[test]
    fn load_recovers_from_corrupt_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join("settings.json"), "{not json").expect("seed settings");

        let store = store_in(temp.path());
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn toggle_flag_persists_camel_case_key() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut store = store_in(temp.path());

        assert!(store
            .toggle_flag(FlagSetting::QuitOnWindowClose)
            .expect("toggle setting"));

        let raw = fs::read_to_string(temp.path().join("settings.json")).expect("read settings");
        let parsed: serde_json::Value = serde_json::from_str(&raw).expect("parse settings");
        assert_eq!(parsed[FlagSetting::QuitOnWindowClose.key()], true);
        assert!(store_in(temp.path()).settings().quit_on_window_close);
    }

    #[test]
    fn window_geometry_round_trips_across_loads() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let geometry = WindowGeometry {
            height: 820,
            width: 1320,
            x: Some(-40),
            y: Some(25),
        };

        store_in(temp.path())
            .set_window_geometry(geometry)
            .expect("persist geometry");

        assert_eq!(
            store_in(temp.path()).settings().last_window_state,
            geometry
        );
    }

    #[test]
    fn failed_write_leaves_in_memory_settings_untouched() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file in the way").expect("seed blocker");
        let mut store = SettingsStore::load(Some(blocker.join("settings.json")));

        assert!(store.set_flag(FlagSetting::DarkMode, true).is_err());
        assert!(!store.settings().dark_mode);
    }

    #[test]
    fn clear_removes_file_and_resets_defaults() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let mut store = store_in(temp.path());
        store
            .set_flag(FlagSetting::LaunchMinimized, true)
            .expect("persist setting");

        store.clear().expect("clear settings");
        assert_eq!(store.settings(), &Settings::default());
        assert!(!temp.path().join("settings.json").exists());
        store.clear().expect("clearing twice is fine");
    }

    #[test]
    fn store_without_path_keeps_changes_in_memory() {
        let mut store = SettingsStore::load(None);
        store
            .set_flag(FlagSetting::DarkMode, true)
            .expect("in-memory update");
        assert!(store.settings().dark_mode);
        assert!(store.path().is_none());
    }
}
