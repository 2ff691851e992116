use std::{fs, io::ErrorKind, path::Path};

use tauri::{AppHandle, Manager};

use crate::{append_desktop_log, exit_events, external_url, window_actions, ShellState};

pub(crate) fn show_settings_file(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    let path = state.with_settings(|store| {
        store
            .path()
            .map(Path::to_path_buf)
            .ok_or_else(|| "settings path is unavailable".to_string())
    });

    match path.and_then(|path| external_url::open_path(&path)) {
        Ok(()) => {}
        Err(error) => append_desktop_log(&format!("failed to show settings file: {error}")),
    }
}

pub(crate) fn show_app_data(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    let Some(root_dir) = state.config.root_dir.as_deref() else {
        append_desktop_log("app data directory is unavailable");
        return;
    };

    if let Err(error) = external_url::open_path(root_dir) {
        append_desktop_log(&format!("failed to show app data: {error}"));
    }
}

/// Clears all settings and relaunches. The window geometry is written back on the way out.
pub(crate) fn delete_settings_and_relaunch(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    if let Err(error) = state.with_settings(|store| store.clear()) {
        append_desktop_log(&format!("failed to delete settings: {error}"));
        return;
    }

    append_desktop_log("settings deleted, relaunching");
    app_handle.request_restart();
}

pub(crate) fn remove_dir_if_present(path: &Path) -> Result<(), String> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
        Err(error) => Err(format!(
            "Failed to delete app data {}: {}",
            path.display(),
            error
        )),
    }
}

/// Removes the whole data directory and relaunches without saving any state.
pub(crate) fn delete_app_data_and_relaunch(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    let Some(root_dir) = state.config.root_dir.clone() else {
        append_desktop_log("app data directory is unavailable");
        return;
    };

    exit_events::quit_without_persisting(app_handle, "app data deleted");
    if let Err(error) = remove_dir_if_present(&root_dir) {
        append_desktop_log(&error);
    }
    app_handle.request_restart();
}

#[cfg(debug_assertions)]
pub(crate) fn toggle_devtools(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(crate::MAIN_WINDOW_LABEL) else {
        append_desktop_log("toggle devtools skipped: main window not found");
        return;
    };

    if window.is_devtools_open() {
        window.close_devtools();
    } else {
        window.open_devtools();
    }
}

#[cfg(not(debug_assertions))]
pub(crate) fn toggle_devtools(_app_handle: &AppHandle) {
    append_desktop_log("developer tools are only available in debug builds");
}

pub(crate) fn reload(app_handle: &AppHandle) {
    window_actions::reload_main_window(app_handle, append_desktop_log);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_dir_if_present_deletes_nested_content() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path().join(".dybli");
        fs::create_dir_all(root.join("logs")).expect("create logs dir");
        fs::write(root.join("settings.json"), "{}").expect("seed settings");

        remove_dir_if_present(&root).expect("remove app data");
        assert!(!root.exists());
    }

    #[test]
    fn remove_dir_if_present_accepts_missing_dir() {
        let temp = tempfile::tempdir().expect("create temp dir");
        assert!(remove_dir_if_present(&temp.path().join("missing")).is_ok());
    }
}
