use tauri::{AppHandle, Manager};

use crate::{
    append_shutdown_log, main_window,
    window_lifecycle::{LifecycleEffect, LifecycleEvent},
    ShellState, MAIN_WINDOW_LABEL,
};

/// Enters the quitting state, flushing window geometry on the first call.
pub(crate) fn begin_quit(app_handle: &AppHandle, reason: &str) {
    let state = app_handle.state::<ShellState>();
    if state.apply_lifecycle(LifecycleEvent::QuitRequested) != LifecycleEffect::PersistGeometry {
        return;
    }

    append_shutdown_log(&format!("quit requested: {reason}"));
    persist_window_geometry(app_handle);
}

pub(crate) fn request_quit(app_handle: &AppHandle, reason: &str) {
    begin_quit(app_handle, reason);
    app_handle.exit(0);
}

/// Quits without writing geometry back, used after the settings file was removed.
pub(crate) fn quit_without_persisting(app_handle: &AppHandle, reason: &str) {
    app_handle
        .state::<ShellState>()
        .apply_lifecycle(LifecycleEvent::QuitRequested);
    append_shutdown_log(&format!("quit requested without saving state: {reason}"));
}

fn persist_window_geometry(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        append_shutdown_log("window geometry not saved: main window not found");
        return;
    };
    let state = app_handle.state::<ShellState>();
    let Some(geometry) = main_window::geometry_to_persist(
        main_window::read_window_geometry(&window),
        state.normal_geometry(),
    ) else {
        append_shutdown_log("window geometry not saved: no normal window bounds recorded");
        return;
    };

    let result = state.with_settings(|store| store.set_window_geometry(geometry));
    match result {
        Ok(()) => append_shutdown_log(&format!(
            "window geometry saved: {}x{} at {:?},{:?}",
            geometry.width, geometry.height, geometry.x, geometry.y
        )),
        Err(error) => append_shutdown_log(&format!("failed to save window geometry: {error}")),
    }
}

/// Exit requests are always honored. One without a code comes from the OS.
pub(crate) fn handle_exit_requested(app_handle: &AppHandle, code: Option<i32>) {
    let reason = match code {
        Some(code) => format!("exit requested with code {code}"),
        None => "exit requested by the operating system".to_string(),
    };
    begin_quit(app_handle, &reason);
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    let phase = state.lifecycle_phase();
    state.apply_lifecycle(LifecycleEvent::Exited);
    append_shutdown_log(&format!("desktop process exiting from phase {phase:?}"));
}
