use std::time::Duration;

use tauri::{AppHandle, Manager};

use crate::{
    connectivity, main_window, ui_dispatch, window_lifecycle::LifecycleEvent, ShellState,
    CONNECTIVITY_POLL_INTERVAL_MS, CONNECTIVITY_PROBE_TIMEOUT_MS,
};

/// Waits for the network off the main thread, then creates the main window on it.
pub(crate) fn spawn_startup_task<F>(app_handle: AppHandle, log: F)
where
    F: Fn(&str) + Copy + Send + 'static,
{
    tauri::async_runtime::spawn_blocking(move || {
        let (skip_online_check, probe) = {
            let state = app_handle.state::<ShellState>();
            (
                state.config.skip_online_check,
                state.config.connectivity_probe.clone(),
            )
        };

        if skip_online_check {
            log("connectivity check skipped by configuration");
        } else {
            log(&format!("waiting for connectivity to {probe}"));
            let attempts = connectivity::wait_until_online(
                || {
                    connectivity::probe_target(
                        &probe,
                        Duration::from_millis(CONNECTIVITY_PROBE_TIMEOUT_MS),
                    )
                },
                Duration::from_millis(CONNECTIVITY_POLL_INTERVAL_MS),
                log,
            );
            log(&format!("network reachable after {attempts} attempt(s)"));
        }

        let dispatch = ui_dispatch::run_on_main_thread_dispatch(
            &app_handle,
            "create main window",
            move |main_app| open_main_window(main_app, log),
        );
        if let Err(error) = dispatch {
            log(&error);
            app_handle.exit(1);
        }
    });
}

fn open_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    if state.is_quitting() {
        log("main window creation skipped: shell is quitting");
        return;
    }

    state.apply_lifecycle(LifecycleEvent::LoadStarted);
    if let Err(error) = main_window::create_main_window(app_handle) {
        log(&format!("startup failed: {error}"));
        app_handle.exit(1);
    }
}
