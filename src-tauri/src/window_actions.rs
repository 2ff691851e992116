use tauri::{AppHandle, Manager, WebviewWindow};

use crate::{
    window_lifecycle::{LifecycleEffect, LifecycleEvent},
    ShellState, MAIN_WINDOW_LABEL,
};

fn main_window<F>(app_handle: &AppHandle, action: &str, log: F) -> Option<WebviewWindow>
where
    F: Fn(&str),
{
    let window = app_handle.get_webview_window(MAIN_WINDOW_LABEL);
    if window.is_none() {
        log(&format!("{action} skipped: main window not found"));
    }
    window
}

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "show_main_window", &log) else {
        return;
    };
    let effect = app_handle
        .state::<ShellState>()
        .apply_lifecycle(LifecycleEvent::Show);
    apply_window_effect(&window, effect, log);
}

/// Carries out the visibility part of a lifecycle effect; other effects are ignored here.
pub fn apply_window_effect<F>(window: &WebviewWindow, effect: LifecycleEffect, log: F)
where
    F: Fn(&str),
{
    match effect {
        LifecycleEffect::ShowWindow => {
            if let Ok(true) = window.is_minimized() {
                if let Err(error) = window.unminimize() {
                    log(&format!("failed to restore minimized main window: {error}"));
                }
            }
            if let Err(error) = window.show() {
                log(&format!("failed to show main window: {error}"));
            }
            if let Err(error) = window.set_focus() {
                log(&format!("failed to focus main window: {error}"));
            }
        }
        LifecycleEffect::HideWindow | LifecycleEffect::PreventCloseAndHide => {
            if let Err(error) = window.hide() {
                log(&format!("failed to hide main window: {error}"));
            }
        }
        _ => {}
    }
}

pub fn reload_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "reload_main_window", &log) else {
        return;
    };
    if let Err(error) = window.reload() {
        log(&format!("failed to reload main window: {error}"));
    }
}
