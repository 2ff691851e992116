use tauri::{AppHandle, Manager, Theme, WebviewWindow};

use crate::{
    page_actions::{self, PageAction},
    settings::Settings,
    ShellState, MAIN_WINDOW_LABEL,
};

/// Only macOS exposes a system appearance the shell follows.
pub(crate) fn platform_follows_system_appearance() -> bool {
    cfg!(target_os = "macos")
}

pub(crate) fn effective_dark_mode(
    platform_follows_system: bool,
    settings: &Settings,
    os_prefers_dark: bool,
) -> bool {
    if platform_follows_system && settings.follow_system_appearance {
        os_prefers_dark
    } else {
        settings.dark_mode
    }
}

/// Theme pinned on the native window. `None` lets the window track the OS appearance.
pub(crate) fn window_theme_hint(
    platform_follows_system: bool,
    settings: &Settings,
) -> Option<Theme> {
    if platform_follows_system && settings.follow_system_appearance {
        None
    } else if settings.dark_mode {
        Some(Theme::Dark)
    } else {
        Some(Theme::Light)
    }
}

fn os_prefers_dark(window: &WebviewWindow) -> bool {
    matches!(window.theme(), Ok(Theme::Dark))
}

/// Recomputes the effective dark-mode flag and pushes it into the page.
pub(crate) fn sync_dark_mode<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    let settings = app_handle.state::<ShellState>().settings_snapshot();
    let platform_follows_system = platform_follows_system_appearance();
    if let Err(error) = window.set_theme(window_theme_hint(platform_follows_system, &settings)) {
        log(&format!("failed to update window theme: {error}"));
    }

    let dark_mode = effective_dark_mode(
        platform_follows_system,
        &settings,
        os_prefers_dark(&window),
    );
    page_actions::dispatch_to_window(&window, PageAction::SetDarkMode(dark_mode), log);
}
