use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};
use tauri_plugin_autostart::MacosLauncher;

use crate::{
    app_menu, appearance, append_desktop_log, append_startup_log, exit_events, logging,
    login_item, main_window, menu_handler, settings::SettingsStore, shell_config::ShellConfig,
    startup_task, window_actions,
    window_lifecycle::{LifecycleEffect, LifecycleEvent},
    ShellState, HIDDEN_LAUNCH_ARG, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    let config = ShellConfig::from_env();
    let opened_as_hidden = login_item::launched_as_hidden(std::env::args());

    let log_path = logging::init_desktop_log_path(config.root_dir.clone());

    append_startup_log("desktop process starting");
    append_startup_log(&format!("desktop log path: {}", log_path.display()));
    if opened_as_hidden {
        append_startup_log("launched by login item, window starts hidden");
    }

    let settings = SettingsStore::load(crate::runtime_paths::settings_path(
        config.root_dir.as_deref(),
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, _argv, _cwd| {
            append_desktop_log("second instance launched, focusing main window");
            window_actions::show_main_window(app_handle, append_desktop_log);
        }))
        .plugin(tauri_plugin_autostart::init(
            MacosLauncher::LaunchAgent,
            Some(vec![HIDDEN_LAUNCH_ARG]),
        ))
        .manage(ShellState::new(config, settings, opened_as_hidden))
        .on_menu_event(|app_handle, event| {
            menu_handler::handle_menu_event(app_handle, event.id().as_ref())
        })
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            match event {
                WindowEvent::CloseRequested { api, .. } => {
                    let app_handle = window.app_handle();
                    let state = app_handle.state::<ShellState>();
                    let quit_on_close = state.settings_snapshot().quit_on_window_close;
                    match state.apply_lifecycle(LifecycleEvent::CloseRequested { quit_on_close }) {
                        LifecycleEffect::PreventCloseAndHide => {
                            api.prevent_close();
                            if let Err(error) = window.hide() {
                                append_desktop_log(&format!(
                                    "failed to hide main window on close: {error}"
                                ));
                            }
                        }
                        LifecycleEffect::Quit => {
                            api.prevent_close();
                            exit_events::request_quit(app_handle, "main window closed");
                        }
                        _ => {}
                    }
                }
                WindowEvent::Resized(_) | WindowEvent::Moved(_) => {
                    main_window::remember_normal_geometry(window.app_handle());
                }
                WindowEvent::ThemeChanged(theme) => {
                    append_desktop_log(&format!("system theme changed: {theme:?}"));
                    appearance::sync_dark_mode(window.app_handle(), append_desktop_log);
                }
                _ => {}
            }
        })
        .on_page_load(|webview, payload| {
            if webview.label() != MAIN_WINDOW_LABEL {
                return;
            }

            match payload.event() {
                PageLoadEvent::Started => {
                    append_desktop_log(&format!("page-load started: {}", payload.url()));
                }
                PageLoadEvent::Finished => {
                    append_desktop_log(&format!("page-load finished: {}", payload.url()));
                    main_window::handle_page_finished(webview.app_handle(), payload.url());
                }
            }
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            if let Err(error) = app_menu::install_app_menu(&app_handle) {
                append_startup_log(&format!("failed to initialize menu: {error}"));
            }

            startup_task::spawn_startup_task(app_handle, append_startup_log);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, .. } => {
                exit_events::handle_exit_requested(app_handle, code);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen {
                has_visible_windows,
                ..
            } => {
                if !has_visible_windows {
                    window_actions::show_main_window(app_handle, append_desktop_log);
                }
            }
            _ => {}
        });
}
