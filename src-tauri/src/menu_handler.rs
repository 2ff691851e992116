use tauri::{AppHandle, Manager};

use crate::{
    app_menu, appearance, append_desktop_log, debug_tools, exit_events, login_item,
    menu_actions::{self, MenuAction},
    page_actions,
    settings::FlagSetting,
    ShellState,
};

fn toggle_setting(app_handle: &AppHandle, setting: FlagSetting) {
    let result = app_handle
        .state::<ShellState>()
        .with_settings(|store| store.toggle_flag(setting));
    match result {
        Ok(enabled) => append_desktop_log(&format!(
            "menu toggled {}: {}",
            setting.key(),
            if enabled { "enabled" } else { "disabled" }
        )),
        Err(error) => {
            append_desktop_log(&format!("failed to toggle {}: {error}", setting.key()));
        }
    }
}

fn affects_appearance(setting: FlagSetting) -> bool {
    matches!(
        setting,
        FlagSetting::DarkMode | FlagSetting::FollowSystemAppearance
    )
}

fn flag_for_action(action: MenuAction) -> Option<FlagSetting> {
    match action {
        MenuAction::ToggleLaunchMinimized => Some(FlagSetting::LaunchMinimized),
        MenuAction::ToggleQuitOnWindowClose => Some(FlagSetting::QuitOnWindowClose),
        MenuAction::ToggleFollowSystemAppearance => Some(FlagSetting::FollowSystemAppearance),
        MenuAction::ToggleDarkMode => Some(FlagSetting::DarkMode),
        _ => None,
    }
}

pub fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    let Some(action) = menu_actions::action_from_menu_id(menu_id) else {
        return;
    };

    if let Some(setting) = flag_for_action(action) {
        toggle_setting(app_handle, setting);
        if affects_appearance(setting) {
            appearance::sync_dark_mode(app_handle, append_desktop_log);
        }
        app_menu::refresh_app_menu(app_handle, append_desktop_log);
        return;
    }

    match action {
        MenuAction::Page(page_action) => {
            page_actions::send_action(app_handle, page_action, append_desktop_log)
        }
        MenuAction::ToggleLaunchAtLogin => {
            match login_item::toggle_launch_at_login(app_handle) {
                Ok(enabled) => append_desktop_log(&format!(
                    "menu toggled launch at login: {}",
                    if enabled { "enabled" } else { "disabled" }
                )),
                Err(error) => append_desktop_log(&error),
            }
            app_menu::refresh_app_menu(app_handle, append_desktop_log);
        }
        MenuAction::ShowSettingsFile => debug_tools::show_settings_file(app_handle),
        MenuAction::ShowAppData => debug_tools::show_app_data(app_handle),
        MenuAction::DeleteSettings => debug_tools::delete_settings_and_relaunch(app_handle),
        MenuAction::DeleteAppData => debug_tools::delete_app_data_and_relaunch(app_handle),
        MenuAction::ToggleDevtools => debug_tools::toggle_devtools(app_handle),
        MenuAction::Reload => debug_tools::reload(app_handle),
        MenuAction::Quit => exit_events::request_quit(app_handle, "menu quit"),
        MenuAction::ToggleLaunchMinimized
        | MenuAction::ToggleQuitOnWindowClose
        | MenuAction::ToggleFollowSystemAppearance
        | MenuAction::ToggleDarkMode => {}
    }
}
