use crate::page_actions::PageAction;

pub const MENU_NEW_MESSAGE: &str = "menu_new_message";
pub const MENU_PORTAL_PREFERENCES: &str = "menu_portal_preferences";
pub const MENU_SUBSCRIPTION: &str = "menu_subscription";
pub const MENU_LOG_OUT: &str = "menu_log_out";
pub const MENU_LAUNCH_AT_LOGIN: &str = "menu_launch_at_login";
pub const MENU_LAUNCH_MINIMIZED: &str = "menu_launch_minimized";
pub const MENU_QUIT_ON_WINDOW_CLOSE: &str = "menu_quit_on_window_close";
pub const MENU_FOLLOW_SYSTEM_APPEARANCE: &str = "menu_follow_system_appearance";
pub const MENU_DARK_MODE: &str = "menu_dark_mode";
pub const MENU_SHOW_SETTINGS_FILE: &str = "menu_debug_show_settings";
pub const MENU_SHOW_APP_DATA: &str = "menu_debug_show_app_data";
pub const MENU_DELETE_SETTINGS: &str = "menu_debug_delete_settings";
pub const MENU_DELETE_APP_DATA: &str = "menu_debug_delete_app_data";
pub const MENU_TOGGLE_DEVTOOLS: &str = "menu_debug_toggle_devtools";
pub const MENU_RELOAD: &str = "menu_debug_reload";
pub const MENU_QUIT: &str = "menu_quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Page(PageAction),
    ToggleLaunchAtLogin,
    ToggleLaunchMinimized,
    ToggleQuitOnWindowClose,
    ToggleFollowSystemAppearance,
    ToggleDarkMode,
    ShowSettingsFile,
    ShowAppData,
    DeleteSettings,
    DeleteAppData,
    ToggleDevtools,
    Reload,
    Quit,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<MenuAction> {
    match menu_id {
        MENU_NEW_MESSAGE => Some(MenuAction::Page(PageAction::NewMessage)),
        MENU_PORTAL_PREFERENCES => Some(MenuAction::Page(PageAction::ShowPreferences)),
        MENU_SUBSCRIPTION => Some(MenuAction::Page(PageAction::ShowSubscription)),
        MENU_LOG_OUT => Some(MenuAction::Page(PageAction::LogOut)),
        MENU_LAUNCH_AT_LOGIN => Some(MenuAction::ToggleLaunchAtLogin),
        MENU_LAUNCH_MINIMIZED => Some(MenuAction::ToggleLaunchMinimized),
        MENU_QUIT_ON_WINDOW_CLOSE => Some(MenuAction::ToggleQuitOnWindowClose),
        MENU_FOLLOW_SYSTEM_APPEARANCE => Some(MenuAction::ToggleFollowSystemAppearance),
        MENU_DARK_MODE => Some(MenuAction::ToggleDarkMode),
        MENU_SHOW_SETTINGS_FILE => Some(MenuAction::ShowSettingsFile),
        MENU_SHOW_APP_DATA => Some(MenuAction::ShowAppData),
        MENU_DELETE_SETTINGS => Some(MenuAction::DeleteSettings),
        MENU_DELETE_APP_DATA => Some(MenuAction::DeleteAppData),
        MENU_TOGGLE_DEVTOOLS => Some(MenuAction::ToggleDevtools),
        MENU_RELOAD => Some(MenuAction::Reload),
        MENU_QUIT => Some(MenuAction::Quit),
        _ => None,
    }
}
