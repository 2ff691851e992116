use serde_json::Value;
use tauri::{AppHandle, Manager, WebviewWindow};

use crate::{window_actions, MAIN_WINDOW_LABEL};

pub const PAGE_ACTION_SHOW_PREFERENCES: &str = "show-preferences";
pub const PAGE_ACTION_SHOW_SUBSCRIPTION: &str = "show-subscription";
pub const PAGE_ACTION_NEW_MESSAGE: &str = "new-message";
pub const PAGE_ACTION_LOG_OUT: &str = "log-out";
pub const PAGE_ACTION_SET_DARK_MODE: &str = "set-dark-mode";

/// Named messages the shell posts into the portal page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    ShowPreferences,
    ShowSubscription,
    NewMessage,
    LogOut,
    SetDarkMode(bool),
}

impl PageAction {
    pub fn name(self) -> &'static str {
        match self {
            Self::ShowPreferences => PAGE_ACTION_SHOW_PREFERENCES,
            Self::ShowSubscription => PAGE_ACTION_SHOW_SUBSCRIPTION,
            Self::NewMessage => PAGE_ACTION_NEW_MESSAGE,
            Self::LogOut => PAGE_ACTION_LOG_OUT,
            Self::SetDarkMode(_) => PAGE_ACTION_SET_DARK_MODE,
        }
    }

    fn payload(self) -> Value {
        match self {
            Self::SetDarkMode(enabled) => Value::Bool(enabled),
            _ => Value::Null,
        }
    }
}

pub fn dispatch_script(action: PageAction) -> String {
    format!(
        "window.__DYBLI__ && window.__DYBLI__.dispatch({}, {});",
        Value::String(action.name().to_string()),
        action.payload()
    )
}

pub fn dispatch_to_window<F>(window: &WebviewWindow, action: PageAction, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = window.eval(&dispatch_script(action)) {
        log(&format!(
            "failed to dispatch page action {}: {error}",
            action.name()
        ));
    }
}

/// Brings the window forward and posts `action` to the page, the way a menu click does.
pub fn send_action<F>(app_handle: &AppHandle, action: PageAction, log: F)
where
    F: Fn(&str) + Copy,
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log(&format!(
            "page action {} skipped: main window not found",
            action.name()
        ));
        return;
    };

    window_actions::show_main_window(app_handle, log);
    dispatch_to_window(&window, action, log);
}
