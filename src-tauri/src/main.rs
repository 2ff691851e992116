#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_menu;
mod app_runtime;
mod app_types;
mod appearance;
mod connectivity;
mod debug_tools;
mod downloads;
mod exit_events;
mod external_url;
mod logging;
mod login_item;
mod main_window;
mod menu_actions;
mod menu_handler;
mod navigation;
mod navigation_policy;
mod page_actions;
mod page_bridge;
mod runtime_paths;
mod settings;
mod shell_config;
mod startup_task;
mod ui_dispatch;
mod window_actions;
mod window_lifecycle;

pub(crate) use app_constants::*;
pub(crate) use app_types::ShellState;
pub(crate) use logging::{
    append_desktop_log, append_navigation_log, append_shutdown_log, append_startup_log,
};

fn main() {
    app_runtime::run();
}
