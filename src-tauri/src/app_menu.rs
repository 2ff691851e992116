use tauri::{
    menu::{CheckMenuItem, IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu},
    AppHandle, Manager, Wry,
};

use crate::{
    login_item,
    menu_actions::{
        MENU_DARK_MODE, MENU_DELETE_APP_DATA, MENU_DELETE_SETTINGS, MENU_FOLLOW_SYSTEM_APPEARANCE,
        MENU_LAUNCH_AT_LOGIN, MENU_LAUNCH_MINIMIZED, MENU_LOG_OUT, MENU_NEW_MESSAGE,
        MENU_PORTAL_PREFERENCES, MENU_QUIT, MENU_QUIT_ON_WINDOW_CLOSE, MENU_RELOAD,
        MENU_SHOW_APP_DATA, MENU_SHOW_SETTINGS_FILE, MENU_SUBSCRIPTION, MENU_TOGGLE_DEVTOOLS,
    },
    settings::Settings,
    ShellState, APP_NAME,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuPlatform {
    MacOs,
    Windows,
    Linux,
}

impl MenuPlatform {
    pub(crate) fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

/// Items rendered by the OS itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NativeItem {
    About,
    Services,
    Hide,
    HideOthers,
    ShowAll,
    CloseWindow,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Minimize,
    Maximize,
    Fullscreen,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MenuEntry {
    Item {
        id: &'static str,
        label: String,
        accelerator: Option<&'static str>,
    },
    Check {
        id: &'static str,
        label: String,
        checked: bool,
        enabled: bool,
        accelerator: Option<&'static str>,
    },
    Submenu {
        label: String,
        entries: Vec<MenuEntry>,
    },
    Native(NativeItem),
}

fn item(id: &'static str, label: &str, accelerator: Option<&'static str>) -> MenuEntry {
    MenuEntry::Item {
        id,
        label: label.to_string(),
        accelerator,
    }
}

fn check(id: &'static str, label: &str, checked: bool) -> MenuEntry {
    MenuEntry::Check {
        id,
        label: label.to_string(),
        checked,
        enabled: true,
        accelerator: None,
    }
}

fn submenu(label: &str, entries: Vec<MenuEntry>) -> MenuEntry {
    MenuEntry::Submenu {
        label: label.to_string(),
        entries,
    }
}

const SEPARATOR: MenuEntry = MenuEntry::Native(NativeItem::Separator);

/// Everything the menu shape depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MenuInputs {
    pub(crate) platform: MenuPlatform,
    pub(crate) settings: Settings,
    pub(crate) launch_at_login: bool,
    pub(crate) debug: bool,
}

fn dark_mode_entry(inputs: &MenuInputs) -> MenuEntry {
    let system_driven =
        inputs.platform == MenuPlatform::MacOs && inputs.settings.follow_system_appearance;
    MenuEntry::Check {
        id: MENU_DARK_MODE,
        label: "Dark Mode".to_string(),
        checked: inputs.settings.dark_mode,
        enabled: !system_driven,
        accelerator: Some("CmdOrCtrl+D"),
    }
}

fn quit_entry() -> MenuEntry {
    item(MENU_QUIT, &format!("Quit {APP_NAME}"), Some("CmdOrCtrl+Q"))
}

fn edit_menu() -> MenuEntry {
    submenu(
        "Edit",
        vec![
            MenuEntry::Native(NativeItem::Undo),
            MenuEntry::Native(NativeItem::Redo),
            SEPARATOR,
            MenuEntry::Native(NativeItem::Cut),
            MenuEntry::Native(NativeItem::Copy),
            MenuEntry::Native(NativeItem::Paste),
            MenuEntry::Native(NativeItem::SelectAll),
        ],
    )
}

fn debug_menu() -> MenuEntry {
    submenu(
        "Debug",
        vec![
            item(MENU_SHOW_SETTINGS_FILE, "Show Settings", None),
            item(MENU_SHOW_APP_DATA, "Show App Data", None),
            SEPARATOR,
            item(MENU_DELETE_SETTINGS, "Delete Settings", None),
            item(MENU_DELETE_APP_DATA, "Delete App Data", None),
            SEPARATOR,
            item(MENU_RELOAD, "Reload", Some("CmdOrCtrl+R")),
            item(MENU_TOGGLE_DEVTOOLS, "Toggle Developer Tools", Some("Alt+CmdOrCtrl+I")),
        ],
    )
}

fn mac_os_template(inputs: &MenuInputs) -> Vec<MenuEntry> {
    let settings = &inputs.settings;
    vec![
        submenu(
            APP_NAME,
            vec![
                MenuEntry::Native(NativeItem::About),
                SEPARATOR,
                submenu(
                    &format!("{APP_NAME} Preferences"),
                    vec![
                        check(MENU_LAUNCH_AT_LOGIN, "Launch at Login", inputs.launch_at_login),
                        check(
                            MENU_QUIT_ON_WINDOW_CLOSE,
                            "Quit on Window Close",
                            settings.quit_on_window_close,
                        ),
                    ],
                ),
                item(
                    MENU_PORTAL_PREFERENCES,
                    "E-Post Office Preferences…",
                    Some("CmdOrCtrl+,"),
                ),
                item(MENU_SUBSCRIPTION, "Subscription…", None),
                SEPARATOR,
                item(MENU_LOG_OUT, "Log Out", None),
                SEPARATOR,
                MenuEntry::Native(NativeItem::Services),
                SEPARATOR,
                MenuEntry::Native(NativeItem::Hide),
                MenuEntry::Native(NativeItem::HideOthers),
                MenuEntry::Native(NativeItem::ShowAll),
                SEPARATOR,
                quit_entry(),
            ],
        ),
        submenu(
            "File",
            vec![
                item(MENU_NEW_MESSAGE, "New Message", Some("CmdOrCtrl+N")),
                SEPARATOR,
                MenuEntry::Native(NativeItem::CloseWindow),
            ],
        ),
        edit_menu(),
        submenu(
            "View",
            vec![
                check(
                    MENU_FOLLOW_SYSTEM_APPEARANCE,
                    "Follow System Appearance",
                    settings.follow_system_appearance,
                ),
                dark_mode_entry(inputs),
                SEPARATOR,
                MenuEntry::Native(NativeItem::Fullscreen),
            ],
        ),
        submenu(
            "Window",
            vec![
                MenuEntry::Native(NativeItem::Minimize),
                MenuEntry::Native(NativeItem::Maximize),
            ],
        ),
    ]
}

fn desktop_template(inputs: &MenuInputs) -> Vec<MenuEntry> {
    let settings = &inputs.settings;
    let mut shell_settings = Vec::new();
    if inputs.platform == MenuPlatform::Windows {
        shell_settings.push(check(
            MENU_LAUNCH_AT_LOGIN,
            "Launch at Login",
            inputs.launch_at_login,
        ));
    }
    shell_settings.push(check(
        MENU_LAUNCH_MINIMIZED,
        "Launch Minimized",
        settings.launch_minimized,
    ));
    shell_settings.push(check(
        MENU_QUIT_ON_WINDOW_CLOSE,
        "Quit on Window Close",
        settings.quit_on_window_close,
    ));

    vec![
        submenu(
            "File",
            vec![
                item(MENU_NEW_MESSAGE, "New Message", Some("CmdOrCtrl+N")),
                SEPARATOR,
                submenu(&format!("{APP_NAME} Settings"), shell_settings),
                item(
                    MENU_PORTAL_PREFERENCES,
                    "E-Post Office Settings",
                    Some("CmdOrCtrl+,"),
                ),
                item(MENU_SUBSCRIPTION, "Subscription…", None),
                SEPARATOR,
                item(MENU_LOG_OUT, "Log Out", None),
                SEPARATOR,
                quit_entry(),
            ],
        ),
        edit_menu(),
        submenu("View", vec![dark_mode_entry(inputs)]),
    ]
}

/// Top-level menus for the given platform and state.
pub(crate) fn menu_template(inputs: &MenuInputs) -> Vec<MenuEntry> {
    let mut template = match inputs.platform {
        MenuPlatform::MacOs => mac_os_template(inputs),
        MenuPlatform::Windows | MenuPlatform::Linux => desktop_template(inputs),
    };
    if inputs.debug {
        template.push(debug_menu());
    }
    template
}

fn current_inputs(app_handle: &AppHandle) -> MenuInputs {
    MenuInputs {
        platform: MenuPlatform::current(),
        settings: app_handle.state::<ShellState>().settings_snapshot(),
        launch_at_login: login_item::is_launch_at_login_enabled(app_handle),
        debug: cfg!(debug_assertions),
    }
}

fn native_item(
    app_handle: &AppHandle,
    native: NativeItem,
) -> tauri::Result<PredefinedMenuItem<Wry>> {
    match native {
        NativeItem::About => PredefinedMenuItem::about(app_handle, None, None),
        NativeItem::Services => PredefinedMenuItem::services(app_handle, None),
        NativeItem::Hide => PredefinedMenuItem::hide(app_handle, None),
        NativeItem::HideOthers => PredefinedMenuItem::hide_others(app_handle, None),
        NativeItem::ShowAll => PredefinedMenuItem::show_all(app_handle, None),
        NativeItem::CloseWindow => PredefinedMenuItem::close_window(app_handle, None),
        NativeItem::Undo => PredefinedMenuItem::undo(app_handle, None),
        NativeItem::Redo => PredefinedMenuItem::redo(app_handle, None),
        NativeItem::Cut => PredefinedMenuItem::cut(app_handle, None),
        NativeItem::Copy => PredefinedMenuItem::copy(app_handle, None),
        NativeItem::Paste => PredefinedMenuItem::paste(app_handle, None),
        NativeItem::SelectAll => PredefinedMenuItem::select_all(app_handle, None),
        NativeItem::Minimize => PredefinedMenuItem::minimize(app_handle, None),
        NativeItem::Maximize => PredefinedMenuItem::maximize(app_handle, None),
        NativeItem::Fullscreen => PredefinedMenuItem::fullscreen(app_handle, None),
        NativeItem::Separator => PredefinedMenuItem::separator(app_handle),
    }
}

fn render_entry(
    app_handle: &AppHandle,
    entry: &MenuEntry,
) -> tauri::Result<Box<dyn IsMenuItem<Wry>>> {
    let rendered: Box<dyn IsMenuItem<Wry>> = match entry {
        MenuEntry::Item {
            id,
            label,
            accelerator,
        } => Box::new(MenuItem::with_id(
            app_handle,
            *id,
            label,
            true,
            *accelerator,
        )?),
        MenuEntry::Check {
            id,
            label,
            checked,
            enabled,
            accelerator,
        } => Box::new(CheckMenuItem::with_id(
            app_handle,
            *id,
            label,
            *enabled,
            *checked,
            *accelerator,
        )?),
        MenuEntry::Submenu { label, entries } => {
            let submenu = Submenu::new(app_handle, label, true)?;
            for child in entries {
                submenu.append(&*render_entry(app_handle, child)?)?;
            }
            Box::new(submenu)
        }
        MenuEntry::Native(native) => Box::new(native_item(app_handle, *native)?),
    };
    Ok(rendered)
}

fn build_menu(app_handle: &AppHandle, template: &[MenuEntry]) -> tauri::Result<Menu<Wry>> {
    let menu = Menu::new(app_handle)?;
    for entry in template {
        menu.append(&*render_entry(app_handle, entry)?)?;
    }
    Ok(menu)
}

pub(crate) fn install_app_menu(app_handle: &AppHandle) -> Result<(), String> {
    let template = menu_template(&current_inputs(app_handle));
    let menu = build_menu(app_handle, &template)
        .map_err(|error| format!("Failed to build application menu: {error}"))?;
    app_handle
        .set_menu(menu)
        .map(|_| ())
        .map_err(|error| format!("Failed to install application menu: {error}"))
}

/// Rebuilds the menu so check marks and enabled states follow the current settings.
pub(crate) fn refresh_app_menu<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = install_app_menu(app_handle) {
        log(&error);
    }
}
