use tauri::{
    webview::NewWindowResponse, AppHandle, Manager, PhysicalPosition, PhysicalSize, WebviewUrl,
    WebviewWindow, WebviewWindowBuilder,
};
use url::Url;

use crate::{
    app_menu, appearance, append_desktop_log, downloads, navigation, page_bridge,
    settings::WindowGeometry,
    window_actions,
    window_lifecycle::LifecycleEvent,
    ShellState, APP_NAME, MAIN_WINDOW_LABEL, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};

/// Restored inner size, never smaller than the minimum window size.
pub(crate) fn initial_window_size(geometry: &WindowGeometry) -> (f64, f64) {
    (
        f64::from(geometry.width).max(MIN_WINDOW_WIDTH),
        f64::from(geometry.height).max(MIN_WINDOW_HEIGHT),
    )
}

pub(crate) fn initial_window_position(geometry: &WindowGeometry) -> Option<(f64, f64)> {
    match (geometry.x, geometry.y) {
        (Some(x), Some(y)) => Some((f64::from(x), f64::from(y))),
        _ => None,
    }
}

/// Converts physical window bounds into the logical geometry that gets persisted.
pub(crate) fn geometry_from_physical(
    size: PhysicalSize<u32>,
    position: Option<PhysicalPosition<i32>>,
    scale_factor: f64,
) -> WindowGeometry {
    let logical_size = size.to_logical::<f64>(scale_factor);
    let logical_position = position.map(|position| position.to_logical::<f64>(scale_factor));

    WindowGeometry {
        width: logical_size.width.round().max(0.0) as u32,
        height: logical_size.height.round().max(0.0) as u32,
        x: logical_position.map(|position| position.x.round() as i32),
        y: logical_position.map(|position| position.y.round() as i32),
    }
}

const PLACEHOLDER_PAGE_URL: &str = "about:blank";

/// The blank page the window starts on while the portal cookie is installed.
pub(crate) fn is_placeholder_page(url: &Url) -> bool {
    url.scheme() == "about"
}

/// Bounds to save on quit: the live ones, or the last normal ones while maximized.
pub(crate) fn geometry_to_persist(
    current: Option<WindowGeometry>,
    last_normal: Option<WindowGeometry>,
) -> Option<WindowGeometry> {
    current.or(last_normal)
}

/// Creates the hidden main window, installs the portal cookie, then starts
/// loading the portal home page.
pub(crate) fn create_main_window(app_handle: &AppHandle) -> Result<WebviewWindow, String> {
    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        return Ok(window);
    }

    let state = app_handle.state::<ShellState>();
    let settings = state.settings_snapshot();
    let home = navigation::portal_home_url()?;
    let placeholder = Url::parse(PLACEHOLDER_PAGE_URL)
        .map_err(|error| format!("Invalid placeholder URL {PLACEHOLDER_PAGE_URL}: {error}"))?;
    let platform_follows_system = appearance::platform_follows_system_appearance();
    let bridge_script = page_bridge::build_page_bridge_script(appearance::effective_dark_mode(
        platform_follows_system,
        &settings,
        false,
    ))?;

    let (width, height) = initial_window_size(&settings.last_window_state);
    let navigation_app = app_handle.clone();
    let new_window_app = app_handle.clone();

    let mut builder =
        WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, WebviewUrl::External(placeholder))
            .title(APP_NAME)
            .inner_size(width, height)
            .min_inner_size(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
            .visible(false)
            .theme(appearance::window_theme_hint(
                platform_follows_system,
                &settings,
            ))
            .initialization_script(bridge_script.as_str())
            .on_navigation(move |url| navigation::handle_in_place_navigation(&navigation_app, url))
            .on_new_window(move |url, _features| {
                navigation::handle_new_window_request(&new_window_app, &url);
                NewWindowResponse::Deny
            })
            .on_download(|webview, event| downloads::handle_download_event(&webview, event));

    if let Some((x, y)) = initial_window_position(&settings.last_window_state) {
        builder = builder.position(x, y);
    }

    state.begin_load(PLACEHOLDER_PAGE_URL);
    let window = builder
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;

    if let Err(error) = window.set_cookie(page_bridge::portal_cookie()) {
        append_desktop_log(&format!("failed to set portal cookie: {error}"));
    }

    state.begin_load(home.as_str());
    window
        .navigate(home.clone())
        .map_err(|error| format!("Failed to load {home}: {error}"))?;
    append_desktop_log(&format!(
        "main window created: {}x{} loading {}",
        width, height, home
    ));
    Ok(window)
}

/// Page-load completion hook. Closes the redirect window of the finished load.
pub(crate) fn handle_page_finished(app_handle: &AppHandle, url: &Url) {
    if is_placeholder_page(url) {
        return;
    }

    app_handle.state::<ShellState>().finish_load();
    handle_content_ready(app_handle);
}

fn handle_content_ready(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };

    let state = app_handle.state::<ShellState>();
    let start_hidden = state.opened_as_hidden || state.settings_snapshot().launch_minimized;
    let effect = state.apply_lifecycle(LifecycleEvent::ContentReady { start_hidden });
    window_actions::apply_window_effect(&window, effect, append_desktop_log);

    appearance::sync_dark_mode(app_handle, append_desktop_log);
    app_menu::refresh_app_menu(app_handle, append_desktop_log);
}

/// Current window bounds, or `None` while minimized, maximized or fullscreen.
pub(crate) fn read_window_geometry(window: &WebviewWindow) -> Option<WindowGeometry> {
    if matches!(window.is_minimized(), Ok(true))
        || matches!(window.is_maximized(), Ok(true))
        || matches!(window.is_fullscreen(), Ok(true))
    {
        return None;
    }

    let size = window.inner_size().ok()?;
    let scale_factor = window.scale_factor().ok()?;
    let position = window.outer_position().ok();
    Some(geometry_from_physical(size, position, scale_factor))
}

/// Resize and move hook. Keeps the bounds a maximized window restores to.
pub(crate) fn remember_normal_geometry(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    if let Some(geometry) = read_window_geometry(&window) {
        app_handle
            .state::<ShellState>()
            .remember_normal_geometry(geometry);
    }
}
