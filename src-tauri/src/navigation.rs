use tauri::{AppHandle, Manager};
use url::Url;

use crate::{
    append_navigation_log, external_url,
    navigation_policy::{self, Disposition, NavigationRequest},
    ui_dispatch, ShellState, MAIN_WINDOW_LABEL, PORTAL_HOME_URL,
};

/// Navigation hook for the main webview. Returns whether the webview may load `url`.
///
/// Callbacks that arrive while an allowed load is still in flight are its
/// server-side redirect hops and pass without evaluation.
pub(crate) fn handle_in_place_navigation(app_handle: &AppHandle, url: &Url) -> bool {
    let raw_url = url.as_str();
    let state = app_handle.state::<ShellState>();
    if let Some(loading) = state.redirecting_load() {
        append_navigation_log(&format!("redirect hop allowed: {raw_url} (loading {loading})"));
        return true;
    }

    let disposition = navigation_policy::evaluate(&NavigationRequest::in_place(raw_url));
    let allowed = apply_disposition(app_handle, raw_url, &disposition);
    if allowed {
        state.begin_load(raw_url);
    }
    allowed
}

/// New-window hook for the main webview. A second in-app window is never created.
pub(crate) fn handle_new_window_request(app_handle: &AppHandle, url: &Url) {
    let raw_url = url.as_str();
    let disposition = navigation_policy::evaluate(&NavigationRequest::new_window(raw_url));
    apply_disposition(app_handle, raw_url, &disposition);
}

fn apply_disposition(app_handle: &AppHandle, raw_url: &str, disposition: &Disposition) -> bool {
    match disposition {
        Disposition::Allow => {
            append_navigation_log(&format!("navigation allowed: {raw_url}"));
        }
        Disposition::RedirectHome => {
            append_navigation_log(&format!("navigation redirected to portal home: {raw_url}"));
            redirect_to_portal_home(app_handle);
        }
        Disposition::OpenExternal(_) | Disposition::OpenExternalStripped(_) => {}
    }

    if let Some(target) = disposition.external_url() {
        append_navigation_log(&format!("opening externally: {target}"));
        if let Err(error) = external_url::open_external_url(target) {
            append_navigation_log(&format!("failed to open {target} externally: {error}"));
        }
    }

    disposition.allows_navigation()
}

pub(crate) fn portal_home_url() -> Result<Url, String> {
    Url::parse(PORTAL_HOME_URL)
        .map_err(|error| format!("Invalid portal URL {PORTAL_HOME_URL}: {error}"))
}

fn redirect_to_portal_home(app_handle: &AppHandle) {
    let result = ui_dispatch::run_on_main_thread_dispatch(
        app_handle,
        "redirect to portal home",
        |main_app| {
            let Some(window) = main_app.get_webview_window(MAIN_WINDOW_LABEL) else {
                append_navigation_log("portal redirect skipped: main window not found");
                return;
            };
            let home = match portal_home_url() {
                Ok(home) => home,
                Err(error) => {
                    append_navigation_log(&error);
                    return;
                }
            };

            main_app.state::<ShellState>().begin_load(home.as_str());
            if let Err(error) = window.navigate(home) {
                append_navigation_log(&format!("failed to load portal home: {error}"));
            }
        },
    );
    if let Err(error) = result {
        append_navigation_log(&error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_home_url_parses_without_normalization_drift() {
        let home = portal_home_url().expect("portal URL parses");
        assert_eq!(home.as_str(), PORTAL_HOME_URL);
    }
}
