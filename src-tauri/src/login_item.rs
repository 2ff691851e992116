use tauri::AppHandle;
use tauri_plugin_autostart::ManagerExt;

use crate::HIDDEN_LAUNCH_ARG;

/// Whether the process was started by the login item rather than by the user.
pub(crate) fn launched_as_hidden<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .skip(1)
        .any(|arg| arg.as_ref() == HIDDEN_LAUNCH_ARG)
}

pub(crate) fn launch_at_login_supported() -> bool {
    cfg!(any(target_os = "macos", target_os = "windows"))
}

pub(crate) fn is_launch_at_login_enabled(app_handle: &AppHandle) -> bool {
    if !launch_at_login_supported() {
        return false;
    }
    app_handle.autolaunch().is_enabled().unwrap_or(false)
}

pub(crate) fn set_launch_at_login(app_handle: &AppHandle, enabled: bool) -> Result<(), String> {
    if !launch_at_login_supported() {
        return Err("Launch at login is not supported on this platform.".to_string());
    }

    let autolaunch = app_handle.autolaunch();
    let result = if enabled {
        autolaunch.enable()
    } else {
        autolaunch.disable()
    };
    result.map_err(|error| {
        format!(
            "Failed to {} launch at login: {}",
            if enabled { "enable" } else { "disable" },
            error
        )
    })
}

pub(crate) fn toggle_launch_at_login(app_handle: &AppHandle) -> Result<bool, String> {
    let enabled = !is_launch_at_login_enabled(app_handle);
    set_launch_at_login(app_handle, enabled)?;
    Ok(enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_flag_is_detected_after_program_name() {
        assert!(launched_as_hidden(["dybli", "--hidden"]));
        assert!(launched_as_hidden(["dybli", "--foo", "--hidden"]));
        assert!(!launched_as_hidden(["dybli"]));
        assert!(!launched_as_hidden(["--hidden"]));
        assert!(!launched_as_hidden(["dybli", "--hidden=1"]));
    }

    #[test]
    fn support_matches_target() {
        assert_eq!(
            launch_at_login_supported(),
            cfg!(any(target_os = "macos", target_os = "windows"))
        );
    }
}
