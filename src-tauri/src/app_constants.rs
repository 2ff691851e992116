pub(crate) const APP_NAME: &str = "Dybli";
pub(crate) const MAIN_WINDOW_LABEL: &str = "main";

pub(crate) const PORTAL_HOME_URL: &str = "https://service.post.ch/epostoffice";

pub(crate) const MIN_WINDOW_WIDTH: f64 = 1140.0;
pub(crate) const MIN_WINDOW_HEIGHT: f64 = 600.0;

pub(crate) const ROOT_DIR_NAME: &str = ".dybli";
pub(crate) const SETTINGS_FILE: &str = "settings.json";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;

pub(crate) const ROOT_DIR_ENV: &str = "DYBLI_ROOT";
pub(crate) const SKIP_ONLINE_CHECK_ENV: &str = "DYBLI_SKIP_ONLINE_CHECK";
pub(crate) const CONNECTIVITY_PROBE_ENV: &str = "DYBLI_CONNECTIVITY_PROBE";

pub(crate) const DEFAULT_CONNECTIVITY_PROBE: &str = "service.post.ch:443";
pub(crate) const CONNECTIVITY_POLL_INTERVAL_MS: u64 = 1_000;
pub(crate) const CONNECTIVITY_PROBE_TIMEOUT_MS: u64 = 2_000;

// Upper bound on how long server-side redirect hops of one load are let through.
pub(crate) const LOAD_REDIRECT_WINDOW_MS: u64 = 30_000;

// Passed by the login item registration so a login launch starts hidden.
pub(crate) const HIDDEN_LAUNCH_ARG: &str = "--hidden";
