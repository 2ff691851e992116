use std::{
    env, fs,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use chrono::{DateTime, Local, TimeZone};

use crate::{runtime_paths, DESKTOP_LOG_FILE, DESKTOP_LOG_MAX_BYTES};

static DESKTOP_LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn resolve_desktop_log_path(root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    runtime_paths::logs_dir(root_dir.as_deref())
        .unwrap_or_else(env::temp_dir)
        .join(file_name)
}

fn cached_log_path<F>(cell: &OnceLock<PathBuf>, resolve: F) -> &Path
where
    F: FnOnce() -> PathBuf,
{
    cell.get_or_init(resolve).as_path()
}

/// Fixes the desktop log location from the startup configuration.
pub(crate) fn init_desktop_log_path(root_dir: Option<PathBuf>) -> &'static Path {
    cached_log_path(&DESKTOP_LOG_PATH, || {
        resolve_desktop_log_path(root_dir, DESKTOP_LOG_FILE)
    })
}

fn desktop_log_path() -> &'static Path {
    cached_log_path(&DESKTOP_LOG_PATH, || {
        resolve_desktop_log_path(runtime_paths::default_root_dir(), DESKTOP_LOG_FILE)
    })
}

pub(crate) fn format_log_line<Tz>(timestamp: &DateTime<Tz>, category: &str, message: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "[{}] [{}] {}",
        timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        category,
        message
    )
}

fn rotated_log_path(path: &Path) -> PathBuf {
    let mut rotated = path.as_os_str().to_owned();
    rotated.push(".1");
    PathBuf::from(rotated)
}

pub(crate) fn rotate_log_if_needed(path: &Path, max_bytes: u64) -> Result<bool, String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(error) => {
            return Err(format!(
                "Failed to stat log file {}: {}",
                path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(false);
    }

    fs::rename(path, rotated_log_path(path)).map_err(|error| {
        format!("Failed to rotate log file {}: {}", path.display(), error)
    })?;
    Ok(true)
}

pub(crate) fn append_log_line(path: &Path, line: &str) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    writeln!(file, "{line}")
        .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}

fn append_log(category: &str, message: &str) {
    let line = format_log_line(&Local::now(), category, message);
    if cfg!(debug_assertions) {
        eprintln!("{line}");
    }

    let path = desktop_log_path();
    let _ = rotate_log_if_needed(path, DESKTOP_LOG_MAX_BYTES);
    let _ = append_log_line(path, &line);
}

pub(crate) fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_log("shutdown", message);
}

pub(crate) fn append_navigation_log(message: &str) {
    append_log("navigation", message);
}
