use std::{
    ffi::OsStr,
    path::Path,
    process::{Command, Stdio},
};

use url::Url;

const OPENABLE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

pub(crate) fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    if OPENABLE_SCHEMES.contains(&parsed.scheme()) {
        Ok(parsed)
    } else {
        Err(format!(
            "Unsupported URL scheme '{}', only http/https/mailto are allowed.",
            parsed.scheme()
        ))
    }
}

/// Hands `raw_url` to the system browser exactly as given once its scheme checks out.
pub(crate) fn open_external_url(raw_url: &str) -> Result<(), String> {
    parse_openable_url(raw_url)?;
    open_with_system_handler(OsStr::new(raw_url.trim()))
}

pub(crate) fn open_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Path does not exist: {}", path.display()));
    }
    open_with_system_handler(path.as_os_str())
}

fn spawn_detached(program: &str, args: &[&OsStr]) -> Result<(), String> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run '{program}': {error}"))
}

#[cfg(target_os = "macos")]
fn open_with_system_handler(target: &OsStr) -> Result<(), String> {
    spawn_detached("open", &[target])
}

#[cfg(target_os = "windows")]
fn open_with_system_handler(target: &OsStr) -> Result<(), String> {
    spawn_detached("rundll32", &[OsStr::new("url.dll,FileProtocolHandler"), target])
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_with_system_handler(target: &OsStr) -> Result<(), String> {
    spawn_detached("xdg-open", &[target])
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_with_system_handler(_target: &OsStr) -> Result<(), String> {
    Err("Opening external targets is not supported on this platform.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_openable_url_accepts_web_and_mail_links() {
        for url in [
            "https://example.com/a?b=c",
            "http://example.com",
            "mailto:support@post.ch",
        ] {
            assert!(parse_openable_url(url).is_ok(), "{url}");
        }
    }

    #[test]
    fn parse_openable_url_rejects_blank_and_local_schemes() {
        assert_eq!(
            parse_openable_url("   "),
            Err("Missing external URL.".to_string())
        );
        assert!(parse_openable_url("file:///etc/passwd")
            .unwrap_err()
            .contains("Unsupported URL scheme 'file'"));
        assert!(parse_openable_url("javascript:alert(1)").is_err());
        assert!(parse_openable_url("not a url").is_err());
    }

    #[test]
    fn open_external_url_refuses_unsupported_scheme_before_spawning() {
        assert!(open_external_url("file:///tmp").is_err());
    }

    #[test]
    fn open_path_rejects_missing_path() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let missing = temp.path().join("missing");
        assert!(open_path(&missing)
            .unwrap_err()
            .starts_with("Path does not exist"));
    }
}
