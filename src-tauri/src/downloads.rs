use std::path::{Path, PathBuf};

use tauri::{webview::DownloadEvent, Manager, Webview};
use url::Url;

use crate::append_desktop_log;

const FALLBACK_FILE_NAME: &str = "download";

pub(crate) fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(sanitize_file_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

fn sanitize_file_name(raw: &str) -> String {
    raw.chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect::<String>()
        .trim_matches(|ch: char| ch == '.' || ch.is_whitespace())
        .to_string()
}

/// `dir/name`, or `dir/name (n).ext` with the first free `n` when taken.
pub(crate) fn unique_destination(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name_path = Path::new(file_name);
    let stem = name_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    let extension = name_path
        .extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default();

    (1_u32..)
        .map(|index| dir.join(format!("{stem} ({index}){extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(candidate)
}

pub(crate) fn handle_download_event(webview: &Webview, event: DownloadEvent<'_>) -> bool {
    match event {
        DownloadEvent::Requested { url, destination } => {
            let download_dir = match webview.app_handle().path().download_dir() {
                Ok(dir) => dir,
                Err(error) => {
                    append_desktop_log(&format!(
                        "download directory unavailable, keeping default destination for {url}: {error}"
                    ));
                    return true;
                }
            };
            let file_name = destination
                .file_name()
                .map(|name| sanitize_file_name(&name.to_string_lossy()))
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| file_name_from_url(&url));

            *destination = unique_destination(&download_dir, &file_name);
            append_desktop_log(&format!(
                "download started: {url} -> {}",
                destination.display()
            ));
            true
        }
        DownloadEvent::Finished { url, path, success } => {
            let target = path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<unknown>".to_string());
            if success {
                append_desktop_log(&format!("download finished: {url} -> {target}"));
            } else {
                append_desktop_log(&format!("download failed: {url} -> {target}"));
            }
            true
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn file_name_from_url_uses_last_path_segment() {
        let url = Url::parse("https://service.post.ch/files/Invoice-2024.pdf?token=1").unwrap();
        assert_eq!(file_name_from_url(&url), "Invoice-2024.pdf");
    }

    #[test]
    fn file_name_from_url_falls_back_for_bare_paths() {
        let url = Url::parse("https://service.post.ch/").unwrap();
        assert_eq!(file_name_from_url(&url), "download");
    }

    #[test]
    fn sanitize_file_name_replaces_separators() {
        assert_eq!(sanitize_file_name("a/b\\c:d.pdf"), "a_b_c_d.pdf");
        assert_eq!(sanitize_file_name("  ..hidden.txt "), "hidden.txt");
    }

    #[test]
    fn unique_destination_appends_counter_when_taken() {
        let temp = tempfile::tempdir().expect("create temp dir");
        assert_eq!(
            unique_destination(temp.path(), "scan.pdf"),
            temp.path().join("scan.pdf")
        );

        fs::write(temp.path().join("scan.pdf"), b"1").expect("seed file");
        fs::write(temp.path().join("scan (1).pdf"), b"2").expect("seed file");
        assert_eq!(
            unique_destination(temp.path(), "scan.pdf"),
            temp.path().join("scan (2).pdf")
        );
    }

    #[test]
    fn unique_destination_handles_names_without_extension() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join("README"), b"1").expect("seed file");
        assert_eq!(
            unique_destination(temp.path(), "README"),
            temp.path().join("README (1)")
        );
    }
}
