use std::{env, path::PathBuf};

use crate::{
    runtime_paths, CONNECTIVITY_PROBE_ENV, DEFAULT_CONNECTIVITY_PROBE, ROOT_DIR_ENV,
    SKIP_ONLINE_CHECK_ENV,
};

/// Process-level configuration read from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShellConfig {
    pub(crate) root_dir: Option<PathBuf>,
    pub(crate) skip_online_check: bool,
    pub(crate) connectivity_probe: String,
}

impl ShellConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let root_dir = lookup(ROOT_DIR_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(runtime_paths::home_root_dir);
        let skip_online_check = lookup(SKIP_ONLINE_CHECK_ENV)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);
        let connectivity_probe = lookup(CONNECTIVITY_PROBE_ENV)
            .and_then(|value| normalize_probe_target(&value))
            .unwrap_or_else(|| DEFAULT_CONNECTIVITY_PROBE.to_string());

        Self {
            root_dir,
            skip_online_check,
            connectivity_probe,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn normalize_probe_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let (host, port) = trimmed.rsplit_once(':')?;
    if host.is_empty() {
        return None;
    }
    let port = port.parse::<u16>().ok().filter(|port| *port > 0)?;
    Some(format!("{host}:{port}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ShellConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ShellConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn from_lookup_uses_defaults_without_overrides() {
        let config = config_from(&[]);
        assert!(!config.skip_online_check);
        assert_eq!(config.connectivity_probe, DEFAULT_CONNECTIVITY_PROBE);
        if let Some(root_dir) = config.root_dir {
            assert!(root_dir.ends_with(".dybli"));
        }
    }

    #[test]
    fn from_lookup_prefers_root_override() {
        let config = config_from(&[(ROOT_DIR_ENV, "  /tmp/dybli-root  ")]);
        assert_eq!(config.root_dir, Some(PathBuf::from("/tmp/dybli-root")));
    }

    #[test]
    fn from_lookup_ignores_blank_root_override() {
        let config = config_from(&[(ROOT_DIR_ENV, "   ")]);
        assert_eq!(config.root_dir, runtime_paths::home_root_dir());
    }

    #[test]
    fn parse_flag_accepts_common_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(value), "{value} should be truthy");
        }
        for value in ["0", "false", "", "nope"] {
            assert!(!parse_flag(value), "{value} should be falsy");
        }
    }

    #[test]
    fn connectivity_probe_override_requires_host_and_port() {
        let config = config_from(&[(CONNECTIVITY_PROBE_ENV, "example.org:8443")]);
        assert_eq!(config.connectivity_probe, "example.org:8443");

        for invalid in ["example.org", ":443", "example.org:http", "example.org:0"] {
            let config = config_from(&[(CONNECTIVITY_PROBE_ENV, invalid)]);
            assert_eq!(config.connectivity_probe, DEFAULT_CONNECTIVITY_PROBE);
        }
    }
}
