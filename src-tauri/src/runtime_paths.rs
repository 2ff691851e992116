use std::path::{Path, PathBuf};

use crate::{shell_config::ShellConfig, ROOT_DIR_NAME, SETTINGS_FILE};

pub(crate) fn home_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(ROOT_DIR_NAME))
}

pub(crate) fn default_root_dir() -> Option<PathBuf> {
    ShellConfig::from_env().root_dir
}

pub(crate) fn settings_path(root_dir: Option<&Path>) -> Option<PathBuf> {
    root_dir.map(|root| root.join(SETTINGS_FILE))
}

pub(crate) fn logs_dir(root_dir: Option<&Path>) -> Option<PathBuf> {
    root_dir.map(|root| root.join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_and_logs_live_under_root_dir() {
        let root = PathBuf::from("/data/dybli");
        assert_eq!(
            settings_path(Some(&root)),
            Some(PathBuf::from("/data/dybli/settings.json"))
        );
        assert_eq!(
            logs_dir(Some(&root)),
            Some(PathBuf::from("/data/dybli/logs"))
        );
    }

    #[test]
    fn missing_root_dir_yields_no_paths() {
        assert_eq!(settings_path(None), None);
        assert_eq!(logs_dir(None), None);
    }
}
