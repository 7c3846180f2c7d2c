//! Filesystem locations for configuration and logs

use std::path::PathBuf;

use crate::constants::config::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOGS_DIR_NAME};

/// Root config directory (`~/.marquee`), falling back to the working directory
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Default config file path
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Directory the binary writes its log file into
pub fn logs_dir() -> PathBuf {
    config_dir().join(LOGS_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_config_root() {
        let root = config_dir();
        assert!(root.ends_with(CONFIG_DIR_NAME));
        assert_eq!(config_file().parent(), Some(root.as_path()));
        assert_eq!(logs_dir().parent(), Some(root.as_path()));
    }
}
