//! Environment constants and path utilities for cowtodo.
//!
//! Centralizes the configuration file names and directories searched during
//! configuration discovery.

use std::path::{Path, PathBuf};

/// Per-user and per-project configuration directory name
pub const COWTODO_DIR_NAME: &str = ".cowtodo";

/// Configuration file name inside [`COWTODO_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Stand-alone configuration file name in the working directory
pub const LOCAL_CONFIG_FILE_NAME: &str = "cowtodo.toml";

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "cowtodo=warn";

/// Log filter used with `--verbose`
pub const VERBOSE_LOG_FILTER: &str = "cowtodo=info";

/// Build the stand-alone config file path in a directory
pub fn local_config_file_path(current_dir: &Path) -> PathBuf {
    current_dir.join(LOCAL_CONFIG_FILE_NAME)
}

/// Build the hidden-directory config file path in a directory
pub fn local_dir_config_file_path(current_dir: &Path) -> PathBuf {
    current_dir.join(COWTODO_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Build config directory path in user's home directory
pub fn user_config_dir_path(home_dir: &Path) -> PathBuf {
    home_dir.join(COWTODO_DIR_NAME)
}

/// Build config file path in user's home directory
pub fn user_config_file_path(home_dir: &Path) -> PathBuf {
    user_config_dir_path(home_dir).join(CONFIG_FILE_NAME)
}

/// System-wide config file path
#[cfg(unix)]
pub fn system_config_file_path() -> PathBuf {
    PathBuf::from("/etc/cowtodo").join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let home_dir = Path::new("/home/user");
        let current_dir = Path::new("/current/project");

        assert_eq!(
            user_config_file_path(home_dir),
            Path::new("/home/user/.cowtodo/config.toml")
        );

        assert_eq!(
            local_config_file_path(current_dir),
            Path::new("/current/project/cowtodo.toml")
        );

        assert_eq!(
            local_dir_config_file_path(current_dir),
            Path::new("/current/project/.cowtodo/config.toml")
        );
    }
}
