//! XDG Base Directory paths for easymath.
//!
//! The CLI uses XDG paths on every platform rather than platform-native
//! locations, so the dataset and config live in the same place on macOS
//! and Linux.

use std::path::PathBuf;

/// File name of the dataset document inside the data directory.
pub const DATASET_FILE: &str = "EasyMathDataset.json";

/// Get the easymath config directory.
///
/// Returns `$XDG_CONFIG_HOME/easymath` if set, otherwise `~/.config/easymath`.
///
/// # Examples
///
/// ```
/// use easymath_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("easymath")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/easymath")
    } else {
        PathBuf::from(".config/easymath")
    }
}

/// Get the easymath data directory.
///
/// Returns `$XDG_DATA_HOME/easymath` if set, otherwise `~/.local/share/easymath`.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("easymath")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/easymath")
    } else {
        PathBuf::from(".local/share/easymath")
    }
}

/// Default location of the dataset document.
pub fn default_dataset_path() -> PathBuf {
    data_dir().join(DATASET_FILE)
}
