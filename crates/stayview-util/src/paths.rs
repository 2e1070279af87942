//! Default paths for stayview components
//!
//! - Config: `$STAYVIEW_CONFIG`, `$XDG_CONFIG_HOME/stayview/config.toml`
//!   or `~/.config/stayview/config.toml`

use std::path::PathBuf;

/// Environment variable for overriding the config path
pub const STAYVIEW_CONFIG_ENV: &str = "STAYVIEW_CONFIG";

/// Application subdirectory name
const APP_DIR: &str = "stayview";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$STAYVIEW_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/stayview/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/stayview/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(STAYVIEW_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_dir().join(CONFIG_FILENAME)
}

fn config_dir() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join(APP_DIR)
}
