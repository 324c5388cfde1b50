use std::env;
use std::path::PathBuf;

use tracing::{debug, warn};

/// Get the path to the config.json file
/// `RELAY_SYNC_CONFIG` wins; otherwise config.json in the app root (parent of
/// the directory holding the executable).
pub(super) fn get_config_path() -> PathBuf {
    if let Ok(custom) = env::var("RELAY_SYNC_CONFIG") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    // Executable is at: app_root/bin/relay-sync
    if let Ok(exe_path) = env::current_exe() {
        debug!(path = %exe_path.display(), "Executable path detected");

        if let Some(app_root) = exe_path.parent().and_then(|bin_dir| bin_dir.parent()) {
            let config_path = app_root.join("config.json");
            debug!(path = %config_path.display(), "Looking for config");
            return config_path;
        }
    }

    warn!("Using fallback: looking for config.json in current directory");
    PathBuf::from("config.json")
}
