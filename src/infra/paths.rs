// src/infra/paths.rs — Config path resolution
//
// All paths respect the PARLOR_HOME environment variable for isolation.
// When unset, config lives under ~/.parlor/.

use std::path::PathBuf;

fn parlor_home() -> Option<PathBuf> {
    std::env::var_os("PARLOR_HOME").map(PathBuf::from)
}

/// Configuration directory: $PARLOR_HOME/ or ~/.parlor/
pub fn config_dir() -> PathBuf {
    if let Some(home) = parlor_home() {
        return home;
    }
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".parlor")
}

/// Path to config.toml.
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
