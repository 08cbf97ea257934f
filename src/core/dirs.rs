use crate::core::error::ScriptHubError;
use std::path::PathBuf;

const APP_DIR: &str = "script-hub";

pub fn get_config_directory() -> Result<PathBuf, ScriptHubError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or(ScriptHubError::DirectoryNotFound { kind: "config" })
}

pub fn get_cache_directory() -> Result<PathBuf, ScriptHubError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Caches")),
        _ => dirs::cache_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or(ScriptHubError::DirectoryNotFound { kind: "cache" })
}

/// Directory holding the persistent key/value store.
pub fn get_storage_directory() -> Result<PathBuf, ScriptHubError> {
    Ok(get_cache_directory()?.join("storage"))
}
