//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log/source paths and detects symlinked ancestors for safety.

use dirs::{config_dir, data_dir, download_dir, home_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV_VAR;

const APP_DIR: &str = "organise_downloads";

/// Config file named by `ORGANISE_DOWNLOADS_CONFIG`; an empty value counts as unset.
pub fn env_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV_VAR)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Config file location used when no `--config` flag is given.
///
/// `ORGANISE_DOWNLOADS_CONFIG` wins when set; otherwise
/// `<config_dir>/organise_downloads/config.xml`, falling back to `$HOME/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env_config_path() {
        return Some(p);
    }
    config_dir()
        .or_else(|| home_dir().map(|h| h.join(".config")))
        .map(|base| base.join(APP_DIR).join("config.xml"))
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Option<PathBuf> {
    data_dir()
        .or_else(|| home_dir().map(|h| h.join(".local").join("share")))
        .map(|base| base.join(APP_DIR).join("organise-downloads.log"))
}

/// The current user's downloads directory (`$HOME/Downloads` when the platform
/// has no dedicated notion of one).
pub fn default_source_dir() -> Option<PathBuf> {
    download_dir().or_else(|| home_dir().map(|h| h.join("Downloads")))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
