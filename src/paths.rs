//! Platform-specific filesystem path helpers.

use std::ffi::OsString;
use std::path::PathBuf;

/// Path to the debug log file.
///
/// This is located in the OS temp directory.
#[must_use]
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("branchline.log")
}

#[must_use]
#[cfg(windows)]
fn home_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    if let Some(home) = var_os("USERPROFILE") {
        return Some(PathBuf::from(home));
    }

    let drive = var_os("HOMEDRIVE");
    let path = var_os("HOMEPATH");
    if let (Some(drive), Some(path)) = (drive, path) {
        let mut combined = PathBuf::from(drive);
        combined.push(path);
        return Some(combined);
    }

    var_os("HOME").map(PathBuf::from)
}

#[must_use]
#[cfg(not(windows))]
fn home_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    var_os("HOME").map(PathBuf::from)
}

/// Locate the user's home directory.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    let mut var_os = |key: &'static str| std::env::var_os(key);
    home_dir_from(&mut var_os)
}

#[must_use]
#[cfg(windows)]
fn config_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    var_os("APPDATA").map(PathBuf::from)
}

#[must_use]
#[cfg(not(windows))]
fn config_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir_from(var_os).map(|home| home.join(".config")))
}

/// Resolve the user configuration directory for the current platform.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    let mut var_os = |key: &'static str| std::env::var_os(key);
    config_dir_from(&mut var_os)
}
