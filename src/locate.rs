//! Locating the SoX executable

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::{Error, Result};

/// Tool name looked up on the search path when no binary is configured.
pub const SOX: &str = "sox";

/// Ordered list of directories searched for executables.
#[derive(Clone, Debug, Default)]
pub struct ExecutableSearch {
    dirs: Vec<PathBuf>,
}

impl ExecutableSearch {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Directories from the `PATH` environment variable.
    pub fn from_env() -> Self {
        let dirs = std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self { dirs }
    }

    /// First executable named `name` in the search directories.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .flat_map(|dir| candidate_names(name).into_iter().map(move |n| dir.join(n)))
            .find(|path| is_executable(path))
    }
}

#[cfg(windows)]
fn candidate_names(name: &str) -> Vec<OsString> {
    vec![OsString::from(format!("{name}.exe")), OsString::from(name)]
}

#[cfg(not(windows))]
fn candidate_names(name: &str) -> Vec<OsString> {
    vec![OsString::from(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Program to run: the configured binary if any, else the `sox` found on the
/// search path.
///
/// A configured path is used as given; a bad one surfaces later as a spawn
/// failure.
pub fn resolve_program(config: &Config, search: &ExecutableSearch) -> Result<OsString> {
    if let Some(path) = config.configured_binary() {
        return Ok(OsString::from(path));
    }
    let found = search.find(SOX).ok_or(Error::BinaryNotFound)?;
    tracing::debug!(path = %found.display(), "Found SoX on search path");
    Ok(found.into_os_string())
}
