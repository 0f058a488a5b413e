// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locates and reads the two `z3.conf` files and the process
//! environment, then hands them to `z3_core::Config` for the actual
//! layered lookup.
//!
//! `z3_core::config` is deliberately I/O-free (see its module docs); this
//! is the one place that touches `std::env` and the filesystem, so it's
//! the only thing that needs a fake in tests — `Config::new` itself
//! takes plain values.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use z3_core::{Config, IniDocument};

/// Fallback system-wide conf file, consulted after the package conf.
pub const SYSTEM_CONF_PATH: &str = "/etc/z3_backup/z3.conf";

/// Filename of the package-local conf file, resolved relative to the
/// running executable's directory (the closest Rust analogue to the
/// original tool's `z3.__path__[0]/z3.conf`).
pub const PACKAGE_CONF_FILENAME: &str = "z3.conf";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("could not determine current executable path: {0}")]
    CurrentExe(std::io::Error),
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads `path` into an [`IniDocument`], treating a missing file as
/// empty (neither conf file is required to exist) and any other I/O
/// error as fatal.
fn read_ini(path: &Path) -> Result<IniDocument, ConfigLoadError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(IniDocument::parse(&text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(IniDocument::empty()),
        Err(err) => Err(ConfigLoadError::ReadFile {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// The package conf path: `<dir containing the running executable>/z3.conf`.
fn package_conf_path() -> Result<PathBuf, ConfigLoadError> {
    let exe = std::env::current_exe().map_err(ConfigLoadError::CurrentExe)?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(PACKAGE_CONF_FILENAME))
}

/// Builds the resolved, layered [`Config`]: process environment, then
/// the package conf, then `/etc/z3_backup/z3.conf`. Missing conf files
/// are silently treated as empty layers.
pub fn load_config() -> Result<Config, ConfigLoadError> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let package_conf = read_ini(&package_conf_path()?)?;
    let system_conf = read_ini(Path::new(SYSTEM_CONF_PATH))?;
    Ok(Config::new(env, package_conf, system_conf))
}

#[cfg(test)]
#[path = "config_loader_tests.rs"]
mod tests;
