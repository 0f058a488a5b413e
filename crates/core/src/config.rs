// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration lookup.
//!
//! Three layers, first match wins: the process environment, the
//! `[main]` section of an INI file at `<package>/z3.conf`, then
//! `/etc/z3_backup/z3.conf`. A section name (e.g. `fs:tank/data`) may
//! be supplied at lookup time, in which case that section in a given
//! file is consulted before that file's `[main]` section.
//!
//! This module is pure: it has no idea where the INI text came from or
//! how the environment was captured. Locating `z3.conf`, reading it,
//! and snapshotting `std::env::vars()` are the CLI's job.

use std::collections::HashMap;

use crate::error::Error;

/// A parsed INI document: section name (`None` for keys preceding any
/// `[header]`, treated the same as `[main]`) to key/value map.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses INI text. `;` and `#` start a whole-line comment; blank
    /// lines are ignored; `key = value` and `key=value` are both
    /// accepted with surrounding whitespace trimmed. Malformed lines
    /// (no `=`) are skipped rather than treated as fatal — a hand-edited
    /// conf file with a stray comment-like line shouldn't crash the CLI.
    pub fn parse(text: &str) -> Self {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current = "main".to_string();
        sections.entry(current.clone()).or_default();

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(stripped) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                current = stripped.trim().to_string();
                sections.entry(current.clone()).or_default();
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            sections
                .entry(current.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }

        Self { sections }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section)?.get(key).cloned()
    }

    pub fn get_main(&self, key: &str) -> Option<String> {
        self.get("main", key)
    }
}

/// Default `S3_PREFIX` when unset.
pub const DEFAULT_S3_PREFIX: &str = "z3-backup/";
/// Default `SNAPSHOT_PREFIX` when unset.
pub const DEFAULT_SNAPSHOT_PREFIX: &str = "zfs-auto-snap:daily";
/// Default `S3_STORAGE_CLASS` when unset.
pub const DEFAULT_STORAGE_CLASS: &str = "STANDARD_IA";
/// Default worker-pool concurrency when unset.
pub const DEFAULT_CONCURRENCY: u32 = 4;
/// Default retry budget when unset.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Resolved configuration: an environment snapshot plus the two
/// candidate conf files, merged per the layering rule above.
///
/// Built once by the CLI entrypoint and threaded explicitly into every
/// subsystem that needs a value from it — nothing downstream reads
/// `std::env` or the filesystem directly (see DESIGN.md: "process-wide
/// config is a singleton only as a convenience").
#[derive(Debug, Clone)]
pub struct Config {
    env: HashMap<String, String>,
    package_conf: IniDocument,
    system_conf: IniDocument,
}

impl Config {
    pub fn new(env: HashMap<String, String>, package_conf: IniDocument, system_conf: IniDocument) -> Self {
        Self {
            env,
            package_conf,
            system_conf,
        }
    }

    /// Looks up `key`, optionally scoped to `section` (e.g. `fs:tank/data`).
    pub fn get(&self, key: &str, section: Option<&str>) -> Option<String> {
        if let Some(v) = self.env.get(key) {
            return Some(v.clone());
        }
        if let Some(section) = section {
            if let Some(v) = self.package_conf.get(section, key) {
                return Some(v);
            }
        }
        if let Some(v) = self.package_conf.get_main(key) {
            return Some(v);
        }
        if let Some(section) = section {
            if let Some(v) = self.system_conf.get(section, key) {
                return Some(v);
            }
        }
        self.system_conf.get_main(key)
    }

    fn get_u32(&self, key: &str, section: Option<&str>, default: u32) -> Result<u32, Error> {
        match self.get(key, section) {
            None => Ok(default),
            Some(v) => v
                .parse()
                .map_err(|_| Error::InvalidConfigValue { key: key.to_string(), value: v }),
        }
    }

    pub fn s3_key_id(&self, section: Option<&str>) -> Option<String> {
        self.get("S3_KEY_ID", section)
    }

    pub fn s3_secret(&self, section: Option<&str>) -> Option<String> {
        self.get("S3_SECRET", section)
    }

    pub fn bucket(&self, section: Option<&str>) -> Option<String> {
        self.get("BUCKET", section)
    }

    /// Optional S3-compatible endpoint override; `None` means "use AWS".
    pub fn host(&self, section: Option<&str>) -> Option<String> {
        self.get("HOST", section)
    }

    pub fn s3_prefix(&self, section: Option<&str>) -> String {
        self.get("S3_PREFIX", section)
            .unwrap_or_else(|| DEFAULT_S3_PREFIX.to_string())
    }

    pub fn filesystem(&self, section: Option<&str>) -> Option<String> {
        self.get("FILESYSTEM", section)
    }

    pub fn snapshot_prefix(&self, section: Option<&str>) -> String {
        self.get("SNAPSHOT_PREFIX", section)
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_PREFIX.to_string())
    }

    /// `CHUNK_SIZE` accepts the same `10M`/`1G` suffixes as `pput -s`.
    pub fn chunk_size(&self, section: Option<&str>) -> Result<Option<u64>, Error> {
        match self.get("CHUNK_SIZE", section) {
            None => Ok(None),
            Some(v) => crate::humansize::parse_size(&v).map(Some).map_err(|_| {
                Error::InvalidConfigValue {
                    key: "CHUNK_SIZE".to_string(),
                    value: v,
                }
            }),
        }
    }

    pub fn concurrency(&self, section: Option<&str>) -> Result<u32, Error> {
        self.get_u32("CONCURRENCY", section, DEFAULT_CONCURRENCY)
    }

    pub fn max_retries(&self, section: Option<&str>) -> Result<u32, Error> {
        self.get_u32("MAX_RETRIES", section, DEFAULT_MAX_RETRIES)
    }

    pub fn s3_storage_class(&self, section: Option<&str>) -> String {
        self.get("S3_STORAGE_CLASS", section)
            .unwrap_or_else(|| DEFAULT_STORAGE_CLASS.to_string())
    }

    pub fn compressor(&self, section: Option<&str>) -> Option<String> {
        self.get("COMPRESSOR", section)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
