// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`ZfsRunner`] used by `z3-engine::pair`'s test suite, so
//! the size-estimation walk can be exercised without a real `zfs`
//! binary (scenarios S5/S6/S7).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::shell::ExecError;
use crate::zfs::ZfsRunner;

/// Maps a `zfs send -nvP [-i from] to` invocation to the canned output
/// line `parse_send_estimate` would read out of it.
#[derive(Debug, Default)]
pub struct FakeZfs {
    estimates: Mutex<HashMap<(String, Option<String>), String>>,
    /// Canned `zfs list -Ht snap ...` output, keyed by `remote_addr`
    /// (`None` for the local listing).
    listings: Mutex<HashMap<Option<String>, String>>,
}

impl FakeZfs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the `zfs send -nvP` output for `(from, to)`. `from =
    /// None` matches a full-send estimate request.
    pub fn set_estimate(&self, from: Option<&str>, to: &str, size_bytes: u64) {
        self.estimates.lock().unwrap_or_else(|e| e.into_inner()).insert(
            (to.to_string(), from.map(str::to_string)),
            format!("incremental\t{from}\t{to}\t{size_bytes}\nsize\t{size_bytes}", from = from.unwrap_or(""), to = to),
        );
    }

    /// Registers the raw `zfs list` output returned for `remote_addr`
    /// (`None` for the local listing).
    pub fn set_listing(&self, remote_addr: Option<&str>, output: impl Into<String>) {
        self.listings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(remote_addr.map(str::to_string), output.into());
    }
}

#[async_trait]
impl ZfsRunner for FakeZfs {
    async fn list_snapshots(&self, remote_addr: Option<&str>) -> Result<String, ExecError> {
        let key = remote_addr.map(str::to_string);
        Ok(self
            .listings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_estimate(
        &self,
        snapshot: &str,
        from_snapshot: Option<&str>,
    ) -> Result<String, ExecError> {
        let key = (snapshot.to_string(), from_snapshot.map(str::to_string));
        Ok(self
            .estimates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned()
            .unwrap_or_else(|| "size\t0".to_string()))
    }
}

#[cfg(test)]
#[path = "fake_zfs_tests.rs"]
mod tests;
