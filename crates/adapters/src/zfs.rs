// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin wrapper around the `zfs` CLI: lists snapshots (locally or over
//! ssh) and estimates the size of a `zfs send` stream. Parsing of the
//! captured output lives in `z3-core` (`local::parse_zfs_list`,
//! `size_estimate::parse_send_estimate`) — this module only owns
//! shelling out and handing the raw text across that boundary.
//!
//! The size-estimation and listing calls are also exposed behind the
//! [`ZfsRunner`] trait so `z3-engine::pair` can be driven by a fake in
//! tests, the same way `z3-engine`'s upload pipeline is driven against
//! the `ObjectStore` trait rather than `aws-sdk-s3` directly.

use async_trait::async_trait;

use crate::shell::{self, ExecError};

/// What the pair manager needs from `zfs`: size estimation and listing.
/// `send_cmd`/`recv_cmd` are pure string formatting (see below) and
/// don't need to go through the trait.
#[async_trait]
pub trait ZfsRunner: Send + Sync {
    async fn list_snapshots(&self, remote_addr: Option<&str>) -> Result<String, ExecError>;

    async fn send_estimate(
        &self,
        snapshot: &str,
        from_snapshot: Option<&str>,
    ) -> Result<String, ExecError>;
}

/// The real [`ZfsRunner`], shelling out to the actual `zfs`/`ssh` binaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealZfs;

#[async_trait]
impl ZfsRunner for RealZfs {
    async fn list_snapshots(&self, remote_addr: Option<&str>) -> Result<String, ExecError> {
        list_snapshots(remote_addr).await
    }

    async fn send_estimate(
        &self,
        snapshot: &str,
        from_snapshot: Option<&str>,
    ) -> Result<String, ExecError> {
        send_estimate(snapshot, from_snapshot).await
    }
}

/// Runs `zfs list -Ht snap -o name,used,refer,mountpoint,written`,
/// either locally or, when `remote_addr` is set, over ssh (matching the
/// original tool's `RemoteZFSSnapshotManager`).
pub async fn list_snapshots(remote_addr: Option<&str>) -> Result<String, ExecError> {
    let base = "zfs list -Ht snap -o name,used,refer,mountpoint,written";
    let cmd = match remote_addr {
        Some(addr) => format!("ssh {addr} -C 'sudo {base}'"),
        None => base.to_string(),
    };
    let output = shell::shell(&cmd, false, true).await?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs `zfs send -nvP` for `snapshot` (optionally incremental from
/// `from_snapshot`) to capture the size-estimate line that
/// `z3_core::size_estimate::parse_send_estimate` reads.
pub async fn send_estimate(
    snapshot: &str,
    from_snapshot: Option<&str>,
) -> Result<String, ExecError> {
    let cmd = match from_snapshot {
        Some(from) => format!("zfs send -nvP -i {from} {snapshot}"),
        None => format!("zfs send -nvP {snapshot}"),
    };
    let output = shell::shell(&cmd, false, true).await?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// The `zfs send` fragment used to stream a snapshot (full or
/// incremental). Does not include any compressor/uploader stage — the
/// caller (`z3-engine::pair`) assembles the full pipeline.
pub fn send_cmd(snapshot: &str, from_snapshot: Option<&str>) -> String {
    match from_snapshot {
        Some(from) => format!("zfs send -i {from} {snapshot}"),
        None => format!("zfs send {snapshot}"),
    }
}

/// The `zfs recv` fragment used by restore. `force` maps to `-F`
/// (rollback the target to receive a snapshot that diverged).
pub fn recv_cmd(snapshot: &str, force: bool) -> String {
    if force {
        format!("zfs recv -F {snapshot}")
    } else {
        format!("zfs recv {snapshot}")
    }
}

#[cfg(test)]
#[path = "zfs_tests.rs"]
mod tests;
