// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SSH snapshot-sync glue (C11): resolves the local and remote short
//! snapshot-name sequences via [`ZfsRunner`] and `zfs list` parsing, then
//! hands them to `z3_core::ssh_sync`'s pure planner to build the
//! `zfs send | mbuffer | zfs recv` pipeline, and finally runs it through
//! the command executor.

use z3_adapters::zfs::ZfsRunner;
use z3_adapters::{shell, ExecError};
use z3_core::{sequence_for_dataset, snapshots_to_send, sync_snapshots};

use crate::error::PlanError;

/// Plans and, unless `dry_run`, executes one incremental sync between
/// `local_fs` and `remote_fs`. Returns `None` when the two sides are
/// already level (nothing to transfer).
#[allow(clippy::too_many_arguments)]
pub async fn plan_and_sync<Z: ZfsRunner>(
    zfs: &Z,
    local_fs: &str,
    remote_fs: &str,
    remote_addr: &str,
    snapshot_prefix: &str,
    pull: bool,
    dry_run: bool,
    quiet: bool,
) -> Result<Option<(String, String)>, PlanError> {
    let local_output = zfs.list_snapshots(None).await.map_err(sync_exec_err)?;
    let remote_output = zfs
        .list_snapshots(Some(remote_addr))
        .await
        .map_err(sync_exec_err)?;

    let local_seq = sequence_for_dataset(&local_output, snapshot_prefix, local_fs);
    let remote_seq = sequence_for_dataset(&remote_output, snapshot_prefix, remote_fs);

    let local_shorts: Vec<String> = local_seq.iter().map(|s| s.short_name.clone()).collect();
    let remote_shorts: Vec<String> = remote_seq.iter().map(|s| s.short_name.clone()).collect();

    let (source_shorts, dest_shorts) = if pull {
        (&remote_shorts, &local_shorts)
    } else {
        (&local_shorts, &remote_shorts)
    };

    let pair = snapshots_to_send(source_shorts, dest_shorts)?;
    let Some((send_cmd, recv_cmd)) =
        sync_snapshots(pair, local_fs, remote_fs, remote_addr, pull, dry_run)
    else {
        return Ok(None);
    };

    shell::pipe(&send_cmd, &recv_cmd, dry_run, None, quiet)
        .await
        .map_err(PlanError::Exec)?;

    Ok(Some((send_cmd, recv_cmd)))
}

fn sync_exec_err(err: ExecError) -> PlanError {
    PlanError::Exec(err)
}

#[cfg(test)]
#[path = "ssh_sync_glue_tests.rs"]
mod tests;
