// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Peer snapshot-sync planner (C11).
//!
//! Pure string/slice arithmetic: given two ordered short-name sequences
//! (source, destination) it picks the incremental range to transmit and
//! assembles the `zfs send | mbuffer | zfs recv` shell pipeline for
//! either a push or a pull. Nothing here shells out — `z3-engine`'s
//! `ssh_sync` glue resolves the sequences (via `zfs list`, locally or
//! over ssh) and hands them to these functions.

use crate::error::Error;

/// `mbuffer` buffer sizing used on every sync, matching the original tool.
const MBUFFER_STAGE: &str = "mbuffer -s 128k -m 200m -q";

/// Picks the `(from, to)` range to send, in short-snapshot-name terms.
///
/// - Empty `source` is a hard configuration error (nothing to sync).
/// - Empty `dest` means the peer has nothing yet: send everything, i.e.
///   `(None, source.last())`.
/// - Otherwise scans `source` newest-to-oldest for `dest`'s latest
///   snapshot; if found, that's `from` and `source.last()` is `to`. If
///   `dest`'s latest isn't present in `source` at all, the two sides
///   have diverged and there's no safe incremental range.
pub fn snapshots_to_send<'a>(
    source: &'a [String],
    dest: &'a [String],
) -> Result<(Option<&'a str>, &'a str), Error> {
    let Some(latest_source) = source.last() else {
        return Err(Error::soft("No snapshots exist locally!"));
    };
    let Some(latest_dest) = dest.last() else {
        return Ok((None, latest_source.as_str()));
    };
    if source.iter().rev().any(|s| s == latest_dest) {
        return Ok((Some(latest_dest.as_str()), latest_source.as_str()));
    }
    Err(Error::soft(
        "Latest snapshot on destination doesn't exist on source!",
    ))
}

/// The `zfs send`/`zfs recv` command pair for one sync, before any ssh
/// or mbuffer wrapping is applied. `None` if `from == to` (nothing to do).
fn prepare_commands(from: Option<&str>, to: &str, target_fs: &str, dry_run: bool) -> Option<(String, String)> {
    if from == Some(to) {
        return None;
    }
    let send_cmd = match from {
        Some(from) => format!("zfs send -I {from} {to}"),
        None => format!("zfs send {to}"),
    };
    let dry_flag = if dry_run { "nv" } else { "" };
    let recv_cmd = format!("zfs recv -d{dry_flag} {target_fs}");
    Some((send_cmd, recv_cmd))
}

/// Assembles the full push/pull pipeline for `pair = (from, to)`, short
/// snapshot names already resolved to `source_fs@name` full names by the
/// caller... no — see below: this function does the `fs@name`
/// qualification itself, matching the original tool's `sync_snapshots`.
///
/// `pair` holds short names (no dataset prefix). Returns `None` when
/// `from == to` (nothing to transfer). Otherwise returns `(send_cmd,
/// recv_cmd)`, with the ssh/mbuffer wrapping applied to whichever side
/// is remote: when `pull` is false (push), the receive side runs over
/// ssh; when `pull` is true, the send side runs over ssh and the
/// receive side gets the local `mbuffer` stage.
pub fn sync_snapshots(
    pair: (Option<&str>, &str),
    local_fs: &str,
    remote_fs: &str,
    remote_addr: &str,
    pull: bool,
    dry_run: bool,
) -> Option<(String, String)> {
    let (from, to) = pair;
    let target_fs = if pull { local_fs } else { remote_fs };
    let source_fs = if pull { remote_fs } else { local_fs };

    let from_full = from.map(|s| format!("{source_fs}@{s}"));
    let to_full = format!("{source_fs}@{to}");

    let (send_cmd, recv_cmd) =
        prepare_commands(from_full.as_deref(), &to_full, target_fs, dry_run)?;

    if pull {
        let send_cmd = format!("ssh {remote_addr} -C 'sudo {send_cmd}'");
        let recv_cmd = format!("{MBUFFER_STAGE} | {recv_cmd}");
        Some((send_cmd, recv_cmd))
    } else {
        let recv_cmd = format!("ssh {remote_addr} -C '{MBUFFER_STAGE} | sudo {recv_cmd}'");
        Some((send_cmd, recv_cmd))
    }
}

#[cfg(test)]
#[path = "ssh_sync_tests.rs"]
mod tests;
