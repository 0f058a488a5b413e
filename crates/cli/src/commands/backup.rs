// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `z3 backup [--full|--incremental] [--snapshot N] [--dry-run]
//! [--compressor ...] [--parseable]` (§6/§4.9).

use anyhow::Result;
use z3_core::humanize_bytes;
use z3_engine::{BackupOutcome, ExecOptions, PairManager};
use z3_adapters::ZfsRunner;

/// Which of the two backup modes to run. Incremental is the default
/// per §6 ("default is incremental").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    Incremental,
}

#[allow(clippy::too_many_arguments)]
pub async fn run<Z: ZfsRunner>(
    pair: &PairManager<'_, Z>,
    mode: Mode,
    snapshot: Option<&str>,
    compressor: Option<&str>,
    dry_run: bool,
    parseable: bool,
) -> Result<()> {
    let compressor = z3_core::Compressor::from_tag(compressor).map_err(anyhow::Error::msg)?;
    let opts = ExecOptions { dry_run, quiet: false };

    let outcomes: Vec<BackupOutcome> = match mode {
        Mode::Full => vec![pair.backup_full(snapshot, compressor, &opts).await?],
        Mode::Incremental => pair.backup_incremental(snapshot, compressor, &opts).await?,
    };

    for outcome in &outcomes {
        if parseable {
            println!("{}\0{}", outcome.name, outcome.size_bytes);
        } else {
            println!(
                "Successfully backed up {}: {}.",
                outcome.name,
                humanize_bytes(outcome.size_bytes)
            );
        }
    }
    Ok(())
}
