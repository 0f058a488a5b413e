// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `z3 restore <snapshot> [--dry-run] [--force]` (§6/§4.9).

use anyhow::Result;
use z3_adapters::ZfsRunner;
use z3_engine::{ExecOptions, PairManager};

pub async fn run<Z: ZfsRunner>(
    pair: &PairManager<'_, Z>,
    snapshot: &str,
    force: bool,
    dry_run: bool,
) -> Result<()> {
    let opts = ExecOptions { dry_run, quiet: false };
    let outcomes = pair.restore(snapshot, force, &opts).await?;
    for outcome in &outcomes {
        println!("Restored {}.", outcome.name);
    }
    Ok(())
}
