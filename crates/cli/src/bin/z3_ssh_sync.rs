// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `z3_ssh_sync [--pull] [--dry-run] [--quiet] [--filesystem F]
//! [--remote-filesystem RF] [--snapshot-prefix S] <remote-host>` (C11).

use anyhow::Result;
use clap::Parser;
use z3_adapters::RealZfs;
use z3_cli::CliConfig;

#[derive(Parser)]
#[command(name = "z3_ssh_sync", about = "Sync an incremental ZFS snapshot chain over SSH")]
struct Cli {
    /// Remote host to sync with (passed to `ssh`).
    remote_host: String,

    /// Pull from the remote into the local filesystem instead of pushing.
    #[arg(long)]
    pull: bool,

    #[arg(long)]
    dry_run: bool,

    #[arg(long)]
    quiet: bool,

    /// Overrides the `FILESYSTEM` config key (the local side).
    #[arg(long)]
    filesystem: Option<String>,

    /// The remote-side filesystem; defaults to the same name as the local one.
    #[arg(long)]
    remote_filesystem: Option<String>,

    /// Overrides the `SNAPSHOT_PREFIX` config key.
    #[arg(long)]
    snapshot_prefix: Option<String>,
}

#[tokio::main]
async fn main() {
    z3_cli::logging::init();
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = CliConfig::load(None)?;
    let filesystem = cfg.filesystem(cli.filesystem.as_deref())?;
    let remote_filesystem = cli.remote_filesystem.unwrap_or_else(|| filesystem.clone());
    let snapshot_prefix = cfg.snapshot_prefix(cli.snapshot_prefix.as_deref());

    let zfs = RealZfs;
    let result = z3_engine::plan_and_sync(
        &zfs,
        &filesystem,
        &remote_filesystem,
        &cli.remote_host,
        &snapshot_prefix,
        cli.pull,
        cli.dry_run,
        cli.quiet,
    )
    .await?;

    // `plan_and_sync` already ran (and, under `--dry-run`, printed) the
    // pipeline via the command executor (C10) — nothing left to show
    // here beyond the no-op case.
    match result {
        Some(_) if !cli.dry_run => println!("Synced {remote_filesystem}."),
        Some(_) => {}
        None => println!("Nothing to sync; {remote_filesystem} is already up to date."),
    }
    Ok(())
}
