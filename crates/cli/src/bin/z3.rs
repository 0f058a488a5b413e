// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `z3` — the top-level backup/restore/status/gc CLI (§6).

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use z3_adapters::{RealZfs, ZfsRunner};
use z3_cli::commands::{backup, gc, restore, status};
use z3_cli::{resolve_bucket, resolve_client, CliConfig};
use z3_engine::{build_remote_graph, PairManager};

#[derive(Parser)]
#[command(name = "z3", version, about = "ZFS-to-object-store snapshot backup and restore")]
struct Cli {
    /// Overrides the `S3_PREFIX` config key.
    #[arg(long, global = true)]
    s3_prefix: Option<String>,

    /// Overrides the `FILESYSTEM` config key.
    #[arg(long, global = true)]
    filesystem: Option<String>,

    /// Overrides the `SNAPSHOT_PREFIX` config key.
    #[arg(long, global = true)]
    snapshot_prefix: Option<String>,

    /// Overrides the `BUCKET` config key.
    #[arg(long, global = true)]
    bucket: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every local/remote snapshot pair and its health.
    Status,
    /// Upload the next snapshot(s) to the object store.
    Backup {
        #[arg(long, conflicts_with = "incremental")]
        full: bool,
        #[arg(long)]
        incremental: bool,
        #[arg(long)]
        snapshot: Option<String>,
        #[arg(long)]
        dry_run: bool,
        #[arg(long, value_parser = ["none", "pigz1", "pigz4"])]
        compressor: Option<String>,
        #[arg(long)]
        parseable: bool,
    },
    /// Replay a remote snapshot chain down to the local dataset.
    Restore {
        snapshot: String,
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        force: bool,
    },
    /// Cancel stale in-flight multipart uploads.
    Gc {
        #[arg(long, default_value_t = 7)]
        max_age: u32,
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    z3_cli::logging::init();
    let cli = Cli::parse();
    let is_status = matches!(cli.command, Commands::Status);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        let code = if is_soft_error(&err) && is_status { 0 } else { 1 };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let base = CliConfig::load(None)?;
    let filesystem = base.filesystem(cli.filesystem.as_deref())?;
    let cfg = CliConfig {
        config: base.config,
        section: Some(format!("fs:{filesystem}")),
    };

    let bucket = resolve_bucket(&cfg, cli.bucket.as_deref())?;
    let store = resolve_client(&cfg, bucket).await?;
    let zfs = Arc::new(RealZfs);

    let s3_prefix = cfg.s3_prefix(cli.s3_prefix.as_deref());
    let snapshot_prefix = cfg.snapshot_prefix(cli.snapshot_prefix.as_deref());

    match cli.command {
        Commands::Status => {
            let rendered = status::run(&store, zfs.as_ref(), &s3_prefix, &filesystem, &snapshot_prefix).await?;
            print!("{rendered}");
        }
        Commands::Backup {
            full,
            incremental: _,
            snapshot,
            dry_run,
            compressor,
            parseable,
        } => {
            let remote = build_remote_graph(&store, &s3_prefix).await?;
            let local_output = zfs.list_snapshots(None).await?;
            let local = z3_core::sequence_for_dataset(&local_output, &snapshot_prefix, &filesystem);
            let storage_class = cfg.storage_class(None);
            let pair = PairManager::new(&remote, &local, Arc::clone(&zfs), &s3_prefix, &storage_class);

            let mode = if full { backup::Mode::Full } else { backup::Mode::Incremental };
            let compressor = compressor.or_else(|| cfg.compressor(None));
            backup::run(&pair, mode, snapshot.as_deref(), compressor.as_deref(), dry_run, parseable).await?;
        }
        Commands::Restore { snapshot, dry_run, force } => {
            let remote = build_remote_graph(&store, &s3_prefix).await?;
            let local_output = zfs.list_snapshots(None).await?;
            let local = z3_core::sequence_for_dataset(&local_output, &snapshot_prefix, &filesystem);
            let storage_class = cfg.storage_class(None);
            let pair = PairManager::new(&remote, &local, Arc::clone(&zfs), &s3_prefix, &storage_class);

            restore::run(&pair, &snapshot, force, dry_run).await?;
        }
        Commands::Gc { max_age, dry_run } => {
            let rendered = gc::run(&store, max_age, dry_run).await?;
            print!("{rendered}");
        }
    }
    Ok(())
}

/// True if any error in the chain is a [`z3_core::Error::SoftError`]
/// (§7: "Top-level handler prints the message to stderr; `status`-style
/// commands still exit 0, others exit non-zero").
fn is_soft_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<z3_core::Error>()
            .is_some_and(|e| matches!(e, z3_core::Error::SoftError(_)))
    })
}
