// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pput <name>` — the standalone parallel chunked streaming uploader
//! (C1–C6), invoked as the right-hand side of a `zfs send | pput`
//! pipeline by `z3 backup`, or directly.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::AsyncRead;
use z3_adapters::PutObjectHeaders;
use z3_cli::{resolve_client, CliConfig};
use z3_core::chunk::DEFAULT_CHUNK_SIZE;
use z3_core::{chunk_size_for_estimate, parse_size};
use z3_engine::UploadSupervisor;

#[derive(Parser)]
#[command(name = "pput", about = "Stream stdin to the object store as a multi-part upload")]
struct Cli {
    /// Object key, relative to the configured `S3_PREFIX`.
    name: String,

    /// Fixed part size (`10M`, `1G`, ...). Mutually exclusive with `--estimated`.
    #[arg(short = 's', long = "chunk-size", conflicts_with = "estimated")]
    chunk_size: Option<String>,

    /// Estimated total upload size; the part size is derived from it
    /// so the part count stays under the multi-part ceiling (§4.9).
    #[arg(long, conflicts_with = "chunk_size")]
    estimated: Option<u64>,

    /// Read from this file descriptor instead of stdin.
    #[arg(long)]
    file_descriptor: Option<u32>,

    /// Worker pool size; defaults to the `CONCURRENCY` config key.
    #[arg(long)]
    concurrency: Option<u32>,

    /// Repeatable `key=value` pair, stored as `x-amz-meta-<key>`.
    #[arg(long = "metadata", value_name = "KEY=VALUE")]
    metadata: Vec<String>,

    /// S3 storage class; defaults to the `S3_STORAGE_CLASS` config key.
    #[arg(long)]
    storage_class: Option<String>,

    /// Log per-part progress at info level.
    #[arg(long)]
    progress: bool,

    /// Suppress progress logging even if `--progress` is also given.
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.quiet {
        z3_cli::logging::init_with_default("error");
    } else if cli.progress {
        z3_cli::logging::init_with_default("info");
    } else {
        z3_cli::logging::init();
    }

    let user_metadata = parse_metadata(&cli.metadata)?;

    let cfg = CliConfig::load(None).context("failed to load z3 configuration")?;
    let bucket = z3_cli::resolve_bucket(&cfg, None)?;
    let store = resolve_client(&cfg, bucket).await?;

    let s3_prefix = cfg.s3_prefix(None);
    let key_name = format!("{s3_prefix}{}", cli.name);

    let concurrency = cfg.concurrency(cli.concurrency)?;
    let max_retries = cfg.max_retries()?;
    let storage_class = cfg.storage_class(cli.storage_class.as_deref());

    let chunk_size = match (&cli.chunk_size, cli.estimated) {
        (Some(s), None) => parse_size(s).map_err(anyhow::Error::msg)? as usize,
        (None, Some(estimated)) => chunk_size_for_estimate(estimated),
        (None, None) => DEFAULT_CHUNK_SIZE,
        (Some(_), Some(_)) => unreachable!("clap enforces --chunk-size/--estimated mutual exclusion"),
    };

    let headers = PutObjectHeaders {
        storage_class,
        user_metadata,
    };

    let input = open_input(cli.file_descriptor).await?;
    let mut supervisor = UploadSupervisor::new(Arc::new(store), key_name, headers, concurrency, max_retries, chunk_size);

    match supervisor.run(input).await {
        Ok(etag) => {
            println!("{}", serde_json::json!({"status": "success", "etag": etag}));
            Ok(())
        }
        Err(err) => {
            bail!("{err}");
        }
    }
}

/// `key=value` metadata entries. A malformed entry (no `=`, or an empty
/// key) is a fatal error — §6 requires writing to stderr and exiting 1.
fn parse_metadata(entries: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::with_capacity(entries.len());
    for entry in entries {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("malformed --metadata entry (expected key=value): {entry}");
        };
        if key.is_empty() {
            bail!("malformed --metadata entry (empty key): {entry}");
        }
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

/// Stdin, or `/proc/self/fd/<N>` when `--file-descriptor` is given — a
/// safe way to read an arbitrary already-open descriptor without
/// resorting to `unsafe` `FromRawFd` (forbidden workspace-wide).
async fn open_input(fd: Option<u32>) -> Result<Box<dyn AsyncRead + Unpin + Send>> {
    match fd {
        None => Ok(Box::new(tokio::io::stdin())),
        Some(fd) => {
            let path = format!("/proc/self/fd/{fd}");
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("failed to open file descriptor {fd} via {path}"))?;
            Ok(Box::new(file))
        }
    }
}
