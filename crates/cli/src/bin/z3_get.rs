// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `z3_get <name>` — one-shot download of a single object's body to
//! stdout (§1/§6: "a one-shot object download to stdout", specified
//! only by its contract; not part of the `ObjectStore` trait the core
//! depends on).

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncWriteExt, BufWriter};
use z3_cli::CliConfig;

#[derive(Parser)]
#[command(name = "z3_get", about = "Download one object's body to stdout")]
struct Cli {
    /// Object key, relative to the configured `S3_PREFIX`.
    name: String,
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
    let cfg = CliConfig::load(None).context("failed to load z3 configuration")?;
    let bucket = z3_cli::resolve_bucket(&cfg, None)?;
    let client = z3_cli::build_aws_client(&cfg).await;

    let s3_prefix = cfg.s3_prefix(None);
    let key = format!("{s3_prefix}{}", cli.name);

    let output = client
        .get_object()
        .bucket(&bucket)
        .key(&key)
        .send()
        .await
        .map_err(|err| anyhow::anyhow!("failed to get {key}: {err}"))?;

    let mut body = output.body.into_async_read();
    let mut stdout = BufWriter::new(tokio::io::stdout());
    let copied = tokio::io::copy(&mut body, &mut stdout).await.context("failed to stream object body to stdout")?;
    stdout.flush().await.context("failed to flush stdout")?;

    if copied == 0 && output.content_length().unwrap_or(0) > 0 {
        bail!("short read for {key}");
    }
    Ok(())
}
