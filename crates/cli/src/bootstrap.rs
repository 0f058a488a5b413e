// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared startup sequence for all four binaries: load the layered
//! config (§4.12), resolve the bucket/endpoint, and build the
//! `aws-sdk-s3`-backed `ObjectStore`.

use anyhow::{Context, Result};
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use z3_adapters::{load_config, S3ObjectStore};
use z3_core::Config;

/// Resolved values every subcommand needs, read once at startup.
pub struct CliConfig {
    pub config: Config,
    pub section: Option<String>,
}

impl CliConfig {
    pub fn load(section: Option<String>) -> Result<Self> {
        let config = load_config().context("failed to load z3 configuration")?;
        Ok(Self { config, section })
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn s3_prefix(&self, override_value: Option<&str>) -> String {
        override_value
            .map(str::to_string)
            .unwrap_or_else(|| self.config.s3_prefix(self.section()))
    }

    /// Resolves `--filesystem` over the `FILESYSTEM` config key. Missing
    /// configuration is a [`z3_core::Error::SoftError`], not a plain
    /// anyhow context string, so the top-level handler's "SoftError on
    /// `status` exits 0" rule (§7) still applies to it.
    pub fn filesystem(&self, override_value: Option<&str>) -> Result<String, z3_core::Error> {
        if let Some(v) = override_value {
            return Ok(v.to_string());
        }
        self.config.filesystem(self.section()).ok_or_else(|| {
            z3_core::Error::soft("no FILESYSTEM configured (set --filesystem or the FILESYSTEM config key)")
        })
    }

    pub fn snapshot_prefix(&self, override_value: Option<&str>) -> String {
        override_value
            .map(str::to_string)
            .unwrap_or_else(|| self.config.snapshot_prefix(self.section()))
    }

    pub fn storage_class(&self, override_value: Option<&str>) -> String {
        override_value
            .map(str::to_string)
            .unwrap_or_else(|| self.config.s3_storage_class(self.section()))
    }

    pub fn concurrency(&self, override_value: Option<u32>) -> Result<u32> {
        match override_value {
            Some(v) => Ok(v),
            None => self.config.concurrency(self.section()).context("invalid CONCURRENCY config value"),
        }
    }

    pub fn max_retries(&self) -> Result<u32> {
        self.config.max_retries(self.section()).context("invalid MAX_RETRIES config value")
    }

    pub fn compressor(&self, override_value: Option<&str>) -> Option<String> {
        override_value
            .map(str::to_string)
            .or_else(|| self.config.compressor(self.section()))
    }
}

/// The bucket this process should talk to: `--bucket` if given, else
/// `BUCKET`. Same SoftError treatment as [`CliConfig::filesystem`].
pub fn resolve_bucket(cli: &CliConfig, override_value: Option<&str>) -> Result<String, z3_core::Error> {
    if let Some(v) = override_value {
        return Ok(v.to_string());
    }
    cli.config
        .bucket(cli.section())
        .ok_or_else(|| z3_core::Error::soft("no BUCKET configured (set --bucket or the BUCKET config key)"))
}

/// Builds the raw `aws-sdk-s3` client from resolved config: static
/// credentials when `S3_KEY_ID`/`S3_SECRET` are set (matching an
/// S3-compatible store that doesn't do IMDS/SSO), an optional endpoint
/// override (`HOST`, for non-AWS object stores), and the default AWS
/// region/credential chain otherwise. Shared by `resolve_client` (for
/// the three binaries that go through [`ObjectStore`](z3_adapters::ObjectStore))
/// and `z3_get`, which needs the raw client to stream a `GetObject` body.
pub async fn build_aws_client(cli: &CliConfig) -> aws_sdk_s3::Client {
    let mut builder = aws_config::defaults(BehaviorVersion::latest());

    if let (Some(key_id), Some(secret)) = (
        cli.config.s3_key_id(cli.section()),
        cli.config.s3_secret(cli.section()),
    ) {
        builder = builder.credentials_provider(Credentials::new(key_id, secret, None, None, "z3-conf"));
    }
    if cli.config.s3_key_id(cli.section()).is_none() {
        // No explicit key pair: fall back to a placeholder region so
        // the default provider chain (env/profile/IMDS) still resolves
        // a usable client without requiring AWS_REGION for S3-compatible
        // endpoints that ignore region entirely.
        builder = builder.region(Region::new("us-east-1"));
    }

    let shared_config = builder.load().await;
    let mut s3_builder = aws_sdk_s3::config::Builder::from(&shared_config);
    if let Some(host) = cli.config.host(cli.section()) {
        s3_builder = s3_builder.endpoint_url(host).force_path_style(true);
    }
    aws_sdk_s3::Client::from_conf(s3_builder.build())
}

/// Builds the `aws-sdk-s3`-backed [`S3ObjectStore`] the core engine
/// depends on, via [`build_aws_client`].
pub async fn resolve_client(cli: &CliConfig, bucket: String) -> Result<S3ObjectStore> {
    let client = build_aws_client(cli).await;
    Ok(S3ObjectStore::new(client, bucket))
}
