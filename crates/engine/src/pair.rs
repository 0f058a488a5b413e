// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pair manager (C9): reconciles the local snapshot sequence against
//! the remote graph and drives `backup --full`, `backup --incremental`,
//! and `restore` by handing assembled shell pipelines to the command
//! executor (C10). Nothing here talks to the object store directly —
//! uploads go through the separate `pput` binary, downloads through
//! `z3_get`, both invoked as ordinary child processes.

use std::sync::Arc;

use z3_adapters::zfs::{recv_cmd, send_cmd};
use z3_adapters::{shell, ExecError, ZfsRunner};
use z3_core::compressor::Compressor;
use z3_core::error::Error as CoreError;
use z3_core::graph::RemoteGraph;
use z3_core::local::{LocalSequence, LocalSnapshot};
use z3_core::size_estimate::parse_send_estimate;

use crate::error::PlanError;

/// One snapshot successfully handed off to the uploader, for CLI
/// reporting (`Successfully backed up <name>: <size>.` / parseable mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOutcome {
    pub name: String,
    pub size_bytes: u64,
}

/// One snapshot successfully replayed during restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub name: String,
}

/// Options threaded through every pair-manager operation that ends in a
/// shell pipeline.
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub dry_run: bool,
    pub quiet: bool,
}

pub struct PairManager<'a, Z> {
    remote: &'a RemoteGraph,
    local: &'a LocalSequence,
    zfs: Arc<Z>,
    s3_prefix: String,
    storage_class: String,
    pput_bin: String,
    z3_get_bin: String,
}

impl<'a, Z: ZfsRunner> PairManager<'a, Z> {
    pub fn new(
        remote: &'a RemoteGraph,
        local: &'a LocalSequence,
        zfs: Arc<Z>,
        s3_prefix: impl Into<String>,
        storage_class: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            local,
            zfs,
            s3_prefix: crate::remote::normalize_prefix(&s3_prefix.into()),
            storage_class: storage_class.into(),
            pput_bin: "pput".to_string(),
            z3_get_bin: "z3_get".to_string(),
        }
    }

    /// Overrides the `pput`/`z3_get` binary names (tests point these at
    /// fixtures; production leaves them on `PATH`).
    pub fn with_binaries(mut self, pput_bin: impl Into<String>, z3_get_bin: impl Into<String>) -> Self {
        self.pput_bin = pput_bin.into();
        self.z3_get_bin = z3_get_bin.into();
        self
    }

    /// `(remote?, local?)` pairs: every local snapshot first (with its
    /// remote counterpart if one exists), then every remote snapshot
    /// that has no local counterpart.
    pub fn list(&self) -> Vec<(Option<&z3_core::graph::RemoteSnapshot>, Option<&LocalSnapshot>)> {
        let mut seen = std::collections::HashSet::new();
        let mut pairs = Vec::new();
        for local in self.local.iter() {
            seen.insert(local.name.as_str());
            pairs.push((self.remote.get(&local.name), Some(local)));
        }
        for remote in self.remote.list() {
            if !seen.contains(remote.name.as_str()) {
                pairs.push((Some(remote), None));
            }
        }
        pairs
    }

    fn resolve_target(&self, snap_name: Option<&str>) -> Result<&'a LocalSnapshot, CoreError> {
        match snap_name {
            Some(name) => {
                let short = name.strip_prefix(&format!("{}@", self.local.dataset())).unwrap_or(name);
                self.local.get(short).ok_or_else(|| {
                    CoreError::soft(format!(
                        "no local snapshot named {name} in dataset {}",
                        self.local.dataset()
                    ))
                })
            }
            None => self.local.get_latest(),
        }
    }

    fn is_locally_present(&self, full_name: &str) -> bool {
        full_name
            .strip_prefix(&format!("{}@", self.local.dataset()))
            .map(|short| self.local.get(short).is_some())
            .unwrap_or(false)
    }

    /// Resolves the target local snapshot (latest or named), estimates
    /// its size, and pipes `zfs send` through the optional compressor
    /// into the uploader with `isfull=true` metadata.
    pub async fn backup_full(
        &self,
        snap_name: Option<&str>,
        compressor: Option<Compressor>,
        opts: &ExecOptions,
    ) -> Result<BackupOutcome, PlanError> {
        let target = self.resolve_target(snap_name)?;
        let estimate_output = self
            .zfs
            .send_estimate(&target.name, None)
            .await
            .map_err(plan_exec_err)?;
        let size = parse_send_estimate(&estimate_output)?;

        let mut send = send_cmd(&target.name, None);
        if let Some(c) = compressor {
            send = format!("{send} | {}", c.compress_cmd());
        }
        let mut uploader = format!(
            "{} {} --estimated {size} --metadata isfull=true --metadata size={size} --storage-class {}",
            self.pput_bin, target.name, self.storage_class
        );
        if let Some(c) = compressor {
            uploader.push_str(&format!(" --metadata compressor={}", c.tag()));
        }

        shell::pipe(&send, &uploader, opts.dry_run, Some(size), opts.quiet)
            .await
            .map_err(PlanError::Exec)?;

        Ok(BackupOutcome {
            name: target.name.clone(),
            size_bytes: size,
        })
    }

    /// Resolves the target, walks backward to the nearest snapshot
    /// already present remotely (failing fast on an unhealthy remote
    /// ancestor), then uploads the missing links oldest-first.
    pub async fn backup_incremental(
        &self,
        snap_name: Option<&str>,
        compressor: Option<Compressor>,
        opts: &ExecOptions,
    ) -> Result<Vec<BackupOutcome>, PlanError> {
        let target = self.resolve_target(snap_name)?;

        let mut current = target;
        let mut chain: Vec<&LocalSnapshot> = Vec::new();
        let base_name = loop {
            if self.remote.get(&current.name).is_some() {
                if !self.remote.is_healthy(&current.name) {
                    let reason = self
                        .remote
                        .reason_broken(&current.name)
                        .expect("unhealthy snapshot must carry a reason");
                    return Err(PlanError::Core(CoreError::integrity(
                        current.name.clone(),
                        reason.as_str(),
                    )));
                }
                break current.name.clone();
            }
            chain.push(current);
            match self.local.parent_of(current) {
                Some(parent) => current = parent,
                None => {
                    return Err(PlanError::Core(CoreError::soft(format!(
                        "no full backup found in remote for the chain ending at {}; run `backup --full` first",
                        target.name
                    ))));
                }
            }
        };
        chain.reverse();

        let mut outcomes = Vec::with_capacity(chain.len());
        let mut parent_name = base_name;
        for snap in chain {
            let estimate_output = self
                .zfs
                .send_estimate(&snap.name, Some(&parent_name))
                .await
                .map_err(plan_exec_err)?;
            let size = parse_send_estimate(&estimate_output)?;

            let mut send = send_cmd(&snap.name, Some(&parent_name));
            if let Some(c) = compressor {
                send = format!("{send} | {}", c.compress_cmd());
            }
            let mut uploader = format!(
                "{} {} --estimated {size} --metadata isfull=false --metadata parent={parent_name} --metadata size={size} --storage-class {}",
                self.pput_bin, snap.name, self.storage_class
            );
            if let Some(c) = compressor {
                uploader.push_str(&format!(" --metadata compressor={}", c.tag()));
            }

            shell::pipe(&send, &uploader, opts.dry_run, Some(size), opts.quiet)
                .await
                .map_err(PlanError::Exec)?;

            outcomes.push(BackupOutcome {
                name: snap.name.clone(),
                size_bytes: size,
            });
            parent_name = snap.name.clone();
        }
        Ok(outcomes)
    }

    /// Walks from `snap_name` toward a full snapshot via `parent`,
    /// stopping at the first ancestor already present locally. Replays
    /// the collected chain oldest-first, piping a `z3_get` of each
    /// object through its own `compressor` metadata into `zfs recv`.
    pub async fn restore(
        &self,
        snap_name: &str,
        force: bool,
        opts: &ExecOptions,
    ) -> Result<Vec<RestoreOutcome>, PlanError> {
        let mut current_name = snap_name.to_string();
        let mut chain: Vec<String> = Vec::new();

        loop {
            let remote_snap = self.remote.get(&current_name).ok_or_else(|| {
                PlanError::Core(CoreError::soft(format!(
                    "no remote snapshot named {current_name}"
                )))
            })?;
            if !self.remote.is_healthy(&current_name) {
                let reason = self
                    .remote
                    .reason_broken(&current_name)
                    .expect("unhealthy snapshot must carry a reason");
                return Err(PlanError::Core(CoreError::integrity(
                    current_name.clone(),
                    reason.as_str(),
                )));
            }

            if self.is_locally_present(&current_name) {
                break;
            }

            chain.push(current_name.clone());
            if remote_snap.is_full() {
                break;
            }
            current_name = remote_snap
                .parent_name()
                .expect("healthy incremental snapshot must have a parent")
                .to_string();
        }
        chain.reverse();

        let mut outcomes = Vec::with_capacity(chain.len());
        for name in chain {
            let remote_snap = self.remote.get(&name).expect("walked from the remote graph");
            let compressor = Compressor::from_tag(remote_snap.compressor_tag())
                .map_err(PlanError::Compressor)?;

            let key = format!("{}{}", self.s3_prefix, name);
            let mut get_cmd = format!("{} {key}", self.z3_get_bin);
            if let Some(c) = compressor {
                get_cmd = format!("{get_cmd} | {}", c.decompress_cmd());
            }
            let recv = recv_cmd(&name, force);

            shell::pipe(&get_cmd, &recv, opts.dry_run, remote_snap.declared_size(), opts.quiet)
                .await
                .map_err(PlanError::Exec)?;

            outcomes.push(RestoreOutcome { name });
        }
        Ok(outcomes)
    }
}

fn plan_exec_err(err: ExecError) -> PlanError {
    PlanError::Exec(err)
}

#[cfg(test)]
#[path = "pair_tests.rs"]
mod tests;
