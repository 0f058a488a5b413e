// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `z3 gc [--max-age DAYS] [--dry-run]` (§4.13/C13): lists in-flight
//! multipart uploads and cancels the ones past `max_age` days old.

use anyhow::Result;
use z3_adapters::ObjectStore;
use z3_engine::cleanup_multipart;

use crate::table;

const HEADERS: [&str; 4] = ["KEY", "UPLOAD ID", "AGE (DAYS)", "STATUS"];

pub async fn run<S: ObjectStore>(store: &S, max_age_days: u32, dry_run: bool) -> Result<String> {
    let outcomes = cleanup_multipart(store, max_age_days, dry_run).await?;
    let rows: Vec<Vec<String>> = outcomes
        .iter()
        .map(|o| {
            let age_days = o.age_seconds / (24 * 3600);
            let status = if o.cancelled {
                "cancelled"
            } else if o.expired && dry_run {
                "would cancel"
            } else {
                "kept"
            };
            vec![
                o.key_name.clone(),
                o.upload_id.clone(),
                age_days.to_string(),
                status.to_string(),
            ]
        })
        .collect();
    Ok(table::render(&HEADERS, &rows))
}
