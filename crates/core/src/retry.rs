// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry wrapper: re-invoke a fallible async operation up to `N` times.
//!
//! Ported from the original `retry` decorator in `pput.py`. Every error
//! except the last is logged and swallowed; the final failure
//! propagates unchanged. There is no backoff — the original has none
//! and nothing in the spec asks for it.

use std::fmt::Display;

/// Runs `op` up to `max_attempts` times (attempts `1..=max_attempts`).
///
/// A `max_attempts` of 3 means three calls total on persistent failure,
/// never four — the original Python loops `for attempt in range(times)`
/// and re-raises once `attempt + 1 >= times`.
pub async fn retry<F, Fut, T, E>(max_attempts: u32, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    assert!(max_attempts > 0, "max_attempts must be at least 1");
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => return Err(err),
            Err(err) => {
                tracing::warn!(attempt, max_attempts, error = %err, "retrying after failure");
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
