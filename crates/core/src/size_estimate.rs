// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parses the size estimate out of `zfs send -nvP` output.
//!
//! Deliberately permissive, matching the original: take the last
//! non-empty line, split on whitespace, and read the second field as a
//! decimal byte count. Flagged in SPEC_FULL §9 as fragile — any
//! localisation of `zfs send` output breaks it silently — but changing
//! that parsing strategy is out of scope; this only codifies the
//! existing contract.

use crate::error::Error;

/// Parses the trailing `size <N>` line `zfs send -nvP` prints.
pub fn parse_send_estimate(output: &str) -> Result<u64, Error> {
    let last_line = output
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| Error::SizeEstimateParse("empty zfs send -nvP output".to_string()))?;

    let mut fields = last_line.split_whitespace();
    let _first = fields
        .next()
        .ok_or_else(|| Error::SizeEstimateParse(last_line.to_string()))?;
    let size_field = fields
        .next()
        .ok_or_else(|| Error::SizeEstimateParse(last_line.to_string()))?;

    size_field
        .parse::<u64>()
        .map_err(|_| Error::SizeEstimateParse(last_line.to_string()))
}

#[cfg(test)]
#[path = "size_estimate_tests.rs"]
mod tests;
