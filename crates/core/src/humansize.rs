// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable byte-size formatting for `z3 status` and backup summaries.

/// Formats `bytes` as `M`/`G`/`T` with up to 2 decimal places, trailing
/// zeros (and a trailing `.`) trimmed. Sizes below 1 MiB are shown in
/// whole bytes with a `B` suffix; this tool only ever deals in
/// snapshot-scale sizes, so anything smaller is almost certainly a
/// zero-byte or near-empty incremental.
pub fn humanize_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;
    const TIB: f64 = GIB * 1024.0;

    let b = bytes as f64;
    let (value, suffix) = if b >= TIB {
        (b / TIB, "T")
    } else if b >= GIB {
        (b / GIB, "G")
    } else if b >= MIB {
        (b / MIB, "M")
    } else {
        return format!("{bytes}B");
    };

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{suffix}")
}

/// Parses a byte-size string such as `10M`, `1G`, `512` (bytes, no
/// suffix) used by `pput -s/--chunk-size` and the `CHUNK_SIZE` config
/// key. Suffixes are binary (`K`/`M`/`G`/`T` = 1024^n), case-insensitive,
/// and optional; a bare number is taken as bytes.
pub fn parse_size(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty size string".to_string());
    }
    let (digits, multiplier) = match trimmed.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => {
            let multiplier = match c.to_ascii_uppercase() {
                'K' => 1024u64,
                'M' => 1024 * 1024,
                'G' => 1024 * 1024 * 1024,
                'T' => 1024 * 1024 * 1024 * 1024,
                other => return Err(format!("unrecognised size suffix: {other}")),
            };
            (&trimmed[..trimmed.len() - 1], multiplier)
        }
        _ => (trimmed, 1),
    };
    let value: u64 = digits
        .trim()
        .parse()
        .map_err(|_| format!("invalid size: {input}"))?;
    Ok(value * multiplier)
}

#[cfg(test)]
#[path = "humansize_tests.rs"]
mod tests;
