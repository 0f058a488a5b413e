// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn bytes_below_a_mebibyte_are_shown_raw() {
    assert_eq!(humanize_bytes(512), "512B");
    assert_eq!(humanize_bytes(0), "0B");
}

#[test]
fn exact_mebibyte_trims_trailing_zeros() {
    assert_eq!(humanize_bytes(1024 * 1024), "1M");
}

#[test]
fn two_decimal_precision_with_trimming() {
    // 1.5 MiB
    assert_eq!(humanize_bytes(1024 * 1024 + 512 * 1024), "1.5M");
}

#[test]
fn gibibyte_and_tebibyte_suffixes() {
    assert_eq!(humanize_bytes(1024 * 1024 * 1024), "1G");
    assert_eq!(humanize_bytes(1024u64 * 1024 * 1024 * 1024), "1T");
}

#[test]
fn rounds_to_two_decimals() {
    // 10 MiB + a few KiB, should round to 10.00 -> "10M"
    let bytes = 10 * 1024 * 1024 + 100;
    assert_eq!(humanize_bytes(bytes), "10M");
}
