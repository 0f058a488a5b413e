// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `S3ObjectStore`'s methods all round-trip through the network, so the
//! only parts worth unit-testing without a live bucket are the pure
//! string helpers they lean on.

use super::*;

#[test]
fn strips_the_meta_prefix() {
    assert_eq!(strip_meta_prefix("x-amz-meta-parent"), "parent");
    assert_eq!(strip_meta_prefix("isfull"), "isfull");
}

#[test]
fn quotes_etags_for_the_complete_call() {
    assert_eq!(quote_etag("abc123"), "\"abc123\"");
}
