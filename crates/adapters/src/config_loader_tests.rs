// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_conf_file_reads_as_empty() {
    let doc = read_ini(Path::new("/nonexistent/path/z3.conf")).unwrap();
    assert_eq!(doc.get_main("BUCKET"), None);
}

#[test]
fn existing_conf_file_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("z3.conf");
    std::fs::write(&path, "[main]\nBUCKET = my-bucket\n").unwrap();
    let doc = read_ini(&path).unwrap();
    assert_eq!(doc.get_main("BUCKET"), Some("my-bucket".to_string()));
}

#[test]
fn package_conf_path_sits_next_to_the_executable() {
    let path = package_conf_path().unwrap();
    assert_eq!(path.file_name().unwrap(), PACKAGE_CONF_FILENAME);
}
