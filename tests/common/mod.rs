#![allow(dead_code)]

use std::{fs, path::Path};
use tempfile::TempDir;

pub const FIXTURE: &str = include_str!("../fixtures/wix.json");

/// Scratch project: `wix.json` plus `build/a.txt`, `build/sub/b.txt`, `build/sub/c.tmp`.
pub fn project() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("wix.json"), FIXTURE).unwrap();
    write(tmp.path(), "build/a.txt", "a");
    write(tmp.path(), "build/sub/b.txt", "b");
    write(tmp.path(), "build/sub/c.tmp", "c");
    tmp
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
