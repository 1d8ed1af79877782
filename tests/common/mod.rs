//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use argsift::args::{Session, StorageMode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `name` inside `dir` and return the full path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// `@<path>` argument for a response file.
pub fn at(path: &Path) -> String {
    format!("@{}", path.display())
}

/// Dynamic-storage session reading from the real filesystem.
pub fn dynamic_session() -> Session {
    Session::with_storage(StorageMode::Dynamic)
}
