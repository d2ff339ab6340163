//! Test utilities & fixtures.
//! Provides access to integration test data under `tests/test-data-int`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use helpdesk::desk::{QueryResponder, StaticDirectory};

/// Return the path to the static integration test fixture directory.
#[allow(dead_code)]
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-data-int")
}

/// Fresh responder over the built-in user table, one per test.
#[allow(dead_code)]
pub fn builtin_responder() -> QueryResponder {
    QueryResponder::new(Arc::new(StaticDirectory::builtin()))
}

/// Write `contents` as `config.toml` in a fresh temp dir; returns the dir and file path.
#[allow(dead_code)]
pub fn temp_config(contents: &str) -> (tempfile::TempDir, String) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, contents).expect("write config");
    let path = path.to_string_lossy().to_string();
    (tmp, path)
}
