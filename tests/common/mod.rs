//! Snapshot and scratch-file helpers shared by the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

/// Contents of a checked-in fixture, relative to `tests/snapshots/`.
#[allow(dead_code)]
pub fn read_fixture(name: &str) -> String {
    let path = snapshot_root().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("fixture {:?} not found", path))
}

/// Compare `actual` with a stored snapshot, ignoring line-ending style.
///
/// `RIBOMETHSEQ_UPDATE_SNAPSHOTS=1` rewrites the snapshot instead.
#[allow(dead_code)]
pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("RIBOMETHSEQ_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set RIBOMETHSEQ_UPDATE_SNAPSHOTS=1 to regenerate.\n\
             Expected:\n{}\nActual:\n{}",
            path, expected, actual
        );
    }
}

/// Scratch path unique to this test process; the directory is created on demand.
#[allow(dead_code)]
pub fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ribomethseq-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch directory");
    dir.join(name)
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}
