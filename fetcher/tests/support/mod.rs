//! Test support utilities for fetcher behavioural tests.

use camino::Utf8PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory and returns it with its UTF-8 path.
///
/// Keep the [`TempDir`] alive for as long as the path is used.
pub fn temp_root() -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("UTF-8 path");
    (dir, path)
}
