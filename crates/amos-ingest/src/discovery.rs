//! Finding work-package exports in a folder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// CSV exports directly inside `dir`, sorted by file name.
///
/// The extension match ignores case. Subdirectories are not searched.
pub fn list_work_packages(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_error = |source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut exports = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            exports.push(path);
        }
    }
    exports.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(exports)
}
