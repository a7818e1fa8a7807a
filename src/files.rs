//! Idempotent file-system primitives used by the pipeline.
//!
//! Each helper logs its own outcome. [`is_file`] only errors on failures other
//! than "not found"; [`ensure_dir`] and [`copy_file`] log and then propagate
//! every failure so the pipeline can abort the invocation.

use crate::output;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("cannot access {path}: {source}")]
    Access { path: PathBuf, source: io::Error },
    #[error("error creating folder {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("error copy source file {path}: {source}")]
    Copy { path: PathBuf, source: io::Error },
}

/// What [`ensure_dir`] found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    /// The directory was already there; nothing was touched.
    Existed,
    /// The directory (and any missing parents) was just created.
    Created,
}

/// Check whether a file exists.
///
/// A missing file is logged and reported as `Ok(false)`; any other failure
/// (permissions, broken mounts) is logged and returned.
pub fn is_file(path: &Path) -> Result<bool, FsError> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            output::error(&format!("file {} does not exist", path.display()));
            Ok(false)
        }
        Err(source) => {
            let err = FsError::Access {
                path: path.to_path_buf(),
                source,
            };
            output::error(&err.to_string());
            Err(err)
        }
    }
}

/// Create a directory (recursively) unless it already exists.
pub fn ensure_dir(path: &Path) -> Result<DirState, FsError> {
    if path.exists() {
        return Ok(DirState::Existed);
    }
    std::fs::create_dir_all(path).map_err(|source| {
        let err = FsError::CreateDir {
            path: path.to_path_buf(),
            source,
        };
        output::error(&err.to_string());
        err
    })?;
    output::info("output folder created. Processing favicons...");
    Ok(DirState::Created)
}

/// Copy `source` to `destination`, overwriting any existing file.
pub fn copy_file(source: &Path, destination: &Path) -> Result<(), FsError> {
    std::fs::copy(source, destination).map_err(|e| {
        let err = FsError::Copy {
            path: source.to_path_buf(),
            source: e,
        };
        output::error(&err.to_string());
        err
    })?;
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    output::info(&format!("{file_name} copied successfully"));
    Ok(())
}
