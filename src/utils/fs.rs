//! Thin filesystem helpers used by the record and project stores.

use crate::errors::{AppError, AppResult};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Name and kind of a directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

/// Whether `path` is a directory. A missing path is `Ok(false)`; any other
/// failure to read its metadata is an error.
pub fn dir_exists(path: &Path) -> AppResult<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AppError::Io(e)),
    }
}

pub fn create_dir(path: &Path) -> AppResult<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

pub fn dir_is_empty(path: &Path) -> AppResult<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// List a directory. Entries whose names are not valid UTF-8 are skipped.
pub fn list_dir(path: &Path) -> AppResult<Vec<Entry>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        out.push(Entry {
            name,
            is_dir: entry.file_type()?.is_dir(),
        });
    }
    Ok(out)
}

/// Write `contents` to `path`.
///
/// Without `force` the file is created exclusively, so an existing file
/// yields `AlreadyExists` even when two writers race on the same path.
pub fn write_file(path: &Path, contents: &str, force: bool) -> AppResult<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(path).map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            AppError::AlreadyExists(path.display().to_string())
        } else {
            AppError::Io(e)
        }
    })?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Remove `dir` if it is empty. Returns whether it was removed.
pub fn remove_dir_if_empty(dir: &Path) -> AppResult<bool> {
    if dir_is_empty(dir)? {
        fs::remove_dir(dir)?;
        return Ok(true);
    }
    Ok(false)
}
