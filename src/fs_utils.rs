//! Filesystem utilities for publishing generated SQL

use crate::error::SeedError;
use std::fs::{self, Permissions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write a file atomically, creating parent directories if needed
///
/// `write` streams into a temporary file in the destination directory, which
/// then replaces `path` in a single rename. If `write` fails, or the rename
/// does, the temporary file is removed and any existing `path` is untouched.
/// The published file keeps the mode of the file it replaces, or gets the
/// usual `0644` when it is new.
pub fn write_atomic<P, F, T>(path: P, write: F) -> Result<T, SeedError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> std::io::Result<T>,
{
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Create parent directories if they don't exist
    fs::create_dir_all(parent).map_err(|e| SeedError::io(parent, e))?;

    let temp = NamedTempFile::new_in(parent).map_err(|e| SeedError::io(parent, e))?;

    let mut writer = BufWriter::new(temp);
    let value = write(&mut writer).map_err(|e| SeedError::io(path, e))?;
    writer.flush().map_err(|e| SeedError::io(path, e))?;

    let temp = writer
        .into_inner()
        .map_err(|e| SeedError::io(path, e.into_error()))?;

    let permissions = publish_permissions(path, &temp).map_err(|e| SeedError::io(path, e))?;
    temp.as_file()
        .set_permissions(permissions)
        .map_err(|e| SeedError::io(path, e))?;

    temp.persist(path).map_err(|e| SeedError::io(path, e.error))?;

    tracing::debug!(path = %path.display(), "Published output file");
    Ok(value)
}

/// Permissions the published file should carry
fn publish_permissions(path: &Path, temp: &NamedTempFile) -> io::Result<Permissions> {
    match fs::metadata(path) {
        Ok(existing) => Ok(existing.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(temp),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn new_file_permissions(_temp: &NamedTempFile) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    // tempfile creates 0600; match a plain `File::create` under the common 022 umask
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(temp: &NamedTempFile) -> io::Result<Permissions> {
    Ok(temp.as_file().metadata()?.permissions())
}
