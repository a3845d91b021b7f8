//! Atomic file operations for crash-safe session persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, SessionError};

/// Writes data to a file atomically.
///
/// Writes to a temporary file in the same directory first, then renames it
/// over the target path, so the file is never observed in a partially
/// written state.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    // Temp file in the same directory for a same-filesystem rename
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|source| {
        SessionError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    temp_file
        .write_all(data)
        .and_then(|_| temp_file.flush())
        .map_err(|source| SessionError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    temp_file.persist(path).map_err(|e| SessionError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Writes a value to a file atomically as pretty-printed JSON.
pub fn atomic_write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

/// Reads and deserializes JSON from a file, returning `None` if the file
/// does not exist.
pub fn read_json_optional<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).map_err(|source| SessionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(serde_json::from_str(&data)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/session.json");

        atomic_write(&path, b"{}").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_read_json_optional_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let value: Option<serde_json::Value> = read_json_optional(&path).unwrap();
        assert!(value.is_none());
    }
}
