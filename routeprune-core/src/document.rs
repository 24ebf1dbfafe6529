//! Loading and persisting the target document.
//!
//! `save` overwrites in place, so a crash mid-write can leave a truncated file.
//! `save_atomic` writes a sibling temp file and renames it over the target instead.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::errors::PruneError;
use crate::normalize::normalize_line_endings;

/// How the rewritten text is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate and overwrite the file directly.
    #[default]
    InPlace,
    /// Write to a temp file in the same directory, then rename over the target.
    Atomic,
}

/// Reads the whole file as UTF-8 text with `\r\n` and `\r` turned into `\n`.
pub fn load(path: &Path) -> Result<String, PruneError> {
    debug!("Reading target document {}", path.display());
    let raw = fs::read_to_string(path).map_err(|e| PruneError::io(path, e))?;
    debug!("Read {} bytes from {}", raw.len(), path.display());
    if let Cow::Owned(lf) = normalize_line_endings(&raw) {
        debug!("Converted CR/CRLF line endings in {} to LF", path.display());
        return Ok(lf);
    }
    Ok(raw)
}

/// Overwrites `path` with `text`.
pub fn save(path: &Path, text: &str) -> Result<(), PruneError> {
    debug!("Writing {} bytes to {}", text.len(), path.display());
    fs::write(path, text).map_err(|e| PruneError::io(path, e))
}

/// Writes `text` next to `path` and renames it into place.
pub fn save_atomic(path: &Path, text: &str) -> Result<(), PruneError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    debug!(
        "Writing {} bytes to {} via temp file in {}",
        text.len(),
        path.display(),
        dir.display()
    );
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PruneError::io(dir, e))?;
    tmp.write_all(text.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| PruneError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|source| PruneError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Writes according to `mode`.
pub fn save_with(path: &Path, text: &str, mode: WriteMode) -> Result<(), PruneError> {
    match mode {
        WriteMode::InPlace => save(path, text),
        WriteMode::Atomic => save_atomic(path, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("absent.ts")).unwrap_err();
        assert!(matches!(err, PruneError::Io { .. }));
        assert!(err.to_string().contains("absent.ts"));
    }

    #[test]
    fn load_converts_crlf_to_lf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenes.ts");
        fs::write(&path, "a\r\nb\r\n\r\nc\r").unwrap();
        assert_eq!(load(&path).unwrap(), "a\nb\n\nc\n");
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenes.ts");
        fs::write(&path, "old contents that are longer").unwrap();
        save(&path, "new").unwrap();
        assert_eq!(load(&path).unwrap(), "new");
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("scenes.ts");
        assert!(matches!(save(&path, "x"), Err(PruneError::Io { .. })));
        assert!(save_atomic(&path, "x").is_err());
    }

    #[test]
    fn atomic_save_replaces_contents_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenes.ts");
        fs::write(&path, "before").unwrap();
        save_with(&path, "after", WriteMode::Atomic).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "after");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
