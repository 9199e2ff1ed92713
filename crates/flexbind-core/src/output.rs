//! Writing the generated source

use crate::error::{Error, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// What happened to the destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// New content was written
    Written,
    /// The file already held exactly this content
    Unchanged,
}

/// Write `contents` to `path` atomically
///
/// The text goes to a temporary file next to the destination and replaces it
/// only once fully written and synced, so a failed run never leaves a
/// truncated file behind. Identical content is not rewritten.
pub fn write_output(path: &Path, contents: &str) -> Result<WriteOutcome> {
    match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => {
            info!(path = %path.display(), "Output is up to date");
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(path, e)),
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    debug!(temp = %temp.path().display(), "Writing to temporary file");
    temp.write_all(contents.as_bytes())
        .map_err(|e| Error::io(temp.path().to_path_buf(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path().to_path_buf(), e))?;
    temp.persist(path).map_err(|e| Error::io(path, e.error))?;

    info!(path = %path.display(), bytes = contents.len(), "Output written");
    Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("base.cs");

        assert_eq!(write_output(&path, "a\n").unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");
        assert_eq!(write_output(&path, "a\n").unwrap(), WriteOutcome::Unchanged);
        assert_eq!(write_output(&path, "b\n").unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "b\n");
    }

    #[test]
    fn test_no_temporary_files_left() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("base.cs");
        write_output(&path, "x").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("base.cs");
        let err = write_output(&path, "x").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!path.exists());
    }
}
