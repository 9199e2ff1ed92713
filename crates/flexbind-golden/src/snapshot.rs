//! Expected-output storage

use crate::corpus::GoldenCase;
use crate::Result;
use std::fs;
use std::path::PathBuf;

/// Reads and rewrites the `expected.cs` file of corpus cases
#[derive(Debug, Default)]
pub struct SnapshotManager;

impl SnapshotManager {
    pub fn new() -> Self {
        Self
    }

    pub fn exists(&self, case: &GoldenCase) -> bool {
        case.expected_path().exists()
    }

    /// Load the expected source, with line endings normalized
    pub fn load(&self, case: &GoldenCase) -> Result<String> {
        let text = fs::read_to_string(case.expected_path())?;
        Ok(normalize_line_endings(&text))
    }

    /// Store `content` as the expected source
    pub fn save(&self, case: &GoldenCase, content: &str) -> Result<()> {
        flexbind_core::write_output(&case.expected_path(), content)?;
        Ok(())
    }

    /// Copy the current expected source next to it before rewriting
    pub fn backup(&self, case: &GoldenCase) -> Result<Option<PathBuf>> {
        let path = case.expected_path();
        if !path.exists() {
            return Ok(None);
        }
        let backup = path.with_extension("cs.bak");
        fs::copy(&path, &backup)?;
        Ok(Some(backup))
    }
}

/// Convert CRLF line endings so checkouts on any platform compare equal
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CaseDefinition, CaseExpectations};
    use tempfile::TempDir;

    fn case(dir: &std::path::Path) -> GoldenCase {
        GoldenCase {
            name: "case".to_string(),
            category: String::new(),
            dir: dir.to_path_buf(),
            definition: CaseDefinition {
                description: "test".to_string(),
                tags: vec![],
                enabled: true,
                priority: 100,
                expectations: CaseExpectations::default(),
                config: None,
            },
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let case = case(temp.path());
        let manager = SnapshotManager::new();

        assert!(!manager.exists(&case));
        assert_eq!(manager.backup(&case).unwrap(), None);

        manager.save(&case, "line\r\nnext\n").unwrap();
        assert!(manager.exists(&case));
        assert_eq!(manager.load(&case).unwrap(), "line\nnext\n");

        let backup = manager.backup(&case).unwrap().unwrap();
        assert!(backup.exists());
    }

    #[test]
    fn test_save_failure_is_a_write_error() {
        let temp = TempDir::new().unwrap();
        let case = case(&temp.path().join("missing"));

        let err = SnapshotManager::new().save(&case, "text\n").unwrap_err();
        assert!(matches!(
            err,
            crate::GoldenError::Generator(flexbind_core::Error::Io { .. })
        ));
    }
}
