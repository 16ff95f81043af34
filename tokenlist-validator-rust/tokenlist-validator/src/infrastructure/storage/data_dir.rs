use serde_json::Value;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tokenlist_core::shared::constants::{ENTRY_FILE_NAME, EXPECTED_MISMATCHES_FILE_NAME};

use crate::domain::error::ValidatorError;

/// The token list data directory: one folder per entry, named by its key.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entry folders in case-insensitive order. Hidden folders and plain
    /// files are skipped.
    pub fn folders(&self) -> Result<Vec<String>, ValidatorError> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            ValidatorError::data_dir(format!("Failed to read {}: {}", self.root.display(), e))
        })?;

        let mut folders = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            folders.push(name);
        }

        sort_folders(&mut folders);
        Ok(folders)
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(key).join(ENTRY_FILE_NAME)
    }

    pub fn read_entry(&self, key: &str) -> Result<Value, ValidatorError> {
        read_json(&self.entry_path(key))
    }

    /// `None` when the entry has no expected-mismatch file.
    pub fn read_expected_mismatches(&self, key: &str) -> Result<Option<Value>, ValidatorError> {
        let path = self.root.join(key).join(EXPECTED_MISMATCHES_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }
}

/// Case-insensitive, falling back to the raw name so the order is total.
pub fn sort_folders(folders: &mut [String]) {
    folders.sort_by(|a, b| match a.to_lowercase().cmp(&b.to_lowercase()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    });
}

fn read_json(path: &Path) -> Result<Value, ValidatorError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ValidatorError::data_dir(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| ValidatorError::data_dir(format!("Failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn datadir_with(folders: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for folder in folders {
            fs::create_dir_all(dir.path().join(folder)).unwrap();
        }
        dir
    }

    #[test]
    fn test_folders_are_sorted_case_insensitively() {
        let dir = datadir_with(&["usdc", "DAI", "Aave", "ETH", ".git"]);
        fs::write(dir.path().join("README.md"), "not an entry").unwrap();

        let folders = DataDir::new(dir.path()).folders().unwrap();
        assert_eq!(folders, vec!["Aave", "DAI", "ETH", "usdc"]);
    }

    #[test]
    fn test_sort_is_total_for_case_variants() {
        let mut folders = vec!["foo".to_string(), "FOO".to_string(), "Foo".to_string()];
        sort_folders(&mut folders);
        assert_eq!(folders, vec!["FOO", "Foo", "foo"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = DataDir::new("/definitely/not/here").folders();
        assert!(matches!(result, Err(ValidatorError::DataDir(_))));
    }

    #[test]
    fn test_read_entry_and_mismatches() {
        let dir = datadir_with(&["FOO"]);
        fs::write(dir.path().join("FOO").join(ENTRY_FILE_NAME), r#"{ "name": "Foo" }"#).unwrap();
        let datadir = DataDir::new(dir.path());

        assert_eq!(datadir.read_entry("FOO").unwrap()["name"], "Foo");
        assert!(datadir.read_expected_mismatches("FOO").unwrap().is_none());

        fs::write(
            dir.path().join("FOO").join(EXPECTED_MISMATCHES_FILE_NAME),
            r#"{ "symbol": "FOO" }"#,
        )
        .unwrap();
        assert!(datadir.read_expected_mismatches("FOO").unwrap().is_some());
    }

    #[test]
    fn test_unparseable_entry_is_an_error() {
        let dir = datadir_with(&["BAD"]);
        fs::write(dir.path().join("BAD").join(ENTRY_FILE_NAME), "{ not json").unwrap();
        let err = DataDir::new(dir.path()).read_entry("BAD").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
