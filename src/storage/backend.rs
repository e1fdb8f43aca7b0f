//! Document backend trait and implementations.
//!
//! This module provides the durable key-value document stores backing
//! Tether data:
//! - `FileBackend` - One JSON file per key under the data directory (default)
//! - `MemoryBackend` - In-memory map, for tests

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Trait for backends that persist whole serialized documents under
/// string keys.
///
/// Every store mutation reads, rewrites, and sets the entire document
/// for a key; there is no partial-record primitive.
pub trait DocumentBackend: Send + Sync {
    /// Read the document stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Get the storage location description (for display purposes).
    fn location(&self) -> String;

    /// Get the backend type name.
    fn backend_type(&self) -> &'static str;
}

/// File-per-key backend rooted at a data directory.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`, creating the directory if
    /// needed.
    pub fn new(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl DocumentBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Write-then-rename so a crash mid-write never leaves a
        // truncated document behind.
        let path = self.key_path(key);
        let tmp = self.root.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn backend_type(&self) -> &'static str {
        "file"
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryBackend {
    docs: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.docs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.docs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }

    fn backend_type(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut backend = FileBackend::new(temp.path()).unwrap();

        assert_eq!(backend.get("people").unwrap(), None);

        backend.set("people", "[]").unwrap();
        assert_eq!(backend.get("people").unwrap().as_deref(), Some("[]"));

        backend.set("people", r#"[{"id":"tt-a1b2"}]"#).unwrap();
        assert_eq!(
            backend.get("people").unwrap().as_deref(),
            Some(r#"[{"id":"tt-a1b2"}]"#)
        );
    }

    #[test]
    fn test_file_backend_keys_are_independent() {
        let temp = TempDir::new().unwrap();
        let mut backend = FileBackend::new(temp.path()).unwrap();

        backend.set("people", "[]").unwrap();
        assert_eq!(backend.get("undo").unwrap(), None);
    }

    #[test]
    fn test_memory_backend_round_trip() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.get("people").unwrap(), None);

        backend.set("people", "[]").unwrap();
        assert_eq!(backend.get("people").unwrap().as_deref(), Some("[]"));
    }
}
