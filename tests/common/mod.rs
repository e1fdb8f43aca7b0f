//! Common test utilities for tether integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's real data directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates a temporary data directory and points every
/// `tt` invocation at it via `TT_DATA_DIR`, making tests parallel-safe.
pub struct TestEnv {
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an isolated data directory.
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the tt binary with isolated data directory.
    pub fn tt(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tt"));
        cmd.env("TT_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Add a person and return the created record parsed from JSON.
    pub fn add_person(&self, name: &str, extra_args: &[&str]) -> serde_json::Value {
        let output = self
            .tt()
            .arg("add")
            .arg(name)
            .args(extra_args)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    /// Add a person and return just its id.
    pub fn add_person_id(&self, name: &str, extra_args: &[&str]) -> String {
        self.add_person(name, extra_args)["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
