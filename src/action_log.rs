//! Action logging for Tether commands.
//!
//! Every CLI invocation is appended to a JSONL log file. Contact
//! details (phone numbers, email addresses, notes) are redacted before
//! they reach the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Represents a single action log entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionLog {
    /// ISO 8601 timestamp when the action occurred
    pub timestamp: DateTime<Utc>,

    /// Command name (e.g., "add", "contacted", "undo")
    pub command: String,

    /// Command arguments as JSON, with contact details redacted
    pub args: serde_json::Value,

    /// Whether the command succeeded
    pub success: bool,

    /// Error message if the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Command execution duration in milliseconds
    pub duration_ms: u64,

    /// User who executed the command
    pub user: String,
}

/// Log an action to the log file.
///
/// This function never fails the calling command - write errors only
/// produce a warning on stderr.
pub fn log_action(
    command: &str,
    args: serde_json::Value,
    success: bool,
    error: Option<String>,
    duration_ms: u64,
) {
    let log_path = match log_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Warning: Failed to get action log path: {}", e);
            return;
        }
    };

    let entry = ActionLog {
        timestamp: Utc::now(),
        command: command.to_string(),
        args: redact_args(&args),
        success,
        error,
        duration_ms,
        user: get_current_user(),
    };

    if let Err(e) = write_log_entry(&log_path, &entry) {
        eprintln!("Warning: Failed to write action log: {}", e);
    }
}

/// Get the log file path: `TT_LOG` env var if set, otherwise
/// `<data dir>/action.log`.
fn log_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("TT_LOG") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    Ok(crate::storage::default_data_dir()?.join("action.log"))
}

/// Write a log entry to the log file.
fn write_log_entry(path: &Path, entry: &ActionLog) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)?;

    Ok(())
}

/// Redact contact details from logged arguments.
fn redact_args(args: &serde_json::Value) -> serde_json::Value {
    match args {
        serde_json::Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, value) in map {
                let key_lower = key.to_lowercase();
                if key_lower.contains("phone")
                    || key_lower.contains("email")
                    || key_lower.contains("notes")
                {
                    redacted.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    redacted.insert(key.clone(), redact_args(value));
                }
            }
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_args).collect())
        }
        _ => args.clone(),
    }
}

/// Get the current user's username.
fn get_current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_contact_fields() {
        let value = serde_json::json!({
            "name": "Jane Doe",
            "phone": "555-1234",
            "email": "jane@example.com",
            "notes": "met at the gym",
            "frequency": 7
        });
        let redacted = redact_args(&value);

        assert_eq!(redacted["name"], "Jane Doe");
        assert_eq!(redacted["phone"], "[REDACTED]");
        assert_eq!(redacted["email"], "[REDACTED]");
        assert_eq!(redacted["notes"], "[REDACTED]");
        assert_eq!(redacted["frequency"], 7);
    }

    #[test]
    fn test_redact_nested_values() {
        let value = serde_json::json!({
            "candidates": [
                { "name": "A", "phone": "1" },
                { "name": "B", "email": "b@example.com" }
            ]
        });
        let redacted = redact_args(&value);

        assert_eq!(redacted["candidates"][0]["name"], "A");
        assert_eq!(redacted["candidates"][0]["phone"], "[REDACTED]");
        assert_eq!(redacted["candidates"][1]["email"], "[REDACTED]");
    }

    #[test]
    fn test_redact_leaves_scalars_alone() {
        let value = serde_json::json!("contacted");
        assert_eq!(redact_args(&value), serde_json::json!("contacted"));
    }
}
