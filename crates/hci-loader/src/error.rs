//! Errors raised while loading sources

use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading sources
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadError {
    /// A command exited with a non-zero return code
    #[error("Command '{}' failed with rc {rc}", .pcs_command.join(" "))]
    Command {
        pcs_command: Vec<String>,
        rc: i32,
        stdout: String,
        stderr: String,
    },

    /// Command output or a file is not valid JSON
    #[error("Unable to parse {data_desc} as JSON: {error}")]
    JsonParse {
        error: String,
        data: String,
        data_desc: String,
        additional_info: Option<String>,
    },

    /// A command could not be started
    #[error("Unable to run '{command}': {message}")]
    Spawn { command: String, message: String },

    /// A command did not finish in time
    #[error("Command '{command}' timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    /// A file exists but could not be read
    #[error("Unable to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Invalid loader configuration
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LoadError {
    /// Create a command error
    pub fn command(
        pcs_command: &[String],
        rc: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::Command {
            pcs_command: pcs_command.to_vec(),
            rc,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a JSON parse error
    pub fn json_parse(
        error: &serde_json::Error,
        data: impl Into<String>,
        data_desc: impl Into<String>,
        additional_info: Option<String>,
    ) -> Self {
        Self::JsonParse {
            error: error.to_string(),
            data: data.into(),
            data_desc: data_desc.into(),
            additional_info,
        }
    }

    /// Create an I/O error for a file
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Structured details of the error for machine readable reports
    pub fn details(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| json!({"message": self.to_string()}))
    }
}

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoadError>;
