//! Errors of the export as a whole

use hci_loader::LoadError;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur during the export
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A source could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A source could not be extracted
    #[error(transparent)]
    Extract(#[from] hci_wrap::Error),

    /// An input file could not be read or parsed
    #[error("Unable to read input '{path}': {message}")]
    Input { path: String, message: String },

    /// Wrong inputs for an offline conversion
    #[error("{0}")]
    Arguments(String),
}

impl PipelineError {
    /// Create an input error
    pub fn input(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an arguments error
    pub fn arguments(message: impl Into<String>) -> Self {
        Self::Arguments(message.into())
    }

    /// One line message for the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Extract(hci_wrap::Error::InvalidSource(error)) => {
                let location = if error.location.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", error.location)
                };
                format!(
                    "Invalid data in pcs {} JSON output{location}: {}",
                    error.description, error.reason
                )
            }
            Self::Load(LoadError::JsonParse { .. }) => "Error while parsing pcs JSON output".to_string(),
            Self::Load(LoadError::Command { .. }) => "Error while running pcs".to_string(),
            other => other.to_string(),
        }
    }

    /// Structured details accompanying the user message
    pub fn details(&self) -> Value {
        match self {
            Self::Extract(hci_wrap::Error::InvalidSource(error)) => {
                serde_json::to_value(error).unwrap_or(Value::Null)
            }
            Self::Load(error) => error.details(),
            other => json!({"message": other.to_string()}),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
