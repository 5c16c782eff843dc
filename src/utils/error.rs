use std::io;
use thiserror::Error;

/// Errors raised by a [`Prompt`](crate::domain::ports::Prompt) implementation.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user closed or dismissed the dialog without answering.
    #[error("Input cancelled by user")]
    Cancelled,

    /// The input stream ended; no further answers can arrive.
    #[error("Input closed")]
    Closed,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A scripted prompt ran out of canned answers.
    #[error("No scripted answer left for this prompt")]
    Exhausted,

    #[error("Script mismatch: {0}")]
    Script(String),

    #[error("Prompt IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Prompt error: {0}")]
    PromptError(#[from] PromptError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No output folder was selected")]
    NoOutputDirectory,

    #[error("Mail merge aborted by user")]
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MergeError {
    pub fn cancelled() -> Self {
        MergeError::PromptError(PromptError::Cancelled)
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            MergeError::PromptError(PromptError::Cancelled) | MergeError::NoOutputDirectory
        )
    }

    /// Errors a step can show to the user and then retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MergeError::IoError(_)
                | MergeError::ValidationError { .. }
                | MergeError::PromptError(PromptError::InvalidInput(_))
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MergeError::Aborted => ErrorSeverity::Low,
            MergeError::IoError(_) | MergeError::ValidationError { .. } => ErrorSeverity::Medium,
            MergeError::ConfigError { .. }
            | MergeError::InvalidConfigValueError { .. }
            | MergeError::TomlError(_)
            | MergeError::NoOutputDirectory => ErrorSeverity::High,
            MergeError::PromptError(_) | MergeError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MergeError::IoError(e) => match e.kind() {
                io::ErrorKind::NotFound => "The selected file could not be found.".to_string(),
                io::ErrorKind::PermissionDenied => {
                    "Permission denied while accessing the selected file.".to_string()
                }
                _ => format!("A file operation failed: {}", e),
            },
            MergeError::PromptError(PromptError::Exhausted) => {
                "The answers script ended before the mail merge finished.".to_string()
            }
            MergeError::PromptError(PromptError::Closed) => {
                "Input ended before the mail merge finished.".to_string()
            }
            MergeError::TomlError(_) => "The configuration file is not valid TOML.".to_string(),
            MergeError::Aborted => "Mail merge cancelled.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MergeError::IoError(_) => "Check that the file exists and that you can read it.",
            MergeError::PromptError(PromptError::Exhausted | PromptError::Script(_)) => {
                "Add the missing answers to the script file, in prompt order."
            }
            MergeError::PromptError(_) => "Re-run the tool from an interactive terminal.",
            MergeError::TomlError(_)
            | MergeError::ConfigError { .. }
            | MergeError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or remove the offending key to use the default."
            }
            MergeError::ValidationError { .. } => "Correct the input and try again.",
            MergeError::NoOutputDirectory => "Pick an existing folder for the letters.",
            MergeError::SerializationError(_) => "Check that the report path is writable.",
            MergeError::Aborted => "Run the tool again when you are ready.",
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
