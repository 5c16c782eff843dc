use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Ordered recipient names, fixed once collection finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipientList(Vec<String>);

impl RecipientList {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for RecipientList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterTemplate {
    content: String,
}

impl LetterTemplate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn occurrences(&self, placeholder: &str) -> usize {
        self.content.matches(placeholder).count()
    }

    /// Replaces every occurrence of `placeholder` with `name`.
    pub fn personalize(&self, placeholder: &str, name: &str) -> String {
        self.content.replace(placeholder, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputArtifact {
    pub recipient: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRecipient {
    pub recipient: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub output_dir: PathBuf,
    pub written: Vec<OutputArtifact>,
    pub skipped: Vec<String>,
    pub failed: Vec<FailedRecipient>,
    pub finished_at: DateTime<Utc>,
}

impl MergeReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Letters written ({}): {}",
            self.written.len(),
            join_or_none(self.written.iter().map(|a| a.recipient.as_str()))
        )];
        if !self.skipped.is_empty() {
            lines.push(format!(
                "Skipped, file already exists ({}): {}",
                self.skipped.len(),
                self.skipped.join(", ")
            ));
        }
        if !self.failed.is_empty() {
            lines.push(format!("Failed ({}):", self.failed.len()));
            for failure in &self.failed {
                lines.push(format!("  {}: {}", failure.recipient, failure.reason));
            }
        }
        lines.join("\n")
    }
}

fn join_or_none<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Manual,
    File,
}

impl NameSource {
    pub const LABELS: [&'static str; 2] = ["Manual Insert", "Text File"];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(NameSource::Manual),
            1 => Some(NameSource::File),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Browse,
    Type,
}

impl ContentSource {
    pub const LABELS: [&'static str; 2] = ["Browse", "Type Letter Content"];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(ContentSource::Browse),
            1 => Some(ContentSource::Type),
            _ => None,
        }
    }
}

/// Severity of a non-blocking message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Notice {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Info => f.write_str("info"),
            Notice::Warning => f.write_str("warning"),
            Notice::Error => f.write_str("error"),
        }
    }
}
