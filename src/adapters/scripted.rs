//! Canned answers for headless runs and tests.
//!
//! A script is a TOML file with a single `answers` array, consumed in prompt order:
//!
//! ```toml
//! answers = [
//!     { choose = "Manual Insert" },
//!     { integer = 2 },
//!     { text = "alice" },
//!     { path = "/tmp/letters" },
//!     { confirm = false },
//!     "dismiss",
//! ]
//! ```

use crate::domain::model::Notice;
use crate::domain::ports::{Prompt, PromptResult};
use crate::utils::error::{PromptError, Result};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// Picks the option with this label.
    Choose(String),
    Text(String),
    Integer(i64),
    Path(PathBuf),
    Confirm(bool),
    /// Closes the dialog without answering.
    Dismiss,
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    Asked(String),
    Notified(Notice, String),
}

#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    transcript: Vec<Exchange>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            transcript: Vec::new(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let script: ScriptFile = toml::from_str(content)?;
        Ok(Self::new(script.answers))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    /// Messages shown with the given severity, in order.
    pub fn notices(&self, level: Notice) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|exchange| match exchange {
                Exchange::Notified(notice, message) if *notice == level => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Prompts that were asked, in order.
    pub fn asked(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|exchange| match exchange {
                Exchange::Asked(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, message: &str) -> PromptResult<Answer> {
        self.transcript.push(Exchange::Asked(message.to_string()));
        match self.answers.pop_front() {
            Some(Answer::Dismiss) => Err(PromptError::Cancelled),
            Some(answer) => Ok(answer),
            None => Err(PromptError::Exhausted),
        }
    }
}

fn mismatch(expected: &str, message: &str, found: &Answer) -> PromptError {
    PromptError::Script(format!(
        "expected {} for \"{}\", found {:?}",
        expected, message, found
    ))
}

impl Prompt for ScriptedPrompt {
    fn choose(&mut self, message: &str, options: &[&str]) -> PromptResult<usize> {
        match self.next(message)? {
            Answer::Choose(label) => options
                .iter()
                .position(|option| *option == label)
                .ok_or_else(|| {
                    PromptError::Script(format!(
                        "\"{}\" is not one of {:?} for \"{}\"",
                        label, options, message
                    ))
                }),
            other => Err(mismatch("a choice", message, &other)),
        }
    }

    fn text(&mut self, _title: &str, message: &str, _multiline: bool) -> PromptResult<String> {
        match self.next(message)? {
            Answer::Text(text) => Ok(text),
            other => Err(mismatch("text", message, &other)),
        }
    }

    fn integer(&mut self, _title: &str, message: &str) -> PromptResult<i64> {
        match self.next(message)? {
            Answer::Integer(value) => Ok(value),
            Answer::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| PromptError::InvalidInput(format!("'{}' is not a whole number", text))),
            other => Err(mismatch("an integer", message, &other)),
        }
    }

    fn file_path(&mut self, title: &str) -> PromptResult<PathBuf> {
        match self.next(title)? {
            Answer::Path(path) => Ok(path),
            other => Err(mismatch("a file path", title, &other)),
        }
    }

    fn directory_path(&mut self, title: &str) -> PromptResult<PathBuf> {
        match self.next(title)? {
            Answer::Path(path) => Ok(path),
            other => Err(mismatch("a directory path", title, &other)),
        }
    }

    fn confirm(&mut self, message: &str) -> PromptResult<bool> {
        match self.next(message)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(mismatch("a confirmation", message, &other)),
        }
    }

    fn notify(&mut self, notice: Notice, message: &str) -> PromptResult<()> {
        tracing::debug!("[{}] {}", notice, message);
        self.transcript
            .push(Exchange::Notified(notice, message.to_string()));
        Ok(())
    }
}
