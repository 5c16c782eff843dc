use crate::domain::model::Notice;
use crate::utils::error::{PromptError, Result};
use std::path::{Path, PathBuf};

pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Modal dialogs the workflow asks the user through.
///
/// Every call blocks until answered. A dismissed dialog is reported as
/// [`PromptError::Cancelled`]; the caller decides how to recover.
pub trait Prompt {
    /// Returns the index of the picked option.
    fn choose(&mut self, message: &str, options: &[&str]) -> PromptResult<usize>;

    fn text(&mut self, title: &str, message: &str, multiline: bool) -> PromptResult<String>;

    fn integer(&mut self, title: &str, message: &str) -> PromptResult<i64>;

    fn file_path(&mut self, title: &str) -> PromptResult<PathBuf>;

    fn directory_path(&mut self, title: &str) -> PromptResult<PathBuf>;

    fn confirm(&mut self, message: &str) -> PromptResult<bool>;

    /// Non-blocking message; never yields an answer.
    fn notify(&mut self, notice: Notice, message: &str) -> PromptResult<()>;
}

pub trait Storage {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// Shows a folder in the platform file browser.
pub trait FolderOpener {
    fn open(&self, dir: &Path) -> std::io::Result<()>;
}
