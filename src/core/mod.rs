pub mod content;
pub mod control;
pub mod merge;
pub mod names;
pub mod workflow;

pub use crate::domain::model::{LetterTemplate, MergeReport, RecipientList};
pub use crate::domain::ports::{FolderOpener, Prompt, Storage};
pub use crate::utils::error::Result;
