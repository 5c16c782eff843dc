pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, NoopOpener, ScriptedPrompt, SystemOpener, TerminalPrompt};
pub use config::Settings;
pub use core::{
    content::ContentCollector, merge::MergeEngine, names::NameCollector, workflow::Workflow,
};
pub use utils::error::{MergeError, PromptError, Result};
