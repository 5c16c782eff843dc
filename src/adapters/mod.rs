// Adapters layer: concrete implementations of the domain ports (dialogs, storage, folder opening).

pub mod opener;
pub mod scripted;
pub mod storage;
pub mod terminal;

pub use opener::{NoopOpener, SystemOpener};
pub use scripted::{Answer, ScriptedPrompt};
pub use storage::LocalStorage;
pub use terminal::TerminalPrompt;
