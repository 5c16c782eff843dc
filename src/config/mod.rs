pub mod toml_config;

pub use toml_config::{ConflictPolicy, Settings};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mail-merge")]
#[command(about = "Write one personalized letter per recipient from a [name] template")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Replay answers from a TOML script instead of asking on the terminal
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Write a JSON report of the merge to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// What to do when a letter file already exists
    #[arg(long, value_enum)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Do not open the output folder when the merge finishes
    #[arg(long)]
    pub no_open: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the settings file, if any, and applies command line overrides.
    pub fn load_settings(&self) -> crate::utils::error::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("Loading settings from {}", path.display());
                Settings::from_file(path)?
            }
            None => Settings::default(),
        };

        if let Some(policy) = self.on_conflict {
            tracing::debug!("on_conflict overridden to {:?}", policy);
            settings.merge.on_conflict = policy;
        }
        if self.no_open {
            settings.merge.open_output_dir = false;
        }

        Ok(settings)
    }
}
