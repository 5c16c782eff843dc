use crate::utils::error::{MergeError, Result};
use crate::utils::validation::{
    validate_file_name_pattern, validate_non_empty_string, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_PLACEHOLDER: &str = "[name]";
pub const DEFAULT_DELIMITER: &str = ", ";
pub const DEFAULT_FILE_NAME: &str = "{name}'s Mail.txt";
pub const DEFAULT_MIN_RECIPIENTS: usize = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub merge: MergeSection,
    pub names: NamesSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSection {
    pub placeholder: String,
    pub file_name: String,
    pub on_conflict: ConflictPolicy,
    pub open_output_dir: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesSection {
    pub delimiter: String,
    pub min_recipients: usize,
    pub validate_file_names: bool,
}

/// What to do when a letter with the same file name already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    #[default]
    Overwrite,
    Skip,
}

impl Default for MergeSection {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            on_conflict: ConflictPolicy::Overwrite,
            open_output_dir: true,
        }
    }
}

impl Default for NamesSection {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            min_recipients: DEFAULT_MIN_RECIPIENTS,
            validate_file_names: false,
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| MergeError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn placeholder(&self) -> &str {
        &self.merge.placeholder
    }

    pub fn delimiter(&self) -> &str {
        &self.names.delimiter
    }

    pub fn min_recipients(&self) -> usize {
        self.names.min_recipients
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("merge.placeholder", &self.merge.placeholder)?;
        validate_file_name_pattern("merge.file_name", &self.merge.file_name)?;
        validate_non_empty_string("names.delimiter", &self.names.delimiter)?;
        validate_positive_number("names.min_recipients", self.names.min_recipients, 1)?;
        Ok(())
    }
}
