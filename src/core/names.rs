use crate::config::Settings;
use crate::core::control::resumable;
use crate::domain::model::{NameSource, Notice, RecipientList};
use crate::domain::ports::{Prompt, Storage};
use crate::utils::error::{MergeError, Result};
use crate::utils::validation::{invalid_names, is_valid_name, title_case};

pub const METHOD_QUESTION: &str = "Do you want to enter names manually, or through a text file?";
pub const COUNT_QUESTION: &str = "How many people do you want send a mail to?";
pub const NAME_QUESTION: &str = "Please enter the name:";
pub const INVALID_NAME_QUESTION: &str = "Please enter a valid name:";
pub const NAMES_FILE_TITLE: &str = "Select the names text file";
pub const CONFIRM_LABELS: [&str; 3] = ["Continue", "Re-enter Names", "Exit"];

/// Gathers the recipient list, typed one by one or read from a delimited file.
pub struct NameCollector<'a, S: Storage> {
    settings: &'a Settings,
    storage: &'a S,
}

impl<'a, S: Storage> NameCollector<'a, S> {
    pub fn new(settings: &'a Settings, storage: &'a S) -> Self {
        Self { settings, storage }
    }

    pub fn collect<P: Prompt + ?Sized>(&self, prompt: &mut P) -> Result<RecipientList> {
        match self.choose_source(prompt)? {
            NameSource::Manual => self.collect_manually(prompt),
            NameSource::File => self.load_from_file(prompt),
        }
    }

    pub fn choose_source<P: Prompt + ?Sized>(&self, prompt: &mut P) -> Result<NameSource> {
        resumable(prompt, "name_source", |p| {
            let index = p.choose(METHOD_QUESTION, &NameSource::LABELS)?;
            NameSource::from_index(index).ok_or_else(MergeError::cancelled)
        })
    }

    /// Count, then names, then confirmation; "Re-enter Names" starts over with an empty list.
    pub fn collect_manually<P: Prompt + ?Sized>(
        &self,
        prompt: &mut P,
    ) -> Result<RecipientList> {
        let target = self.ask_count(prompt)?;
        tracing::info!("Collecting {} names", target);

        loop {
            let names = self.enter_names(prompt, target)?;
            if self.confirm_names(prompt, &names)? {
                return Ok(RecipientList::new(names));
            }
            tracing::info!("Discarding {} names for re-entry", names.len());
        }
    }

    pub fn ask_count<P: Prompt + ?Sized>(&self, prompt: &mut P) -> Result<usize> {
        let min = self.settings.min_recipients();

        resumable(prompt, "recipient_count", |p| {
            let value = p.integer("No. of People", COUNT_QUESTION)?;
            match usize::try_from(value) {
                Ok(count) if count >= min => Ok(count),
                _ => Err(MergeError::ValidationError {
                    message: format!("Please enter a number of at least {}.", min),
                }),
            }
        })
    }

    /// Prompts until `target` valid names are gathered. Rejected entries change
    /// the prompt text but never lose names already accepted.
    pub fn enter_names<P: Prompt + ?Sized>(
        &self,
        prompt: &mut P,
        target: usize,
    ) -> Result<Vec<String>> {
        let mut names = Vec::with_capacity(target);
        let mut rejected = false;

        while names.len() < target {
            let question = if rejected {
                INVALID_NAME_QUESTION
            } else {
                NAME_QUESTION
            };
            let entered =
                resumable(prompt, "name_entry", |p| Ok(p.text("Name", question, false)?))?;
            let entered = entered.trim();

            if is_valid_name(entered) {
                names.push(title_case(entered));
                rejected = false;
                tracing::debug!("Accepted name {}/{}", names.len(), target);
            } else {
                rejected = true;
                tracing::debug!("Rejected name {:?}", entered);
            }
        }

        Ok(names)
    }

    /// `true` to continue with these names, `false` to enter them again.
    pub fn confirm_names<P: Prompt + ?Sized>(
        &self,
        prompt: &mut P,
        names: &[String],
    ) -> Result<bool> {
        let message = format!("Names entered:\n{}", names.join(", "));

        resumable(prompt, "confirm_names", |p| {
            match p.choose(&message, &CONFIRM_LABELS)? {
                0 => Ok(true),
                1 => Ok(false),
                _ => Err(MergeError::cancelled()),
            }
        })
    }

    /// Asks for a names file until one contains the delimiter.
    pub fn load_from_file<P: Prompt + ?Sized>(&self, prompt: &mut P) -> Result<RecipientList> {
        prompt.notify(
            Notice::Info,
            &format!(
                "Please make sure to separate the names with a comma, i.e. \"{}\".",
                self.settings.delimiter()
            ),
        )?;

        loop {
            let content = resumable(prompt, "names_file", |p| {
                let path = p.file_path(NAMES_FILE_TITLE)?;
                tracing::debug!("Reading names from {}", path.display());
                self.storage.read_to_string(&path)
            })?;

            match self.parse_names(&content) {
                Ok(recipients) => {
                    tracing::info!("Loaded {} names from file", recipients.len());
                    return Ok(recipients);
                }
                Err(message) => {
                    tracing::warn!("Names file rejected: {}", message);
                    prompt.notify(Notice::Warning, &message)?;
                }
            }
        }
    }

    /// Splits file content on the delimiter. Names are kept verbatim unless
    /// `names.validate_file_names` is set; only trailing line breaks are dropped.
    pub fn parse_names(&self, content: &str) -> std::result::Result<RecipientList, String> {
        let delimiter = self.settings.delimiter();
        let content = content.trim_end_matches(['\n', '\r']);

        if !content.contains(delimiter) {
            return Err(format!(
                "Please enter the names separated by \"{}\".",
                delimiter
            ));
        }

        let names: Vec<String> = content.split(delimiter).map(str::to_string).collect();

        if self.settings.names.validate_file_names {
            let invalid = invalid_names(&names);
            if !invalid.is_empty() {
                return Err(format!("These names are not valid: {:?}", invalid));
            }
        }

        Ok(RecipientList::new(names))
    }
}
