use crate::config::Settings;
use crate::core::control::{resumable, TITLE};
use crate::domain::model::{ContentSource, LetterTemplate, Notice};
use crate::domain::ports::{Prompt, Storage};
use crate::utils::error::{MergeError, Result};
use crate::utils::validation::has_placeholder;

pub const SOURCE_QUESTION: &str = "Do you want to browse the file or paste the letter content?";
pub const LETTER_FILE_TITLE: &str = "Select your mail";
pub const LETTER_BODY_QUESTION: &str = "Enter the body of the letter";
pub const MISSING_PLACEHOLDER_QUESTION: &str =
    "Do you want to provide the letter again, or continue without personalization?";
pub const MISSING_PLACEHOLDER_LABELS: [&str; 2] = ["Re-enter Content", "Proceed Anyway"];

/// Obtains the letter template from a file or from typed text.
pub struct ContentCollector<'a, S: Storage> {
    settings: &'a Settings,
    storage: &'a S,
}

impl<'a, S: Storage> ContentCollector<'a, S> {
    pub fn new(settings: &'a Settings, storage: &'a S) -> Self {
        Self { settings, storage }
    }

    /// Loops until the template has a placeholder or the user proceeds without one.
    /// Every retry starts again at the Browse / Type choice.
    pub fn collect<P: Prompt + ?Sized>(&self, prompt: &mut P) -> Result<LetterTemplate> {
        let placeholder = self.settings.placeholder();

        loop {
            let template = resumable(prompt, "letter_content", |p| self.acquire(p))?;

            if has_placeholder(template.content(), placeholder) {
                tracing::info!(
                    "Letter has {} placeholder occurrence(s)",
                    template.occurrences(placeholder)
                );
                return Ok(template);
            }

            tracing::warn!("Placeholder {} missing from letter", placeholder);
            prompt.notify(
                Notice::Warning,
                &format!(
                    "Warning: Placeholder '{}' is not in the letter body",
                    placeholder
                ),
            )?;

            let proceed = resumable(prompt, "missing_placeholder", |p| {
                Ok(p.choose(MISSING_PLACEHOLDER_QUESTION, &MISSING_PLACEHOLDER_LABELS)? == 1)
            })?;
            if proceed {
                tracing::info!("Proceeding without placeholder");
                return Ok(template);
            }
        }
    }

    /// One pass: pick a source, then read the file or the typed body.
    pub fn acquire<P: Prompt + ?Sized>(&self, prompt: &mut P) -> Result<LetterTemplate> {
        let index = prompt.choose(SOURCE_QUESTION, &ContentSource::LABELS)?;
        let source = ContentSource::from_index(index).ok_or_else(MergeError::cancelled)?;

        prompt.notify(
            Notice::Info,
            &format!(
                "Please make sure that in your file type '{}' where you want each person's name to go.",
                self.settings.placeholder()
            ),
        )?;

        match source {
            ContentSource::Browse => {
                let path = prompt.file_path(LETTER_FILE_TITLE)?;
                tracing::debug!("Reading letter from {}", path.display());
                let content = self.storage.read_to_string(&path)?;
                Ok(LetterTemplate::new(content))
            }
            ContentSource::Type => {
                let content = prompt.text(TITLE, LETTER_BODY_QUESTION, true)?;
                if content.is_empty() {
                    return Err(MergeError::cancelled());
                }
                Ok(LetterTemplate::new(content))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::{Answer, ScriptedPrompt};
    use crate::adapters::storage::LocalStorage;
    use crate::core::control::EXIT_QUESTION;
    use tempfile::TempDir;

    fn choose(label: &str) -> Answer {
        Answer::Choose(label.to_string())
    }

    #[test]
    fn test_typed_letter_with_placeholder() {
        let settings = Settings::default();
        let storage = LocalStorage::default();
        let collector = ContentCollector::new(&settings, &storage);
        let mut prompt = ScriptedPrompt::new([
            choose("Type Letter Content"),
            Answer::Text("Dear [name], welcome!".into()),
        ]);

        let template = collector.collect(&mut prompt).unwrap();

        assert_eq!(template.content(), "Dear [name], welcome!");
        assert!(prompt.notices(Notice::Warning).is_empty());
        assert_eq!(prompt.notices(Notice::Info).len(), 1);
    }

    #[test]
    fn test_browsed_letter() {
        let temp_dir = TempDir::new().unwrap();
        let letter = temp_dir.path().join("letter.txt");
        std::fs::write(&letter, "Hello [name]\n").unwrap();

        let settings = Settings::default();
        let storage = LocalStorage::default();
        let collector = ContentCollector::new(&settings, &storage);
        let mut prompt = ScriptedPrompt::new([choose("Browse"), Answer::Path(letter)]);

        let template = collector.collect(&mut prompt).unwrap();
        assert_eq!(template.content(), "Hello [name]\n");
    }

    #[test]
    fn test_missing_placeholder_can_be_reentered() {
        let settings = Settings::default();
        let storage = LocalStorage::default();
        let collector = ContentCollector::new(&settings, &storage);
        let mut prompt = ScriptedPrompt::new([
            choose("Type Letter Content"),
            Answer::Text("Dear friend".into()),
            choose("Re-enter Content"),
            choose("Type Letter Content"),
            Answer::Text("Dear [name]".into()),
        ]);

        let template = collector.collect(&mut prompt).unwrap();

        assert_eq!(template.content(), "Dear [name]");
        assert_eq!(prompt.notices(Notice::Warning).len(), 1);
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn test_missing_placeholder_proceed_anyway_warns_once() {
        let settings = Settings::default();
        let storage = LocalStorage::default();
        let collector = ContentCollector::new(&settings, &storage);
        let mut prompt = ScriptedPrompt::new([
            choose("Type Letter Content"),
            Answer::Text("Dear friend".into()),
            choose("Proceed Anyway"),
        ]);

        let template = collector.collect(&mut prompt).unwrap();

        assert_eq!(template.content(), "Dear friend");
        assert_eq!(
            prompt.notices(Notice::Warning),
            vec!["Warning: Placeholder '[name]' is not in the letter body"]
        );
    }

    #[test]
    fn test_dismissed_file_picker_restarts_from_source_choice() {
        let settings = Settings::default();
        let storage = LocalStorage::default();
        let collector = ContentCollector::new(&settings, &storage);
        let mut prompt = ScriptedPrompt::new([
            choose("Browse"),
            Answer::Dismiss,
            Answer::Confirm(false),
            choose("Type Letter Content"),
            Answer::Text("Hi [name]".into()),
        ]);

        let template = collector.collect(&mut prompt).unwrap();

        assert_eq!(template.content(), "Hi [name]");
        assert_eq!(
            prompt.asked(),
            vec![
                SOURCE_QUESTION,
                LETTER_FILE_TITLE,
                EXIT_QUESTION,
                SOURCE_QUESTION,
                LETTER_BODY_QUESTION
            ]
        );
    }

    #[test]
    fn test_empty_typed_letter_is_a_dismissal() {
        let settings = Settings::default();
        let storage = LocalStorage::default();
        let collector = ContentCollector::new(&settings, &storage);
        let mut prompt = ScriptedPrompt::new([
            choose("Type Letter Content"),
            Answer::Text(String::new()),
            Answer::Confirm(true),
        ]);

        let err = collector.collect(&mut prompt).unwrap_err();
        assert!(matches!(err, MergeError::Aborted));
    }

    #[test]
    fn test_unreadable_letter_file_is_reported_and_retried() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::default();
        let storage = LocalStorage::default();
        let collector = ContentCollector::new(&settings, &storage);
        let mut prompt = ScriptedPrompt::new([
            choose("Browse"),
            Answer::Path(temp_dir.path().join("nope.txt")),
            choose("Type Letter Content"),
            Answer::Text("Yo [name]".into()),
        ]);

        let template = collector.collect(&mut prompt).unwrap();

        assert_eq!(template.content(), "Yo [name]");
        assert_eq!(
            prompt.notices(Notice::Error),
            vec!["The selected file could not be found."]
        );
    }

    #[test]
    fn test_custom_placeholder() {
        let mut settings = Settings::default();
        settings.merge.placeholder = "{{who}}".to_string();
        let storage = LocalStorage::default();
        let collector = ContentCollector::new(&settings, &storage);
        let mut prompt = ScriptedPrompt::new([
            choose("Type Letter Content"),
            Answer::Text("Hello {{who}}".into()),
        ]);

        assert!(collector.collect(&mut prompt).is_ok());
        assert!(prompt.notices(Notice::Warning).is_empty());
    }
}
