use crate::config::Settings;
use crate::core::content::ContentCollector;
use crate::core::control::resumable;
use crate::core::merge::MergeEngine;
use crate::core::names::NameCollector;
use crate::domain::model::{LetterTemplate, MergeReport, Notice, RecipientList};
use crate::domain::ports::{FolderOpener, Prompt, Storage};
use crate::utils::error::{MergeError, PromptError, Result};
use std::path::PathBuf;

pub const OUTPUT_DIR_NOTICE: &str = "Now please select the folder where you want to save the letters.";
pub const OUTPUT_DIR_TITLE: &str = "Where do you want to save the mails?";
pub const SUCCESS_MESSAGE: &str = "Your mail merge was successful, congratulations!";

/// State gathered during one run. Each field is written by one step and
/// consumed by the merge.
#[derive(Debug, Default)]
pub struct Session {
    pub recipients: Option<RecipientList>,
    pub template: Option<LetterTemplate>,
    pub output_dir: Option<PathBuf>,
}

/// Names, then letter, then output folder, then merge.
pub struct Workflow<P: Prompt, S: Storage, O: FolderOpener> {
    prompt: P,
    storage: S,
    opener: O,
    settings: Settings,
    session: Session,
}

impl<P: Prompt, S: Storage, O: FolderOpener> Workflow<P, S, O> {
    pub fn new(prompt: P, storage: S, opener: O, settings: Settings) -> Self {
        Self {
            prompt,
            storage,
            opener,
            settings,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn into_prompt(self) -> P {
        self.prompt
    }

    pub fn run(&mut self) -> Result<MergeReport> {
        tracing::info!("Starting mail merge");

        let recipients =
            NameCollector::new(&self.settings, &self.storage).collect(&mut self.prompt)?;
        tracing::info!("Collected {} recipients", recipients.len());
        self.session.recipients = Some(recipients);

        let template =
            ContentCollector::new(&self.settings, &self.storage).collect(&mut self.prompt)?;
        self.session.template = Some(template);

        let output_dir = self.choose_output_dir()?;
        tracing::info!("Letters will be saved to {}", output_dir.display());
        self.session.output_dir = Some(output_dir);

        self.merge()
    }

    /// Asks for an existing folder. No folder is an error shown to the user,
    /// followed by the exit confirmation.
    pub fn choose_output_dir(&mut self) -> Result<PathBuf> {
        self.prompt.notify(Notice::Info, OUTPUT_DIR_NOTICE)?;
        let storage = &self.storage;

        resumable(&mut self.prompt, "output_dir", |p| {
            let dir = match p.directory_path(OUTPUT_DIR_TITLE) {
                Ok(dir) => dir,
                Err(PromptError::Cancelled) => {
                    p.notify(Notice::Error, "No output folder was selected.")?;
                    return Err(MergeError::NoOutputDirectory);
                }
                Err(e) => return Err(e.into()),
            };

            if !storage.is_dir(&dir) {
                return Err(MergeError::ValidationError {
                    message: format!("'{}' is not an existing folder.", dir.display()),
                });
            }
            Ok(dir)
        })
    }

    /// Consumes the session and writes the letters.
    fn merge(&mut self) -> Result<MergeReport> {
        let (recipients, template, output_dir) = match (
            self.session.recipients.take(),
            self.session.template.take(),
            self.session.output_dir.take(),
        ) {
            (Some(recipients), Some(template), Some(output_dir)) => {
                (recipients, template, output_dir)
            }
            _ => {
                return Err(MergeError::ValidationError {
                    message: "the session is incomplete, nothing to merge".to_string(),
                })
            }
        };

        let report = MergeEngine::new(&self.storage, &self.settings).generate(
            &recipients,
            &template,
            &output_dir,
        );

        if !report.is_success() {
            self.prompt.notify(
                Notice::Warning,
                &format!("Some letters could not be written.\n{}", report.summary()),
            )?;
        } else if !report.skipped.is_empty() {
            self.prompt.notify(
                Notice::Info,
                &format!("{}\n{}", SUCCESS_MESSAGE, report.summary()),
            )?;
        } else {
            self.prompt.notify(Notice::Info, SUCCESS_MESSAGE)?;
        }

        if self.settings.merge.open_output_dir {
            if let Err(e) = self.opener.open(&output_dir) {
                tracing::warn!("Could not open {}: {}", output_dir.display(), e);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::opener::NoopOpener;
    use crate::adapters::scripted::{Answer, ScriptedPrompt};
    use crate::adapters::storage::LocalStorage;
    use crate::core::control::EXIT_QUESTION;
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<PathBuf>>,
        fail: bool,
    }

    impl FolderOpener for &RecordingOpener {
        fn open(&self, dir: &Path) -> std::io::Result<()> {
            self.opened.borrow_mut().push(dir.to_path_buf());
            if self.fail {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no file browser",
                ));
            }
            Ok(())
        }
    }

    fn text(s: &str) -> Answer {
        Answer::Text(s.to_string())
    }

    fn choose(s: &str) -> Answer {
        Answer::Choose(s.to_string())
    }

    #[test]
    fn test_output_dir_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = ScriptedPrompt::new([
            Answer::Path(temp_dir.path().join("missing")),
            Answer::Dismiss,
            Answer::Confirm(false),
            Answer::Path(temp_dir.path().to_path_buf()),
        ]);
        let mut workflow = Workflow::new(
            prompt,
            LocalStorage::default(),
            NoopOpener,
            Settings::default(),
        );

        let dir = workflow.choose_output_dir().unwrap();

        assert_eq!(dir, temp_dir.path());
        let errors = workflow.prompt().notices(Notice::Error);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("is not an existing folder"));
        assert_eq!(errors[1], "No output folder was selected.");
        assert!(workflow.prompt().asked().contains(&EXIT_QUESTION));
    }

    #[test]
    fn test_run_opens_output_folder_best_effort() {
        let temp_dir = TempDir::new().unwrap();
        let opener = RecordingOpener {
            fail: true,
            ..Default::default()
        };
        let prompt = ScriptedPrompt::new([
            choose("Manual Insert"),
            Answer::Integer(2),
            text("alice"),
            text("bob"),
            choose("Continue"),
            choose("Type Letter Content"),
            text("Dear [name]"),
            Answer::Path(temp_dir.path().to_path_buf()),
        ]);
        let mut workflow =
            Workflow::new(prompt, LocalStorage::default(), &opener, Settings::default());

        let report = workflow.run().unwrap();

        assert!(report.is_success());
        assert_eq!(opener.opened.borrow().as_slice(), [temp_dir.path()]);
        assert!(workflow.session().recipients.is_none());
        assert_eq!(
            workflow.prompt().notices(Notice::Info).last(),
            Some(&SUCCESS_MESSAGE)
        );
    }

    #[test]
    fn test_open_disabled_by_settings() {
        let temp_dir = TempDir::new().unwrap();
        let opener = RecordingOpener::default();
        let mut settings = Settings::default();
        settings.merge.open_output_dir = false;
        let names = temp_dir.path().join("names.txt");
        std::fs::write(&names, "Ann, Ben").unwrap();

        let prompt = ScriptedPrompt::new([
            choose("Text File"),
            Answer::Path(names),
            choose("Type Letter Content"),
            text("Hi [name]"),
            Answer::Path(temp_dir.path().to_path_buf()),
        ]);
        let mut workflow = Workflow::new(prompt, LocalStorage::default(), &opener, settings);

        workflow.run().unwrap();
        assert!(opener.opened.borrow().is_empty());
    }
}
