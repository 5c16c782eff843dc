use crate::config::{ConflictPolicy, Settings};
use crate::domain::model::{
    FailedRecipient, LetterTemplate, MergeReport, OutputArtifact, RecipientList,
};
use crate::domain::ports::Storage;
use chrono::Utc;
use std::path::Path;

/// Writes one personalized letter per recipient.
pub struct MergeEngine<'a, S: Storage> {
    storage: &'a S,
    settings: &'a Settings,
}

impl<'a, S: Storage> MergeEngine<'a, S> {
    pub fn new(storage: &'a S, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Renders `merge.file_name` for a recipient. Names that would escape the
    /// output folder or produce no name at all are refused.
    pub fn file_name_for(&self, recipient: &str) -> std::result::Result<String, String> {
        if recipient.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        if recipient.contains(['/', '\\', '\0']) {
            return Err("name contains a path separator".to_string());
        }
        if recipient == "." || recipient == ".." {
            return Err("name is not a valid file name".to_string());
        }
        Ok(self.settings.merge.file_name.replace("{name}", recipient))
    }

    /// Writes every letter in list order. A failed recipient is recorded and
    /// the batch carries on.
    pub fn generate(
        &self,
        recipients: &RecipientList,
        template: &LetterTemplate,
        output_dir: &Path,
    ) -> MergeReport {
        let placeholder = self.settings.placeholder();
        let mut written = Vec::with_capacity(recipients.len());
        let mut skipped = Vec::new();
        let mut failed = Vec::new();

        for recipient in recipients.iter() {
            let file_name = match self.file_name_for(recipient) {
                Ok(file_name) => file_name,
                Err(reason) => {
                    tracing::warn!("Skipping {:?}: {}", recipient, reason);
                    failed.push(FailedRecipient {
                        recipient: recipient.to_string(),
                        reason,
                    });
                    continue;
                }
            };
            let path = output_dir.join(file_name);

            if self.storage.exists(&path) {
                match self.settings.merge.on_conflict {
                    ConflictPolicy::Skip => {
                        tracing::info!("{} already exists, skipping", path.display());
                        skipped.push(recipient.to_string());
                        continue;
                    }
                    ConflictPolicy::Overwrite => {
                        tracing::debug!("Overwriting {}", path.display());
                    }
                }
            }

            let letter = template.personalize(placeholder, recipient);
            match self.storage.write_file(&path, &letter) {
                Ok(()) => {
                    tracing::debug!("Wrote {}", path.display());
                    written.push(OutputArtifact {
                        recipient: recipient.to_string(),
                        path,
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to write {}: {}", path.display(), e);
                    failed.push(FailedRecipient {
                        recipient: recipient.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Merge finished: {} written, {} skipped, {} failed",
            written.len(),
            skipped.len(),
            failed.len()
        );

        MergeReport {
            output_dir: output_dir.to_path_buf(),
            written,
            skipped,
            failed,
            finished_at: Utc::now(),
        }
    }
}
