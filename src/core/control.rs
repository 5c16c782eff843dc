use crate::domain::model::Notice;
use crate::domain::ports::Prompt;
use crate::utils::error::{MergeError, PromptError, Result};

pub const TITLE: &str = "Mail Merge";
pub const EXIT_QUESTION: &str = "Do you want to exit?";

/// Asks whether to quit. Dismissing the question counts as "no"; closed input
/// is returned as an error.
pub fn confirm_exit<P: Prompt + ?Sized>(prompt: &mut P) -> Result<bool> {
    match prompt.confirm(EXIT_QUESTION) {
        Ok(answer) => Ok(answer),
        Err(PromptError::Cancelled) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Runs an interactive step until it produces a value.
///
/// A dismissed dialog inside the step raises the exit confirmation: confirming
/// returns [`MergeError::Aborted`], declining runs the step again from its start.
/// Recoverable errors are shown to the user and the step runs again as well.
/// Anything else, closed input included, is returned unchanged.
pub fn resumable<P, T, F>(prompt: &mut P, step: &str, mut run: F) -> Result<T>
where
    P: Prompt + ?Sized,
    F: FnMut(&mut P) -> Result<T>,
{
    loop {
        match run(prompt) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_cancellation() => {
                if confirm_exit(prompt)? {
                    tracing::info!("Exit confirmed during {}", step);
                    return Err(MergeError::Aborted);
                }
                tracing::debug!("Exit declined, resuming {}", step);
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!("{} failed, retrying: {}", step, e);
                prompt.notify(Notice::Error, &e.user_friendly_message())?;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::{Answer, ScriptedPrompt};

    fn ask_name(p: &mut ScriptedPrompt) -> Result<String> {
        Ok(p.text(TITLE, "Please enter the name:", false)?)
    }

    #[test]
    fn test_declined_exit_resumes_step() {
        let mut prompt = ScriptedPrompt::new([
            Answer::Dismiss,
            Answer::Confirm(false),
            Answer::Text("alice".into()),
        ]);

        let name = resumable(&mut prompt, "name_entry", ask_name).unwrap();

        assert_eq!(name, "alice");
        assert_eq!(
            prompt.asked(),
            vec![
                "Please enter the name:",
                EXIT_QUESTION,
                "Please enter the name:"
            ]
        );
    }

    #[test]
    fn test_confirmed_exit_aborts() {
        let mut prompt = ScriptedPrompt::new([Answer::Dismiss, Answer::Confirm(true)]);

        let err = resumable(&mut prompt, "name_entry", ask_name).unwrap_err();
        assert!(matches!(err, MergeError::Aborted));
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn test_dismissed_exit_question_counts_as_no() {
        let mut prompt = ScriptedPrompt::new([
            Answer::Dismiss,
            Answer::Dismiss,
            Answer::Text("bob".into()),
        ]);

        assert_eq!(resumable(&mut prompt, "name_entry", ask_name).unwrap(), "bob");
    }

    #[test]
    fn test_recoverable_error_is_shown_and_retried() {
        let mut prompt = ScriptedPrompt::new([Answer::Text("x".into()), Answer::Integer(4)]);

        let value = resumable(&mut prompt, "recipient_count", |p| {
            Ok(p.integer("No. of People", "How many?")?)
        })
        .unwrap();

        assert_eq!(value, 4);
        assert_eq!(prompt.notices(Notice::Error).len(), 1);
    }

    #[test]
    fn test_closed_terminal_stops_the_step() {
        use crate::adapters::terminal::TerminalPrompt;
        use std::io::Cursor;

        let mut prompt = TerminalPrompt::new(Cursor::new(Vec::new()), Vec::new());

        let err = resumable(&mut prompt, "name_source", |p| {
            Ok(p.choose("Manual or file?", &["Manual Insert", "Text File"])?)
        })
        .unwrap_err();

        assert!(matches!(err, MergeError::PromptError(PromptError::Closed)));
        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert!(!output.contains(EXIT_QUESTION));
    }

    #[test]
    fn test_closed_input_at_exit_question_is_returned() {
        use crate::adapters::terminal::TerminalPrompt;
        use std::io::Cursor;

        let mut prompt = TerminalPrompt::new(Cursor::new(b":q\n".to_vec()), Vec::new());

        let err = resumable(&mut prompt, "name_entry", |p| {
            Ok(p.text(TITLE, "Please enter the name:", false)?)
        })
        .unwrap_err();

        assert!(matches!(err, MergeError::PromptError(PromptError::Closed)));
        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(output.matches(EXIT_QUESTION).count(), 1);
    }

    #[test]
    fn test_fatal_error_is_returned() {
        let mut prompt = ScriptedPrompt::default();

        let err = resumable(&mut prompt, "name_entry", ask_name).unwrap_err();
        assert!(matches!(err, MergeError::PromptError(PromptError::Exhausted)));
    }
}
