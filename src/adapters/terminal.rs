//! Line-based terminal dialogs.
//!
//! A line containing only `:q` dismisses a dialog, the terminal equivalent of
//! closing a window. End of input (Ctrl-D, or a drained pipe) closes the
//! prompt for good and every later question fails with [`PromptError::Closed`].

use crate::domain::model::Notice;
use crate::domain::ports::{Prompt, PromptResult};
use crate::utils::error::PromptError;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

const DISMISS: &str = ":q";
const END_OF_LETTER: &str = ".";

pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub prompt_prefix: String,
    pub prompt_suffix: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            prompt_prefix: "?".to_string(),
            prompt_suffix: "›".to_string(),
        }
    }
}

impl Theme {
    pub fn ascii() -> Self {
        Self {
            prompt_prefix: "?".to_string(),
            prompt_suffix: ">".to_string(),
        }
    }
}

pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    theme: Theme,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        let theme = if is_interactive() {
            Theme::default()
        } else {
            Theme::ascii()
        };
        Self::new(io::stdin().lock(), io::stdout()).with_theme(theme)
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, message: &str) -> PromptResult<()> {
        write!(
            self.output,
            "{} {} {} ",
            self.theme.prompt_prefix, message, self.theme.prompt_suffix
        )?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads one line without its terminator. `None` on the dismiss token.
    fn read_line(&mut self) -> PromptResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(PromptError::Closed);
        }

        let line = line.trim_end_matches(['\n', '\r']).to_string();
        if line.trim() == DISMISS {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn read_answer(&mut self) -> PromptResult<String> {
        self.read_line()?.ok_or(PromptError::Cancelled)
    }

    fn read_path(&mut self, title: &str) -> PromptResult<PathBuf> {
        self.ask(title)?;
        let answer = self.read_answer()?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(PromptError::Cancelled);
        }
        Ok(PathBuf::from(answer))
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn choose(&mut self, message: &str, options: &[&str]) -> PromptResult<usize> {
        writeln!(self.output, "{}", message)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option)?;
        }

        loop {
            self.ask("Choose")?;
            let answer = self.read_answer()?;
            let answer = answer.trim();

            if let Ok(number) = answer.parse::<usize>() {
                if (1..=options.len()).contains(&number) {
                    return Ok(number - 1);
                }
            }
            if let Some(index) = options
                .iter()
                .position(|option| option.eq_ignore_ascii_case(answer))
            {
                return Ok(index);
            }

            writeln!(
                self.output,
                "Please pick a number between 1 and {}.",
                options.len()
            )?;
        }
    }

    fn text(&mut self, title: &str, message: &str, multiline: bool) -> PromptResult<String> {
        writeln!(self.output, "[{}]", title)?;

        if !multiline {
            self.ask(message)?;
            return self.read_answer();
        }

        writeln!(
            self.output,
            "{} (finish with a line containing only \"{}\")",
            message, END_OF_LETTER
        )?;
        self.output.flush()?;

        let mut lines = Vec::new();
        loop {
            match self.read_line() {
                Ok(Some(line)) if line == END_OF_LETTER => break,
                Ok(Some(line)) => lines.push(line),
                Ok(None) if lines.is_empty() => return Err(PromptError::Cancelled),
                Ok(None) => break,
                Err(PromptError::Closed) if !lines.is_empty() => break,
                Err(e) => return Err(e),
            }
        }
        Ok(lines.join("\n"))
    }

    fn integer(&mut self, title: &str, message: &str) -> PromptResult<i64> {
        writeln!(self.output, "[{}]", title)?;
        self.ask(message)?;
        let answer = self.read_answer()?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(PromptError::Cancelled);
        }
        answer
            .parse::<i64>()
            .map_err(|_| PromptError::InvalidInput(format!("'{}' is not a whole number", answer)))
    }

    fn file_path(&mut self, title: &str) -> PromptResult<PathBuf> {
        self.read_path(title)
    }

    fn directory_path(&mut self, title: &str) -> PromptResult<PathBuf> {
        self.read_path(title)
    }

    fn confirm(&mut self, message: &str) -> PromptResult<bool> {
        loop {
            self.ask(&format!("{} [y/n]", message))?;
            let answer = self.read_answer()?;
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                "" => return Err(PromptError::Cancelled),
                _ => writeln!(self.output, "Please answer yes or no.")?,
            }
        }
    }

    fn notify(&mut self, notice: Notice, message: &str) -> PromptResult<()> {
        writeln!(self.output, "[{}] {}", notice, message)?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> TerminalPrompt<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_choose_by_number_or_label() {
        let options = ["Manual Insert", "Text File"];

        let mut p = prompt("2\n");
        assert_eq!(p.choose("How?", &options).unwrap(), 1);

        let mut p = prompt("manual insert\n");
        assert_eq!(p.choose("How?", &options).unwrap(), 0);
    }

    #[test]
    fn test_choose_reasks_on_unknown_answer() {
        let mut p = prompt("7\nfax\n1\n");
        assert_eq!(p.choose("How?", &["A", "B"]).unwrap(), 0);

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("Please pick a number").count(), 2);
    }

    #[test]
    fn test_dismissal() {
        let mut p = prompt(":q\n");
        assert!(matches!(
            p.choose("How?", &["A", "B"]),
            Err(PromptError::Cancelled)
        ));

        let mut p = prompt(":q\n");
        assert!(matches!(
            p.text("Name", "Please enter the name:", false),
            Err(PromptError::Cancelled)
        ));

        let mut p = prompt("\n");
        assert!(matches!(
            p.directory_path("Where?"),
            Err(PromptError::Cancelled)
        ));
    }

    #[test]
    fn test_single_line_text_keeps_empty_answer() {
        let mut p = prompt("\n");
        assert_eq!(p.text("Name", "Please enter the name:", false).unwrap(), "");
    }

    #[test]
    fn test_multiline_text() {
        let mut p = prompt("Dear [name],\r\n\r\nSee you soon.\n.\nignored\n");
        assert_eq!(
            p.text("Mail Merge", "Enter the body of the letter", true)
                .unwrap(),
            "Dear [name],\n\nSee you soon."
        );

        let mut p = prompt("Dear [name],\nBye");
        assert_eq!(
            p.text("Mail Merge", "Enter the body of the letter", true)
                .unwrap(),
            "Dear [name],\nBye"
        );

        let mut p = prompt(":q\n");
        assert!(matches!(
            p.text("Mail Merge", "Enter the body of the letter", true),
            Err(PromptError::Cancelled)
        ));

        let mut p = prompt("");
        assert!(matches!(
            p.text("Mail Merge", "Enter the body of the letter", true),
            Err(PromptError::Closed)
        ));
    }

    #[test]
    fn test_integer() {
        let mut p = prompt(" 3 \n");
        assert_eq!(p.integer("No. of People", "How many?").unwrap(), 3);

        let mut p = prompt("three\n");
        assert!(matches!(
            p.integer("No. of People", "How many?"),
            Err(PromptError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_confirm() {
        let mut p = prompt("maybe\nYES\n");
        assert!(p.confirm("Do you want to exit?").unwrap());

        let mut p = prompt("n\n");
        assert!(!p.confirm("Do you want to exit?").unwrap());

        let mut p = prompt("\n");
        assert!(matches!(
            p.confirm("Do you want to exit?"),
            Err(PromptError::Cancelled)
        ));
    }

    #[test]
    fn test_end_of_input_closes_every_dialog() {
        let mut p = prompt("");
        assert!(matches!(
            p.choose("How?", &["A", "B"]),
            Err(PromptError::Closed)
        ));
        assert!(matches!(
            p.confirm("Do you want to exit?"),
            Err(PromptError::Closed)
        ));
        assert!(matches!(
            p.file_path("Select the names text file"),
            Err(PromptError::Closed)
        ));
    }

    #[test]
    fn test_notify_writes_level() {
        let mut p = prompt("");
        p.notify(Notice::Warning, "Placeholder missing").unwrap();
        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output, "[warning] Placeholder missing\n");
    }
}
