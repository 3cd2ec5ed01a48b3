//! Blocking user dialogs.
//!
//! The admin controller never talks to a terminal directly. It asks an
//! [`Interaction`] to notify, confirm or request text, and each of those calls
//! blocks until the user has answered.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::warn;

/// Synchronous user-interaction capability.
pub trait Interaction {
    /// Show a message and wait for the user to acknowledge it.
    fn notify(&mut self, message: &str);

    /// Ask a yes/no question. `false` when declined or dismissed.
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for a line of text, pre-filled with `default`.
    ///
    /// `None` means the user cancelled.
    fn request_text(&mut self, message: &str, default: &str) -> Option<String>;
}

/// Dialogs on a line-oriented terminal.
///
/// End of input cancels a prompt. An empty answer to a text prompt keeps the
/// pre-filled value.
#[derive(Debug)]
pub struct TerminalInteraction<R, W> {
    input: R,
    output: W,
}

impl TerminalInteraction<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Dialogs on the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalInteraction<R, W> {
    /// Dialogs over arbitrary reader and writer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect what was shown.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show `prompt` and read one line of input, without the line ending.
    ///
    /// `None` at end of input or when the terminal fails.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        if let Err(err) = write!(self.output, "{prompt} ").and_then(|()| self.output.flush()) {
            warn!("Failed to show prompt: {}", err);
            return None;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!("Failed to read answer: {}", err);
                None
            }
        }
    }

    /// Write `text` as is.
    pub fn print(&mut self, text: &str) {
        let written = self
            .output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush());
        if let Err(err) = written {
            warn!("Failed to write output: {}", err);
        }
    }
}

impl<R: BufRead, W: Write> Interaction for TerminalInteraction<R, W> {
    fn notify(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "{message}") {
            warn!("Failed to show message: {}", err);
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        let Some(answer) = self.read_line(&format!("{message} [y/N]")) else {
            return false;
        };
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn request_text(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = self.read_line(&format!("{message} [{default}]"))?;
        if answer.is_empty() {
            Some(default.to_string())
        } else {
            Some(answer)
        }
    }
}

/// Pre-recorded answers, for non-interactive use and tests.
///
/// Answers are consumed in order. With nothing queued, confirmations are
/// declined and text prompts are cancelled. Every message and prompt shown is
/// recorded.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    confirms: VecDeque<bool>,
    texts: VecDeque<Option<String>>,
    notifications: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedInteraction {
    /// No queued answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next confirmation.
    #[must_use]
    pub fn with_confirm(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    /// Queue an answer for the next text prompt (`None` cancels it).
    #[must_use]
    pub fn with_text(mut self, answer: Option<&str>) -> Self {
        self.texts.push_back(answer.map(str::to_string));
        self
    }

    /// Messages passed to [`Interaction::notify`], oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Questions asked through `confirm` and `request_text`, oldest first.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Interaction for ScriptedInteraction {
    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    fn request_text(&mut self, message: &str, default: &str) -> Option<String> {
        self.prompts.push(format!("{message} [{default}]"));
        self.texts.pop_front().flatten()
    }
}

impl<T: Interaction + ?Sized> Interaction for &mut T {
    fn notify(&mut self, message: &str) {
        (**self).notify(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn request_text(&mut self, message: &str, default: &str) -> Option<String> {
        (**self).request_text(message, default)
    }
}
