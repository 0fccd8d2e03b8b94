//! Terminal implementations of the host capabilities.

use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use devhq_notes::NoteOpener;
use devhq_panel::{InputRequest, Prompter};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Prompts on stderr and reads answers from stdin.
///
/// Answers given on the command line are consumed first; stdin is only
/// read once they run out.
pub struct TerminalPrompter {
    answers: Mutex<VecDeque<String>>,
    assume_yes: bool,
    stdin: tokio::sync::Mutex<Lines<BufReader<Stdin>>>,
    failure: Mutex<Option<String>>,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    /// Create a prompter with no queued answers that asks before confirming.
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            assume_yes: false,
            stdin: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            failure: Mutex::new(None),
        }
    }

    /// The last error notice shown, if any.
    pub fn failure(&self) -> Option<String> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Queue an answer for the next input prompt.
    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(answer.into());
        self
    }

    /// Accept every confirmation without asking.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    async fn read_line(&self, prompt: &str) -> Option<String> {
        eprint!("{prompt}");
        let _ = std::io::stderr().flush();
        self.stdin.lock().await.next_line().await.ok().flatten()
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn input(&self, request: InputRequest) -> Option<String> {
        let queued = self
            .answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        if let Some(answer) = queued {
            if let Some(message) = request.check(&answer) {
                eprintln!("{message}");
                return None;
            }
            return Some(answer);
        }

        let prompt = match (&request.value, &request.placeholder) {
            (Some(value), _) => format!("{} [{value}]: ", request.prompt),
            (None, Some(placeholder)) => format!("{} ({placeholder}): ", request.prompt),
            (None, None) => format!("{}: ", request.prompt),
        };

        loop {
            let line = self.read_line(&prompt).await?;
            let answer = match &request.value {
                Some(value) if line.is_empty() => value.clone(),
                _ => line,
            };
            match request.check(&answer) {
                Some(message) => eprintln!("{message}"),
                None => return Some(answer),
            }
        }
    }

    async fn confirm(&self, message: &str, action: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let Some(line) = self.read_line(&format!("{message} [{action}/Cancel]: ")).await else {
            return false;
        };
        let line = line.trim();
        line.eq_ignore_ascii_case(action)
            || line.eq_ignore_ascii_case("y")
            || line.eq_ignore_ascii_case("yes")
    }

    async fn show_error(&self, message: &str) {
        eprintln!("error: {message}");
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }
}

/// Prints the paths it is asked to show, for editors and scripts to pick up.
pub struct TerminalOpener;

#[async_trait]
impl NoteOpener for TerminalOpener {
    async fn open(&self, path: &Path) -> std::io::Result<()> {
        println!("{}", path.display());
        Ok(())
    }

    async fn reveal(&self, dir: &Path) -> std::io::Result<()> {
        println!("{}", dir.display());
        Ok(())
    }
}
