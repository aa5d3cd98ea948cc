//! Question/answer capability used by `all`, `route` and `init`.
//!
//! Commands never talk to the terminal directly; they receive a
//! [`Prompter`].  Interactive terminals get [`DialoguerPrompter`] (with the
//! `interactive` feature), everything else a [`LinePrompter`] reading one line
//! per question.

use std::io::{self, BufRead, Write};

use crate::error::{CliError, CliResult, IntoCli};

/// Synchronous question/answer capability.
pub trait Prompter {
    /// Yes/no question.  An empty answer takes `default`.
    fn confirm(&mut self, question: &str, default: bool) -> CliResult<bool>;

    /// Free-text question.  An empty answer takes `default`.
    fn input(&mut self, question: &str, default: &str) -> CliResult<String>;
}

/// Pick the prompter for this process.
#[cfg(feature = "interactive")]
pub fn default_prompter() -> Box<dyn Prompter> {
    use std::io::IsTerminal as _;

    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        Box::new(DialoguerPrompter)
    } else {
        Box::new(LinePrompter::stdio())
    }
}

/// Pick the prompter for this process.
#[cfg(not(feature = "interactive"))]
pub fn default_prompter() -> Box<dyn Prompter> {
    Box::new(LinePrompter::stdio())
}

// ── dialoguer ─────────────────────────────────────────────────────────────────

/// Terminal prompts rendered by `dialoguer`.
#[cfg(feature = "interactive")]
pub struct DialoguerPrompter;

#[cfg(feature = "interactive")]
impl Prompter for DialoguerPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> CliResult<bool> {
        dialoguer::Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(prompt_failed)
    }

    fn input(&mut self, question: &str, default: &str) -> CliResult<String> {
        dialoguer::Input::<String>::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt(question)
            .default(default.to_string())
            .interact_text()
            .map_err(prompt_failed)
    }
}

#[cfg(feature = "interactive")]
fn prompt_failed(err: dialoguer::Error) -> CliError {
    CliError::InvalidInput {
        message: format!("Failed to read input: {err}"),
        source: Some(Box::new(err)),
    }
}

// ── line based ────────────────────────────────────────────────────────────────

/// Prompts written to `writer`, answers read line by line from `reader`.
///
/// End of input while waiting for an answer is [`CliError::Cancelled`].
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl LinePrompter<io::StdinLock<'static>, io::Stderr> {
    /// Questions on stderr, answers from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, prompt: &str) -> CliResult<String> {
        write!(self.writer, "{prompt} ").with_cli_context(|| "failed to write prompt")?;
        self.writer
            .flush()
            .with_cli_context(|| "failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .with_cli_context(|| "failed to read answer")?;
        if read == 0 {
            return Err(CliError::Cancelled);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> CliResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{question} {hint}"))?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {
                    writeln!(self.writer, "Please answer y or n.")
                        .with_cli_context(|| "failed to write prompt")?;
                }
            }
        }
    }

    fn input(&mut self, question: &str, default: &str) -> CliResult<String> {
        let answer = self.ask(&format!("{question} [{default}]:"))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }
}

// ── scripted ──────────────────────────────────────────────────────────────────

/// Pre-recorded answers for command tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    pub confirms: std::collections::VecDeque<bool>,
    pub inputs: std::collections::VecDeque<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn confirming(answer: bool) -> Self {
        Self {
            confirms: [answer].into(),
            ..Self::default()
        }
    }

    pub fn answering<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str, _default: bool) -> CliResult<bool> {
        self.asked.push(question.to_string());
        self.confirms.pop_front().ok_or(CliError::Cancelled)
    }

    fn input(&mut self, question: &str, _default: &str) -> CliResult<String> {
        self.asked.push(question.to_string());
        self.inputs.pop_front().ok_or(CliError::Cancelled)
    }
}
