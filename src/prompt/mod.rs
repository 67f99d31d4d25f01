//! The prompt engine.
//!
//! Every prompt runs the same loop: render the question, read an answer,
//! check it, and either resolve or show the reason on the line below and
//! ask again in place. The loop has no attempt limit; only a closed or
//! interrupted input stream ends it without a value.

mod choice;
pub(crate) mod render;
mod select;

use log::debug;

pub use select::NO_SELECTION;

use crate::{
    config::PrompterConfig,
    error::{PromptError, PromptResult},
    spinner::{LineGuard, Spinner},
    terminal::{StdTerminal, Terminal},
    validation::{SemVer, ValidationResult, Validator},
};
use render::Painter;

/// Outcome of checking one submitted line.
#[derive(Debug)]
pub(crate) enum Attempt<R> {
    Resolved(R),
    Retry(String),
}

/// Solicits input from a terminal.
///
/// A `Prompter` owns its terminal. All prompt methods block until a valid
/// answer exists and must not run while a [`Spinner`] started from the same
/// prompter is still running; doing so fails with
/// [`PromptError::TerminalBusy`].
pub struct Prompter<T: Terminal = StdTerminal> {
    terminal: T,
    config: PrompterConfig,
    line: LineGuard,
}

impl Default for Prompter<StdTerminal> {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter<StdTerminal> {
    /// Creates a prompter on stdin/stdout with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::stdio(PrompterConfig::default())
    }

    /// Creates a prompter on stdin/stdout.
    #[must_use]
    pub fn stdio(config: PrompterConfig) -> Self {
        Self::with_terminal(StdTerminal::new(), config)
    }
}

impl<T: Terminal> Prompter<T> {
    #[must_use]
    pub fn with_terminal(terminal: T, config: PrompterConfig) -> Self {
        Self {
            terminal,
            config,
            line: LineGuard::default(),
        }
    }

    #[must_use]
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    #[must_use]
    pub fn config(&self) -> &PrompterConfig {
        &self.config
    }

    /// Prompts for a line of text without validation.
    ///
    /// Returns the trimmed input, which may be empty.
    pub fn prompt(&mut self, message: &str) -> PromptResult<String> {
        self.ask(message, None, "", |line| {
            Attempt::Resolved(line.trim().to_string())
        })
    }

    /// Prompts until `validator` accepts the trimmed input.
    pub fn prompt_validated<V>(&mut self, message: &str, validator: &V) -> PromptResult<String>
    where
        V: Validator + ?Sized,
    {
        self.ask(message, None, "", |line| check(validator, line.trim()))
    }

    /// Prompts with the input pre-filled with `default`.
    ///
    /// Submitting the untouched default or an empty line returns `default`
    /// without consulting `validator`; defaults are trusted. Any other
    /// input must pass `validator`.
    pub fn prompt_with_default<V>(
        &mut self,
        message: &str,
        default: &str,
        validator: &V,
    ) -> PromptResult<String>
    where
        V: Validator + ?Sized,
    {
        self.ask(message, None, default, |line| {
            let input = line.trim();
            if input.is_empty() || input == default {
                Attempt::Resolved(default.to_string())
            } else {
                check(validator, input)
            }
        })
    }

    /// Prompts for a yes or no answer using the configured labels.
    pub fn yes_or_no(&mut self, message: &str, default: bool) -> PromptResult<bool> {
        let labels = self.config.labels.clone();
        self.yes_or_no_with_labels(message, default, &labels.yes, &labels.no)
    }

    /// Prompts for a yes or no answer with custom labels.
    ///
    /// Case-insensitive prefixes of either label are accepted; an empty
    /// answer returns `default`. Anything else, including a prefix shared
    /// by both labels, shows an error and asks again.
    pub fn yes_or_no_with_labels(
        &mut self,
        message: &str,
        default: bool,
        yes: &str,
        no: &str,
    ) -> PromptResult<bool> {
        let hint = if default {
            format!("({yes}/{})", no.to_lowercase())
        } else {
            format!("({}/{no})", yes.to_lowercase())
        };

        self.ask(message, Some(&hint), "", |line| {
            let input = line.trim();
            if input.is_empty() {
                return Attempt::Resolved(default);
            }
            match parse_answer(input, yes, no) {
                Some(answer) => Attempt::Resolved(answer),
                None => Attempt::Retry(format!("Please answer {yes} or {no}")),
            }
        })
    }

    /// Prompts for a [semantic version](https://semver.org/).
    ///
    /// Invalid versions are rejected and asked for again; only a closed or
    /// interrupted input stream fails.
    pub fn prompt_semver(&mut self, message: &str) -> PromptResult<String> {
        self.prompt_validated(message, &SemVer)
    }

    /// Starts a spinner with the configured interval and frames.
    pub fn start_spinner(&mut self, text: &str) -> PromptResult<Spinner> {
        let interval = self.config.spinner.interval();
        let frames = self.config.spinner.frames.clone();
        self.start_spinner_with(text, interval, frames)
    }

    /// Starts a spinner with an explicit interval and frame sequence.
    ///
    /// An empty `frames` falls back to the configured frames. Intervals
    /// below 10 ms are raised to 10 ms. The spinner
    /// owns the current line until it is terminated or dropped.
    pub fn start_spinner_with(
        &mut self,
        text: &str,
        interval: std::time::Duration,
        frames: Vec<String>,
    ) -> PromptResult<Spinner> {
        let frames = if frames.is_empty() {
            self.config.spinner.frames.clone()
        } else {
            frames
        };

        Spinner::start(
            text,
            interval,
            frames,
            self.terminal.spinner_output(),
            self.terminal.is_interactive(),
            self.painter(),
            self.line.clone(),
        )
    }

    pub(crate) fn painter(&self) -> Painter {
        let interactive = self.terminal.is_interactive();
        let width = if interactive {
            self.terminal.width()
        } else {
            None
        };
        Painter::new(&self.config, interactive, width)
    }

    pub(crate) fn ensure_line_free(&self) -> PromptResult<()> {
        if self.line.is_claimed() {
            return Err(PromptError::TerminalBusy);
        }
        Ok(())
    }

    /// Runs the render/read/check loop until `attempt` resolves.
    pub(crate) fn ask<R>(
        &mut self,
        message: &str,
        hint: Option<&str>,
        initial: &str,
        mut attempt: impl FnMut(&str) -> Attempt<R>,
    ) -> PromptResult<R> {
        self.ensure_line_free()?;

        let painter = self.painter();
        let question = painter.question(message, hint);
        let interactive = self.terminal.is_interactive();
        let mut showing_error = false;

        loop {
            let line = self
                .terminal
                .read_line(&question, initial)?
                .ok_or(PromptError::InputClosed)?;

            match attempt(&line) {
                Attempt::Resolved(value) => {
                    if showing_error {
                        render::clear_error(self.terminal.output(), interactive)?;
                    }
                    return Ok(value);
                }
                Attempt::Retry(reason) => {
                    debug!("Rejected answer to \"{message}\": {reason}");
                    let prompt_rows = painter.rows(&format!("{question}{line}"));
                    render::show_error(
                        self.terminal.output(),
                        &painter,
                        interactive,
                        &painter.error(&reason),
                        prompt_rows,
                    )?;
                    showing_error = true;
                }
            }
        }
    }
}

fn check<V>(validator: &V, input: &str) -> Attempt<String>
where
    V: Validator + ?Sized,
{
    match validator.validate(input) {
        ValidationResult::Valid => Attempt::Resolved(input.to_string()),
        ValidationResult::Invalid(reason) => Attempt::Retry(reason),
    }
}

/// Matches `input` against the yes/no labels.
///
/// An exact match wins; otherwise `input` must be a prefix of exactly one
/// label. Comparison ignores case.
pub(crate) fn parse_answer(input: &str, yes: &str, no: &str) -> Option<bool> {
    let input = input.to_lowercase();
    let yes = yes.to_lowercase();
    let no = no.to_lowercase();

    if input == yes {
        return Some(true);
    }
    if input == no {
        return Some(false);
    }
    match (yes.starts_with(&input), no.starts_with(&input)) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
