//! Error type shared by every prompt and the spinner.

use std::io;

use derive_more::{Display, Error};

/// Failures that end a prompt call without a value.
///
/// Rejected input is never an error: it drives a re-prompt inside the
/// engine. Only the conditions below reach the caller.
#[derive(Debug, Display, Error)]
pub enum PromptError {
    /// The input stream ended before a valid answer was entered.
    #[display("input closed before a valid answer was entered")]
    InputClosed,
    /// The user pressed Ctrl+C.
    #[display("prompt interrupted")]
    Interrupted,
    /// A running spinner owns the current terminal line.
    #[display("the terminal line is owned by a running spinner")]
    TerminalBusy,
    /// A required selection was requested from an empty list.
    #[display("a selection is required but no options were given")]
    NoOptions,
    /// Any other terminal I/O failure.
    #[display("terminal I/O error: {_0}")]
    Io(io::Error),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::Interrupted => Self::Interrupted,
            io::ErrorKind::UnexpectedEof => Self::InputClosed,
            _ => Self::Io(err),
        }
    }
}

/// Result type for prompt operations.
pub type PromptResult<T> = Result<T, PromptError>;
