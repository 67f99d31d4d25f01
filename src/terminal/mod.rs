//! Terminal I/O adapter.
//!
//! The prompt engine and the spinner only talk to the terminal through the
//! [`Terminal`] trait:
//! - `StdTerminal` - stdin/stdout, raw-mode line editing when attached to a tty
//! - `ScriptedTerminal` - replays queued input and records output in memory

mod scripted;
mod stdio;

use std::io::{self, Write};

pub use scripted::{ScriptedTerminal, SharedBuffer};
pub use stdio::StdTerminal;

/// A navigation key read by list selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Esc,
    /// Ctrl+C
    Interrupt,
    Char(char),
}

/// The terminal a prompt or spinner renders to.
pub trait Terminal {
    /// Draws `prompt` and reads one line, pre-filled with `initial` where the
    /// terminal supports editing.
    ///
    /// Returns `Ok(None)` at end of input. Ctrl+C surfaces as an
    /// [`io::ErrorKind::Interrupted`] error.
    fn read_line(&mut self, prompt: &str, initial: &str) -> io::Result<Option<String>>;

    /// Reads a single navigation key. Returns `Ok(None)` at end of input.
    ///
    /// Only called on interactive terminals; list prompts read whole lines
    /// everywhere else.
    fn read_key(&mut self) -> io::Result<Option<Key>>;

    /// Keeps the terminal in key-reading mode across `read_key` calls until
    /// [`Terminal::end_key_input`]. Lines written meanwhile must end in
    /// `\r\n`.
    fn begin_key_input(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn end_key_input(&mut self) {}

    /// The stream prompts are rendered to.
    fn output(&mut self) -> &mut dyn Write;

    /// A handle the spinner's background thread writes frames through.
    fn spinner_output(&self) -> Box<dyn Write + Send>;

    /// Whether cursor movement and redraw-in-place are available.
    fn is_interactive(&self) -> bool;

    /// Width in columns, when known. Lines longer than this wrap.
    fn width(&self) -> Option<u16> {
        None
    }
}

/// Columns `text` takes up on screen. CSI escape sequences take none.
pub(crate) fn visible_width(text: &str) -> usize {
    let mut width = 0usize;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.next() == Some('[') {
                // parameters, then a final byte in `@..=~`
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
        } else if !c.is_control() {
            width = width.saturating_add(1);
        }
    }
    width
}

/// Screen rows `text` occupies when printed from the first column of a
/// terminal `width` columns wide. Always at least one.
pub(crate) fn screen_rows(text: &str, width: Option<u16>) -> usize {
    let columns = visible_width(text);
    match width.map(usize::from) {
        Some(width) if width > 0 && columns > 0 => columns.div_ceil(width),
        _ => 1,
    }
}
