//! In-memory terminal that replays queued input.
//!
//! Used by the test suite and by callers that drive prompts from a script
//! rather than a human.

use std::{
    collections::VecDeque,
    io::{self, Write},
    sync::{Arc, Mutex},
};

use super::{Key, Terminal};

/// A cloneable, thread-safe byte sink.
///
/// Every clone appends to the same buffer, so prompt output and spinner
/// frames written from a background thread end up in one transcript.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, decoded lossily as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.lock().map(|bytes| bytes.len()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .0
            .lock()
            .map_err(|_| io::Error::other("output buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Terminal fed from queued lines and keys.
///
/// Submitted lines are echoed to the output followed by a newline, the way
/// a terminal echoes what the user typed. When the queues run dry the
/// terminal reports end of input.
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    lines: VecDeque<String>,
    keys: VecDeque<Key>,
    output: SharedBuffer,
    interactive: bool,
    width: Option<u16>,
    in_key_input: bool,
    key_input_sessions: usize,
    stray_key_reads: usize,
}

impl Default for ScriptedTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedTerminal {
    /// Creates an interactive terminal with no queued input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: VecDeque::new(),
            keys: VecDeque::new(),
            output: SharedBuffer::new(),
            interactive: true,
            width: None,
            in_key_input: false,
            key_input_sessions: 0,
            stray_key_reads: 0,
        }
    }

    /// Creates a terminal that will answer line reads with `lines`, in order.
    #[must_use]
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terminal = Self::new();
        terminal.lines = lines.into_iter().map(Into::into).collect();
        terminal
    }

    /// Creates a terminal that will answer key reads with `keys`, in order.
    #[must_use]
    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        let mut terminal = Self::new();
        terminal.keys = keys.into_iter().collect();
        terminal
    }

    /// Marks the terminal as non-interactive (no redraw-in-place).
    #[must_use]
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    /// Reports a fixed width, so long lines count as wrapped.
    #[must_use]
    pub fn with_width(mut self, columns: u16) -> Self {
        self.width = Some(columns);
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Returns a handle to the recorded output.
    #[must_use]
    pub fn output_buffer(&self) -> SharedBuffer {
        self.output.clone()
    }

    /// Everything rendered so far, escape sequences included.
    #[must_use]
    pub fn transcript(&self) -> String {
        self.output.contents()
    }

    /// Number of queued lines not yet consumed.
    #[must_use]
    pub fn pending_lines(&self) -> usize {
        self.lines.len()
    }

    /// Whether a key-input session is open.
    #[must_use]
    pub fn in_key_input(&self) -> bool {
        self.in_key_input
    }

    /// Number of key-input sessions opened so far.
    #[must_use]
    pub fn key_input_sessions(&self) -> usize {
        self.key_input_sessions
    }

    /// Keys read while no key-input session was open.
    #[must_use]
    pub fn stray_key_reads(&self) -> usize {
        self.stray_key_reads
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&mut self, prompt: &str, _initial: &str) -> io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes())?;
        let Some(line) = self.lines.pop_front() else {
            return Ok(None);
        };
        writeln!(self.output, "{line}")?;
        Ok(Some(line))
    }

    fn read_key(&mut self) -> io::Result<Option<Key>> {
        if !self.in_key_input {
            self.stray_key_reads = self.stray_key_reads.saturating_add(1);
        }
        Ok(self.keys.pop_front())
    }

    fn begin_key_input(&mut self) -> io::Result<()> {
        if !self.in_key_input {
            self.in_key_input = true;
            self.key_input_sessions = self.key_input_sessions.saturating_add(1);
        }
        Ok(())
    }

    fn end_key_input(&mut self) {
        self.in_key_input = false;
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    fn spinner_output(&self) -> Box<dyn Write + Send> {
        Box::new(self.output.clone())
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn width(&self) -> Option<u16> {
        self.width
    }
}
