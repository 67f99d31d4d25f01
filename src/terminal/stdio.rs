//! Terminal backed by the process's stdin and stdout.

use std::io::{self, BufRead, IsTerminal, Stdout, Write};

use crossterm::{
    QueueableCommand,
    cursor::{MoveDown, MoveToColumn, MoveToNextLine, MoveToPreviousLine, MoveUp},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::Print,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode, size},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use super::{Key, Terminal, visible_width};

/// RAII guard for raw mode.
///
/// Raw mode is restored on drop (even on panic or early return).
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Terminal over stdin/stdout.
///
/// When both streams are attached to a tty, lines are edited in raw mode
/// (so a default value can be pre-filled) and keys are read as events.
/// Otherwise input is read line by line and no cursor control is emitted.
pub struct StdTerminal {
    stdout: Stdout,
    interactive: bool,
    /// Held for the length of a key-input session.
    raw: Option<RawMode>,
    /// Row of the cursor within the line being edited.
    cursor_row: usize,
    /// Rows the line being edited took up when last drawn.
    drawn_rows: usize,
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl StdTerminal {
    /// Creates a terminal, detecting whether stdin and stdout are ttys.
    #[must_use]
    pub fn new() -> Self {
        let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
        Self {
            stdout: io::stdout(),
            interactive,
            raw: None,
            cursor_row: 0,
            drawn_rows: 1,
        }
    }

    /// Enables raw mode unless a key-input session already holds it.
    fn raw_mode(&self) -> io::Result<Option<RawMode>> {
        if self.raw.is_some() {
            Ok(None)
        } else {
            RawMode::enable().map(Some)
        }
    }

    fn read_plain_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.stdout, "{prompt}")?;
        self.stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Redraws `prompt` and the edited value over the previous draw, which
    /// may have wrapped across several rows.
    fn draw_input(&mut self, prompt: &str, input: &Input) -> io::Result<()> {
        let width = self.width().map_or(usize::MAX, usize::from);
        let value = input.value();
        let start = visible_width(prompt);
        let end = start.saturating_add(value.chars().count());
        let target = start.saturating_add(input.cursor());

        // A line that exactly fills its last row leaves the cursor on it.
        let end_row = end.saturating_sub(1).checked_div(width).unwrap_or(0);
        let fills_last_row = end > 0 && end.checked_rem(width) == Some(0);
        let (target_row, target_col) = if target >= end && fills_last_row {
            (end_row, width.saturating_sub(1))
        } else {
            (
                target.checked_div(width).unwrap_or(0),
                target.checked_rem(width).unwrap_or(target),
            )
        };

        move_to_first_column(&mut self.stdout, self.cursor_row)?;
        for row in 0..self.drawn_rows {
            self.stdout.queue(Clear(ClearType::CurrentLine))?;
            if row.saturating_add(1) < self.drawn_rows {
                self.stdout.queue(MoveToNextLine(1))?;
            }
        }
        move_to_first_column(&mut self.stdout, self.drawn_rows.saturating_sub(1))?;

        self.stdout.queue(Print(prompt))?.queue(Print(value))?;
        if end_row > target_row {
            self.stdout.queue(MoveUp(to_u16(end_row.saturating_sub(target_row))))?;
        }
        self.stdout.queue(MoveToColumn(to_u16(target_col)))?;

        self.cursor_row = target_row;
        self.drawn_rows = end_row.saturating_add(1);
        self.stdout.flush()
    }

    /// Moves below the edited line, whatever row the cursor is on.
    fn finish_line(&mut self) -> io::Result<()> {
        let below = self
            .drawn_rows
            .saturating_sub(1)
            .saturating_sub(self.cursor_row);
        if below > 0 {
            self.stdout.queue(MoveDown(to_u16(below)))?;
        }
        self.stdout.queue(Print("\r\n"))?;
        self.stdout.flush()
    }
}

impl Terminal for StdTerminal {
    fn read_line(&mut self, prompt: &str, initial: &str) -> io::Result<Option<String>> {
        if !self.interactive {
            return self.read_plain_line(prompt);
        }

        let _raw = self.raw_mode()?;
        let mut input = Input::new(initial.to_string());
        self.cursor_row = 0;
        self.drawn_rows = 1;

        loop {
            self.draw_input(prompt, &input)?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Enter => {
                        self.finish_line()?;
                        return Ok(Some(input.value().to_string()));
                    }
                    KeyCode::Char('c') if ctrl => {
                        self.finish_line()?;
                        return Err(io::ErrorKind::Interrupted.into());
                    }
                    KeyCode::Char('d') if ctrl && input.value().is_empty() => {
                        self.finish_line()?;
                        return Ok(None);
                    }
                    _ => {
                        input.handle_event(&Event::Key(key));
                    }
                }
            }
        }
    }

    fn read_key(&mut self) -> io::Result<Option<Key>> {
        if !self.interactive {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "key input needs an interactive terminal",
            ));
        }

        let _raw = self.raw_mode()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                let key = match key.code {
                    KeyCode::Char('c') if ctrl => Key::Interrupt,
                    KeyCode::Char('d') if ctrl => return Ok(None),
                    KeyCode::Up => Key::Up,
                    KeyCode::Down => Key::Down,
                    KeyCode::Enter => Key::Enter,
                    KeyCode::Esc => Key::Esc,
                    KeyCode::Char(c) => Key::Char(c),
                    _ => continue,
                };
                return Ok(Some(key));
            }
        }
    }

    fn begin_key_input(&mut self) -> io::Result<()> {
        if self.interactive && self.raw.is_none() {
            self.raw = Some(RawMode::enable()?);
        }
        Ok(())
    }

    fn end_key_input(&mut self) {
        self.raw = None;
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }

    fn spinner_output(&self) -> Box<dyn Write + Send> {
        Box::new(io::stdout())
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn width(&self) -> Option<u16> {
        if !self.interactive {
            return None;
        }
        size().ok().map(|(columns, _)| columns).filter(|columns| *columns > 0)
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn move_to_first_column(out: &mut Stdout, rows_up: usize) -> io::Result<()> {
    if rows_up > 0 {
        out.queue(MoveToPreviousLine(to_u16(rows_up)))?;
    } else {
        out.queue(MoveToColumn(0))?;
    }
    Ok(())
}
