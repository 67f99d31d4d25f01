//! Styling and redraw-in-place helpers.

use std::io::{self, Write};

use colored::Colorize;
use crossterm::{
    QueueableCommand,
    cursor::{MoveToColumn, MoveToNextLine, MoveToPreviousLine},
    terminal::{Clear, ClearType},
};

use crate::{
    config::{Glyphs, PrompterConfig},
    terminal::{screen_rows, visible_width},
};

/// Line break for output written during a key-input session, where the
/// terminal no longer turns `\n` into a carriage return plus line feed.
pub(crate) const NEWLINE: &str = "\r\n";

/// Formats prompt text for one terminal.
///
/// Colour is only used on interactive terminals, so piped transcripts stay
/// plain.
#[derive(Debug, Clone)]
pub(crate) struct Painter {
    color: bool,
    glyphs: Glyphs,
    width: Option<u16>,
}

impl Painter {
    pub(crate) fn new(config: &PrompterConfig, interactive: bool, width: Option<u16>) -> Self {
        Self {
            color: config.color && interactive,
            glyphs: config.glyphs.clone(),
            width: width.filter(|columns| *columns > 0),
        }
    }

    /// Screen rows `text` takes up once wrapped.
    pub(crate) fn rows(&self, text: &str) -> usize {
        screen_rows(text, self.width)
    }

    /// `? message (hint) `
    pub(crate) fn question(&self, message: &str, hint: Option<&str>) -> String {
        let marker = self.paint(&self.glyphs.prompt, |s| s.green().bold().to_string());
        let message = self.paint(message, |s| s.bold().to_string());
        match hint {
            Some(hint) => {
                let hint = self.paint(hint, |s| s.dimmed().to_string());
                format!("{marker} {message} {hint} ")
            }
            None => format!("{marker} {message} "),
        }
    }

    /// `? message answer`, printed once a list selection resolves.
    pub(crate) fn answered(&self, message: &str, answer: &str) -> String {
        let answer = self.paint(answer, |s| s.cyan().to_string());
        format!("{}{answer}", self.question(message, None))
    }

    pub(crate) fn error(&self, message: &str) -> String {
        let line = format!("{} {message}", self.glyphs.error);
        self.paint(&line, |s| s.red().to_string())
    }

    pub(crate) fn success_outcome(&self, message: &str) -> String {
        let glyph = self.paint(&self.glyphs.success, |s| s.green().bold().to_string());
        format!("{glyph} {message}")
    }

    pub(crate) fn error_outcome(&self, message: &str) -> String {
        let glyph = self.paint(&self.glyphs.error, |s| s.red().bold().to_string());
        format!("{glyph} {message}")
    }

    /// One spinner frame, cut to fit a single row.
    pub(crate) fn frame(&self, glyph: &str, text: &str) -> String {
        let text = match self.width {
            // glyph, separator and a spare last column
            Some(width) => fit(
                text,
                usize::from(width).saturating_sub(visible_width(glyph).saturating_add(2)),
            ),
            None => text.to_string(),
        };
        let glyph = self.paint(glyph, |s| s.cyan().to_string());
        format!("{glyph} {text}")
    }

    /// One row of a choice list.
    pub(crate) fn row(&self, label: &str, highlighted: bool) -> String {
        if highlighted {
            let line = format!("{} {label}", self.glyphs.pointer);
            self.paint(&line, |s| s.cyan().bold().to_string())
        } else {
            let pad = " ".repeat(self.glyphs.pointer.chars().count());
            format!("{pad} {label}")
        }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }
}

/// Shows a validation error below the rejected answer.
///
/// Expects the cursor at the start of the line following the submitted
/// answer, which took `prompt_rows` rows. On an interactive terminal the
/// answer and any earlier error are wiped, the error is written below the
/// blank prompt rows and the cursor goes back to the first of them, so
/// retries never grow the transcript however the lines wrap.
pub(crate) fn show_error(
    out: &mut dyn Write,
    painter: &Painter,
    interactive: bool,
    error: &str,
    prompt_rows: usize,
) -> io::Result<()> {
    if !interactive {
        writeln!(out, "{error}")?;
        return out.flush();
    }

    let error_rows = painter.rows(error);
    move_up(out, prompt_rows)?;
    out.queue(Clear(ClearType::FromCursorDown))?;
    move_down(out, prompt_rows)?;
    write!(out, "{error}")?;
    move_up(out, prompt_rows.saturating_add(error_rows).saturating_sub(1))?;
    out.flush()
}

/// Erases a previously shown error once the prompt resolves.
pub(crate) fn clear_error(out: &mut dyn Write, interactive: bool) -> io::Result<()> {
    if interactive {
        out.queue(MoveToColumn(0))?
            .queue(Clear(ClearType::FromCursorDown))?;
        out.flush()?;
    }
    Ok(())
}

/// Moves the cursor up `lines` rows and clears everything below it.
pub(crate) fn rewind(out: &mut dyn Write, lines: usize) -> io::Result<()> {
    move_up(out, lines)?;
    out.queue(Clear(ClearType::FromCursorDown))?;
    Ok(())
}

/// Moves to the first column, `rows` rows up.
fn move_up(out: &mut dyn Write, rows: usize) -> io::Result<()> {
    if rows > 0 {
        out.queue(MoveToPreviousLine(clamp_rows(rows)))?;
    } else {
        out.queue(MoveToColumn(0))?;
    }
    Ok(())
}

/// Moves to the first column, `rows` rows down.
fn move_down(out: &mut dyn Write, rows: usize) -> io::Result<()> {
    if rows > 0 {
        out.queue(MoveToNextLine(clamp_rows(rows)))?;
    } else {
        out.queue(MoveToColumn(0))?;
    }
    Ok(())
}

fn clamp_rows(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Cuts `text` to at most `columns` characters, marking the cut with `…`.
fn fit(text: &str, columns: usize) -> String {
    if text.chars().count() <= columns {
        return text.to_string();
    }
    let mut fitted: String = text.chars().take(columns.saturating_sub(1)).collect();
    fitted.push('…');
    fitted
}
