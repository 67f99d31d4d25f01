//! Choice-from-list prompts.

use std::{
    fmt::Display,
    io::{self, Write},
};

use log::warn;

use super::{
    Prompter,
    choice::ChoiceList,
    render::{self, NEWLINE, Painter},
};
use crate::{
    error::{PromptError, PromptResult},
    terminal::{Key, Terminal},
};

/// Index returned by [`Prompter::prompt_list`] when nothing was selected.
pub const NO_SELECTION: isize = -1;

impl<T: Terminal> Prompter<T> {
    /// Prompts the user to pick one of `options`.
    ///
    /// Options are rendered through their [`Display`] implementation. An
    /// out-of-range `default_index` is clamped to the first option. When
    /// `required` is false a "none" row is offered (also reachable with
    /// `0` or Esc) and choosing it returns `Ok(None)`; a required list never
    /// returns `None`.
    ///
    /// Interactive keys: Up/`k` and Down/`j` move (wrapping), `1`-`9` jump,
    /// Enter confirms, Ctrl+C interrupts. On a non-interactive terminal the
    /// options are numbered and a number, a label, or an empty line for the
    /// default is read instead.
    pub fn select<D>(
        &mut self,
        message: &str,
        required: bool,
        default_index: isize,
        options: &[D],
    ) -> PromptResult<Option<usize>>
    where
        D: Display,
    {
        self.ensure_line_free()?;

        if options.is_empty() {
            if required {
                return Err(PromptError::NoOptions);
            }
            return Ok(None);
        }

        if !usize::try_from(default_index).is_ok_and(|idx| idx < options.len()) {
            warn!(
                "Default index {default_index} is out of range for {} options, using 0",
                options.len()
            );
        }

        let labels = options.iter().map(ToString::to_string).collect();
        let mut choices = ChoiceList::new(
            labels,
            required,
            default_index,
            &self.config.labels.none,
        );

        if self.terminal.is_interactive() {
            self.terminal.begin_key_input()?;
            let selection = self.select_with_keys(message, &mut choices);
            self.terminal.end_key_input();
            selection
        } else {
            self.select_with_lines(message, &choices)
        }
    }

    /// Index-returning form of [`Prompter::select`]: yields
    /// [`NO_SELECTION`] (-1) when nothing was chosen.
    pub fn prompt_list<D>(
        &mut self,
        message: &str,
        required: bool,
        default_index: isize,
        options: &[D],
    ) -> PromptResult<isize>
    where
        D: Display,
    {
        let selection = self.select(message, required, default_index, options)?;
        Ok(selection
            .and_then(|idx| isize::try_from(idx).ok())
            .unwrap_or(NO_SELECTION))
    }

    fn select_with_keys(
        &mut self,
        message: &str,
        choices: &mut ChoiceList,
    ) -> PromptResult<Option<usize>> {
        let painter = self.painter();
        let question = painter.question(message, None);
        let list_rows = count_list_rows(&painter, choices);
        let all_rows = list_rows.saturating_add(painter.rows(&question));

        let out = self.terminal.output();
        write!(out, "{question}{NEWLINE}")?;
        draw_rows(out, &painter, choices)?;

        loop {
            let key = self.terminal.read_key()?.ok_or(PromptError::InputClosed)?;

            match key {
                Key::Up | Key::Char('k') => choices.move_up(),
                Key::Down | Key::Char('j') => choices.move_down(),
                Key::Char(c) if c.is_ascii_digit() => {
                    choices.jump(c.to_digit(10).map_or(0, |d| d as usize));
                }
                Key::Esc if !choices.required() => {
                    choices.select_none();
                    return self.finish_keys(message, &painter, choices, all_rows);
                }
                Key::Enter => return self.finish_keys(message, &painter, choices, all_rows),
                Key::Interrupt => return Err(PromptError::Interrupted),
                _ => continue,
            }

            let out = self.terminal.output();
            render::rewind(out, list_rows)?;
            draw_rows(out, &painter, choices)?;
        }
    }

    /// Collapses the question and list, `rows` rows in all, into a single
    /// `? message answer` line.
    fn finish_keys(
        &mut self,
        message: &str,
        painter: &Painter,
        choices: &ChoiceList,
        rows: usize,
    ) -> PromptResult<Option<usize>> {
        let out = self.terminal.output();
        render::rewind(out, rows)?;
        write!(
            out,
            "{}{NEWLINE}",
            painter.answered(message, choices.current_label())
        )?;
        out.flush()?;
        Ok(choices.current())
    }

    fn select_with_lines(
        &mut self,
        message: &str,
        choices: &ChoiceList,
    ) -> PromptResult<Option<usize>> {
        let painter = self.painter();
        let out = self.terminal.output();
        writeln!(out, "{}", painter.question(message, None))?;
        for row in 0..choices.rows() {
            let number = row_number(choices, row);
            writeln!(
                out,
                "{}",
                painter.row(
                    &format!("{number}) {}", choices.row_label(row)),
                    row == choices.cursor()
                )
            )?;
        }
        out.flush()?;

        let hint = format!("[{}]", row_number(choices, choices.cursor()));
        self.ask("Choice", Some(&hint), "", |line| choices.interpret(line))
    }
}

/// 1-based number shown next to a row; the "none" row is `0`.
fn row_number(choices: &ChoiceList, row: usize) -> usize {
    if !choices.required() && row == choices.rows().saturating_sub(1) {
        0
    } else {
        row.saturating_add(1)
    }
}

/// Screen rows the option list takes up. The highlight does not change a
/// row's width.
fn count_list_rows(painter: &Painter, choices: &ChoiceList) -> usize {
    (0..choices.rows())
        .map(|row| painter.rows(&painter.row(choices.row_label(row), false)))
        .sum()
}

fn draw_rows(out: &mut dyn Write, painter: &Painter, choices: &ChoiceList) -> io::Result<()> {
    for row in 0..choices.rows() {
        write!(
            out,
            "{}{NEWLINE}",
            painter.row(choices.row_label(row), row == choices.cursor())
        )?;
    }
    out.flush()
}
