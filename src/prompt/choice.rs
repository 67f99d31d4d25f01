//! Selection state for list prompts.

use super::Attempt;

/// The options of a list prompt plus the highlighted row.
///
/// When the list is optional a trailing "none" row is appended; selecting
/// it yields `None`.
#[derive(Debug)]
pub(crate) struct ChoiceList {
    labels: Vec<String>,
    none_label: Option<String>,
    cursor: usize,
}

impl ChoiceList {
    pub(crate) fn new(
        labels: Vec<String>,
        required: bool,
        default_index: isize,
        none_label: &str,
    ) -> Self {
        let cursor = clamp_default(default_index, labels.len());
        Self {
            labels,
            none_label: (!required).then(|| none_label.to_string()),
            cursor,
        }
    }

    /// Number of rows, including the "none" row.
    pub(crate) fn rows(&self) -> usize {
        self.labels.len() + usize::from(self.none_label.is_some())
    }

    pub(crate) fn required(&self) -> bool {
        self.none_label.is_none()
    }

    /// The highlighted option, or `None` when the "none" row is highlighted.
    pub(crate) fn current(&self) -> Option<usize> {
        (self.cursor < self.labels.len()).then_some(self.cursor)
    }

    /// Label of the highlighted row.
    pub(crate) fn current_label(&self) -> &str {
        self.row_label(self.cursor)
    }

    pub(crate) fn row_label(&self, row: usize) -> &str {
        self.labels
            .get(row)
            .map(String::as_str)
            .or(self.none_label.as_deref())
            .unwrap_or_default()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn move_up(&mut self) {
        self.cursor = if self.cursor == 0 {
            self.rows().saturating_sub(1)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    pub(crate) fn move_down(&mut self) {
        let rows = self.rows();
        if rows > 0 {
            self.cursor = self.cursor.saturating_add(1) % rows;
        }
    }

    /// Jumps to the option numbered `number` (1-based). `0` jumps to the
    /// "none" row of an optional list. Out-of-range numbers are ignored.
    pub(crate) fn jump(&mut self, number: usize) {
        if number == 0 {
            if !self.required() {
                self.cursor = self.labels.len();
            }
        } else if number <= self.labels.len() {
            self.cursor = number.saturating_sub(1);
        }
    }

    pub(crate) fn select_none(&mut self) {
        if !self.required() {
            self.cursor = self.labels.len();
        }
    }

    /// Interprets one line of typed input.
    ///
    /// Accepts an empty line (the highlighted default), a 1-based number,
    /// an option label (case-insensitive), and for optional lists `0`, `-`
    /// or the "none" label.
    pub(crate) fn interpret(&self, line: &str) -> Attempt<Option<usize>> {
        let input = line.trim();
        if input.is_empty() {
            return Attempt::Resolved(self.current());
        }

        if let Some(none_label) = &self.none_label
            && (input == "0" || input == "-" || input.eq_ignore_ascii_case(none_label))
        {
            return Attempt::Resolved(None);
        }

        if let Ok(number) = input.parse::<usize>()
            && (1..=self.labels.len()).contains(&number)
        {
            return Attempt::Resolved(Some(number.saturating_sub(1)));
        }

        if let Some(idx) = self
            .labels
            .iter()
            .position(|label| label.eq_ignore_ascii_case(input))
        {
            return Attempt::Resolved(Some(idx));
        }

        let range = if self.required() {
            format!("1-{}", self.labels.len())
        } else {
            format!("0-{}", self.labels.len())
        };
        Attempt::Retry(format!(
            "\"{input}\" is not one of the options; enter a number ({range}) or a label"
        ))
    }
}

/// Clamps an out-of-range default to the first option.
pub(crate) fn clamp_default(default_index: isize, len: usize) -> usize {
    usize::try_from(default_index)
        .ok()
        .filter(|idx| *idx < len)
        .unwrap_or(0)
}
