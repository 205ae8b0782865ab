use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::{
        idea::{Idea, IdeaDraft, IdeaId},
        validation::{self, FormErrors},
    },
    format::wrap_to_width,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Field {
    Title,
    Description,
}

impl Field {
    fn other(self) -> Self {
        match self {
            Field::Title => Field::Description,
            Field::Description => Field::Title,
        }
    }
}

/// Create/edit modal: input buffers, per-field errors and the edit target.
#[derive(Debug)]
pub(crate) struct FormState {
    open: bool,
    editing: Option<IdeaId>,
    pub(crate) title: TextField,
    pub(crate) description: TextField,
    pub(crate) errors: FormErrors,
    pub(crate) active: Field,
}

impl FormState {
    pub(crate) fn new() -> Self {
        Self {
            open: false,
            editing: None,
            title: TextField::default(),
            description: TextField::default(),
            errors: FormErrors::default(),
            active: Field::Title,
        }
    }

    pub(crate) fn open_create(&mut self) {
        self.reset();
        self.open = true;
    }

    pub(crate) fn open_edit(&mut self, idea: &Idea) {
        self.reset();
        self.title = TextField::with_value(&idea.title);
        self.description = TextField::with_value(&idea.description);
        self.editing = Some(idea.id);
        self.open = true;
    }

    pub(crate) fn close(&mut self) {
        self.reset();
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn editing(&self) -> Option<IdeaId> {
        self.editing
    }

    pub(crate) fn validate(&self) -> Result<IdeaDraft, FormErrors> {
        validation::validate(self.title.value(), self.description.value())
    }

    pub(crate) fn focus(&mut self, field: Field) {
        self.active = field;
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.other();
    }

    /// Applies an edit to the active field and clears that field's error.
    pub(crate) fn edit(&mut self, apply: impl FnOnce(&mut TextField)) {
        match self.active {
            Field::Title => {
                apply(&mut self.title);
                self.errors.title = None;
            }
            Field::Description => {
                apply(&mut self.description);
                self.errors.description = None;
            }
        }
    }

    pub(crate) fn move_cursor(&mut self, apply: impl FnOnce(&mut TextField)) {
        match self.active {
            Field::Title => apply(&mut self.title),
            Field::Description => apply(&mut self.description),
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Single-line editor; the cursor is a char index into `value`.
#[derive(Clone, Debug, Default)]
pub(crate) struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub(crate) fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn insert_char(&mut self, ch: char) {
        let at = byte_index_at_char(&self.value, self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub(crate) fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
    }

    pub(crate) fn delete_char(&mut self) {
        self.remove_at_cursor();
    }

    pub(crate) fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub(crate) fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Wraps the value to the inner width of a bordered box over `area` and
    /// scrolls it so the row holding the cursor stays inside the box.
    pub(crate) fn view(&self, area: Rect) -> FieldView {
        let width = area.width.saturating_sub(2).max(1) as usize;
        let height = area.height.saturating_sub(2).max(1) as usize;
        let rows = wrap_to_width(&self.value, width);
        let (row, col) = cursor_cell(&rows, self.cursor, width);
        let top = (row + 1).saturating_sub(height);
        FieldView {
            rows: rows.into_iter().skip(top).take(height).collect(),
            cursor: (area.x + 1 + col as u16, area.y + 1 + (row - top) as u16),
        }
    }

    pub(crate) fn cursor_position(&self, area: Rect) -> (u16, u16) {
        self.view(area).cursor
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn remove_at_cursor(&mut self) {
        let at = byte_index_at_char(&self.value, self.cursor);
        if let Some(ch) = self.value[at..].chars().next() {
            self.value.replace_range(at..at + ch.len_utf8(), "");
        }
    }
}

/// The part of a field visible in its box.
pub(crate) struct FieldView {
    pub(crate) rows: Vec<String>,
    pub(crate) cursor: (u16, u16),
}

/// Row and column of the cursor within wrapped rows. A cursor between two rows
/// sits at the start of the later one; past a full last row it opens a new row.
fn cursor_cell(rows: &[String], cursor: usize, width: usize) -> (usize, usize) {
    let mut remaining = cursor;
    for (row, line) in rows.iter().enumerate() {
        let count = line.chars().count();
        let last = row + 1 == rows.len();
        if remaining < count || last {
            let col = width_up_to_char(line, remaining);
            if last && col >= width {
                return (row + 1, 0);
            }
            return (row, col);
        }
        remaining -= count;
    }
    (0, 0)
}

fn byte_index_at_char(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

fn width_up_to_char(value: &str, char_index: usize) -> usize {
    let prefix_end = byte_index_at_char(value, char_index);
    UnicodeWidthStr::width(&value[..prefix_end])
}
