use ratatui::layout::Rect;
use std::{cell::Cell, time::Instant};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use super::{form::FormState, tooltip::Tooltip};
use crate::domain::{
    collection::IdeaList,
    idea::{Idea, IdeaId},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    Search,
    List,
}

/// Which overlay currently takes input. The delete confirmation wins over
/// the form if both were somehow open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Modal {
    None,
    Form,
    ConfirmDelete,
}

pub(crate) struct TuiState {
    pub(crate) ideas: IdeaList,
    pub(crate) search: SearchState,
    pub(crate) focus: Focus,
    pub(crate) selected: Option<usize>,
    pub(crate) form: FormState,
    pub(crate) pending_delete: Option<Idea>,
    pub(crate) tooltip: Tooltip,
    /// First card drawn by the last frame; the view keeps it in step with
    /// ratatui's list scrolling so clicks map back to cards.
    pub(crate) list_offset: Cell<usize>,
}

impl TuiState {
    pub(crate) fn new(ideas: IdeaList) -> Self {
        let mut state = Self {
            ideas,
            search: SearchState::new(),
            focus: Focus::List,
            selected: None,
            form: FormState::new(),
            pending_delete: None,
            tooltip: Tooltip::default(),
            list_offset: Cell::new(0),
        };
        state.clamp_selection();
        state
    }

    pub(crate) fn modal(&self) -> Modal {
        if self.pending_delete.is_some() {
            Modal::ConfirmDelete
        } else if self.form.is_open() {
            Modal::Form
        } else {
            Modal::None
        }
    }

    pub(crate) fn visible_ideas(&self) -> Vec<&Idea> {
        self.ideas.filter(&self.search.query)
    }

    pub(crate) fn selected_idea(&self) -> Option<&Idea> {
        let index = self.selected?;
        self.visible_ideas().get(index).copied()
    }

    pub(crate) fn move_selection_up(&mut self) {
        match self.selected {
            Some(current) if current > 0 => self.selected = Some(current - 1),
            Some(_) => {}
            None => self.clamp_selection(),
        }
    }

    pub(crate) fn move_selection_down(&mut self) {
        let last = self.visible_ideas().len().saturating_sub(1);
        match self.selected {
            Some(current) if current < last => self.selected = Some(current + 1),
            Some(_) => {}
            None => self.clamp_selection(),
        }
    }

    /// Selects the card at `index` among the visible ideas and focuses the list.
    pub(crate) fn select(&mut self, index: usize) {
        if index < self.visible_ideas().len() {
            self.selected = Some(index);
        }
        self.focus = Focus::List;
    }

    pub(crate) fn focus_search(&mut self) {
        self.focus = Focus::Search;
    }

    pub(crate) fn focus_list(&mut self) {
        self.focus = Focus::List;
    }

    pub(crate) fn search_insert(&mut self, ch: char) {
        self.search.insert_char(ch);
        self.apply_search();
    }

    pub(crate) fn search_backspace(&mut self) {
        self.search.backspace();
        self.apply_search();
    }

    pub(crate) fn open_create(&mut self) {
        self.form.open_create();
    }

    pub(crate) fn open_edit(&mut self, id: IdeaId) {
        let Some(idea) = self.ideas.get(id) else {
            return;
        };
        self.form.open_edit(idea);
    }

    pub(crate) fn open_edit_selected(&mut self) {
        if let Some(id) = self.selected_idea().map(|idea| idea.id) {
            self.open_edit(id);
        }
    }

    pub(crate) fn close_form(&mut self) {
        self.form.close();
    }

    /// Validates the form and applies it. Returns whether the collection
    /// changed; on failure the form stays open with its errors set.
    pub(crate) fn submit_form(&mut self) -> bool {
        if !self.form.is_open() {
            return false;
        }
        let draft = match self.form.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(messages = ?errors.messages(), "form rejected");
                self.form.errors = errors;
                return false;
            }
        };
        let id = match self.form.editing() {
            Some(id) => {
                self.ideas.update(id, draft);
                id
            }
            None => self.ideas.create(draft),
        };
        self.form.close();
        self.select_id(id);
        true
    }

    pub(crate) fn request_delete(&mut self, id: IdeaId) {
        self.pending_delete = self.ideas.get(id).cloned();
    }

    pub(crate) fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_idea().map(|idea| idea.id) {
            self.request_delete(id);
        }
    }

    pub(crate) fn confirm_delete(&mut self) -> Option<Idea> {
        let pending = self.pending_delete.take()?;
        let removed = self.ideas.remove(pending.id);
        self.clamp_selection();
        removed
    }

    pub(crate) fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub(crate) fn activate_avatar(&mut self, now: Instant) {
        self.tooltip.show(now);
    }

    pub(crate) fn tick(&mut self, now: Instant) {
        self.tooltip.tick(now);
    }

    fn apply_search(&mut self) {
        self.selected = None;
        self.list_offset.set(0);
        self.clamp_selection();
    }

    fn select_id(&mut self, id: IdeaId) {
        let position = self.visible_ideas().iter().position(|idea| idea.id == id);
        match position {
            Some(index) => self.selected = Some(index),
            None => self.clamp_selection(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_ideas().len();
        self.selected = match (len, self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(index)) => Some(index.min(len - 1)),
        };
    }
}

pub(crate) struct SearchState {
    pub(crate) query: String,
}

impl SearchState {
    fn new() -> Self {
        Self {
            query: String::new(),
        }
    }

    pub(crate) fn insert_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    pub(crate) fn backspace(&mut self) {
        self.query.pop();
    }

    /// Cursor cell inside the bordered search box drawn over `area`.
    pub(crate) fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let max_col = area.width.saturating_sub(3);
        let col = (UnicodeWidthStr::width(self.query.as_str()) as u16).min(max_col);
        (area.x + 1 + col, area.y + 1)
    }
}
