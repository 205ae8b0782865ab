use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Instant;

use super::{
    form::{Field, TextField},
    state::{Focus, Modal, TuiState},
    view::{card_index_at, confirm_area, contains, form_area, form_layout, screen_layout},
};
use crate::{db::Db, store};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Quit,
    NewIdea,
    EditSelected,
    DeleteSelected,
    FocusSearch,
    FocusList,
    SelectCard(usize),
    MoveUp,
    MoveDown,
    Avatar,
    SearchInsert(char),
    SearchBackspace,
    FormInsert(char),
    FormBackspace,
    FormDelete,
    FormLeft,
    FormRight,
    FormHome,
    FormEnd,
    FormSwitchField,
    FormFocus(Field),
    SubmitForm,
    CloseForm,
    ConfirmDelete,
    CancelDelete,
}

/// Returns `true` when the loop should exit.
pub(crate) fn handle_tui_key(db: &Db, state: &mut TuiState, key: KeyEvent, now: Instant) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key_to_action(&key, state) {
        Some(action) => apply_action(db, state, action, now),
        None => false,
    }
}

pub(crate) fn handle_tui_mouse(
    db: &Db,
    state: &mut TuiState,
    mouse: MouseEvent,
    screen: Rect,
    now: Instant,
) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    if let Some(action) = click_to_action(state, mouse.column, mouse.row, screen) {
        apply_action(db, state, action, now);
    }
}

fn key_to_action(key: &KeyEvent, state: &TuiState) -> Option<Action> {
    let code = key.code;
    let modifiers = key.modifiers;

    if matches!((code, modifiers), (KeyCode::Char('c'), KeyModifiers::CONTROL)) {
        return Some(Action::Quit);
    }

    match state.modal() {
        Modal::ConfirmDelete => confirm_key(code),
        Modal::Form => form_key(code, modifiers),
        Modal::None => match state.focus {
            Focus::Search => search_key(code),
            Focus::List => list_key(code),
        },
    }
}

fn confirm_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ConfirmDelete),
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::CancelDelete),
        _ => None,
    }
}

fn form_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::SubmitForm),
            _ => None,
        };
    }
    match code {
        KeyCode::Esc => Some(Action::CloseForm),
        KeyCode::Enter => Some(Action::SubmitForm),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            Some(Action::FormSwitchField)
        }
        KeyCode::Left => Some(Action::FormLeft),
        KeyCode::Right => Some(Action::FormRight),
        KeyCode::Home => Some(Action::FormHome),
        KeyCode::End => Some(Action::FormEnd),
        KeyCode::Backspace => Some(Action::FormBackspace),
        KeyCode::Delete => Some(Action::FormDelete),
        KeyCode::Char(ch) => Some(Action::FormInsert(ch)),
        _ => None,
    }
}

fn search_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down => Some(Action::FocusList),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Char(ch) => Some(Action::SearchInsert(ch)),
        _ => None,
    }
}

fn list_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('n') => Some(Action::NewIdea),
        KeyCode::Char('e') | KeyCode::Enter => Some(Action::EditSelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),
        KeyCode::Char('/') | KeyCode::Tab => Some(Action::FocusSearch),
        KeyCode::Char('a') => Some(Action::Avatar),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        _ => None,
    }
}

/// Clicks inside an open modal never fall through to the backdrop; clicks
/// outside it close it.
fn click_to_action(state: &TuiState, column: u16, row: u16, screen: Rect) -> Option<Action> {
    match state.modal() {
        Modal::ConfirmDelete => {
            if contains(confirm_area(screen), column, row) {
                None
            } else {
                Some(Action::CancelDelete)
            }
        }
        Modal::Form => {
            let area = form_area(screen);
            if !contains(area, column, row) {
                return Some(Action::CloseForm);
            }
            let fields = form_layout(area);
            if contains(fields.title, column, row) {
                Some(Action::FormFocus(Field::Title))
            } else if contains(fields.description, column, row) {
                Some(Action::FormFocus(Field::Description))
            } else {
                None
            }
        }
        Modal::None => {
            let areas = screen_layout(screen);
            if contains(areas.avatar, column, row) {
                Some(Action::Avatar)
            } else if contains(areas.post_action, column, row) {
                Some(Action::NewIdea)
            } else if contains(areas.search, column, row) {
                Some(Action::FocusSearch)
            } else if contains(areas.list, column, row) {
                match card_index_at(state, areas.list, row) {
                    Some(index) => Some(Action::SelectCard(index)),
                    None => Some(Action::FocusList),
                }
            } else {
                None
            }
        }
    }
}

fn apply_action(db: &Db, state: &mut TuiState, action: Action, now: Instant) -> bool {
    match action {
        Action::Quit => return true,
        Action::NewIdea => state.open_create(),
        Action::EditSelected => state.open_edit_selected(),
        Action::DeleteSelected => state.request_delete_selected(),
        Action::FocusSearch => state.focus_search(),
        Action::FocusList => state.focus_list(),
        Action::SelectCard(index) => state.select(index),
        Action::MoveUp => state.move_selection_up(),
        Action::MoveDown => state.move_selection_down(),
        Action::Avatar => state.activate_avatar(now),
        Action::SearchInsert(ch) => state.search_insert(ch),
        Action::SearchBackspace => state.search_backspace(),
        Action::FormInsert(ch) => state.form.edit(|field| field.insert_char(ch)),
        Action::FormBackspace => state.form.edit(TextField::backspace),
        Action::FormDelete => state.form.edit(TextField::delete_char),
        Action::FormLeft => state.form.move_cursor(TextField::move_left),
        Action::FormRight => state.form.move_cursor(TextField::move_right),
        Action::FormHome => state.form.move_cursor(TextField::move_home),
        Action::FormEnd => state.form.move_cursor(TextField::move_end),
        Action::FormSwitchField => state.form.next_field(),
        Action::FormFocus(field) => state.form.focus(field),
        Action::SubmitForm => {
            state.submit_form();
        }
        Action::CloseForm => state.close_form(),
        Action::ConfirmDelete => {
            state.confirm_delete();
        }
        Action::CancelDelete => state.cancel_delete(),
    }
    store::persist_changes(db, &mut state.ideas);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{collection::IdeaList, idea::IdeaId};
    use crossterm::event::KeyEventState;
    use std::time::Duration;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn setup() -> (Db, TuiState) {
        let db = Db::open_in_memory().unwrap();
        let state = TuiState::new(store::open_list(&db));
        (db, state)
    }

    fn press(db: &Db, state: &mut TuiState, code: KeyCode) -> bool {
        handle_tui_key(db, state, KeyEvent::new(code, KeyModifiers::NONE), Instant::now())
    }

    fn type_text(db: &Db, state: &mut TuiState, text: &str) {
        for ch in text.chars() {
            press(db, state, KeyCode::Char(ch));
        }
    }

    fn click(db: &Db, state: &mut TuiState, column: u16, row: u16, now: Instant) {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        handle_tui_mouse(db, state, mouse, SCREEN, now);
    }

    #[test]
    fn creating_through_keys_persists() {
        let (db, mut state) = setup();
        press(&db, &mut state, KeyCode::Char('n'));
        assert_eq!(state.modal(), Modal::Form);

        press(&db, &mut state, KeyCode::Enter);
        assert_eq!(state.modal(), Modal::Form);
        assert_eq!(state.ideas.len(), 3);

        type_text(&db, &mut state, "测试创意标题");
        press(&db, &mut state, KeyCode::Tab);
        type_text(&db, &mut state, "这是一个测试创意的详细描述");
        press(&db, &mut state, KeyCode::Enter);

        assert_eq!(state.modal(), Modal::None);
        assert_eq!(state.ideas.len(), 4);
        let stored = store::load(&db).unwrap();
        assert_eq!(stored.last().map(|idea| idea.title.as_str()), Some("测试创意标题"));
    }

    #[test]
    fn delete_key_alone_does_not_remove() {
        let (db, mut state) = setup();
        press(&db, &mut state, KeyCode::Char('d'));
        assert_eq!(state.modal(), Modal::ConfirmDelete);
        assert_eq!(state.ideas.len(), 3);

        press(&db, &mut state, KeyCode::Char('n'));
        assert_eq!(state.modal(), Modal::None);
        assert_eq!(state.ideas.len(), 3);

        press(&db, &mut state, KeyCode::Char('d'));
        press(&db, &mut state, KeyCode::Enter);
        assert_eq!(state.ideas.len(), 2);
        assert!(state.ideas.get(IdeaId::from(1)).is_none());
        assert_eq!(store::load(&db).unwrap().len(), 2);
    }

    #[test]
    fn typing_in_search_filters_without_persisting() {
        let (db, mut state) = setup();
        press(&db, &mut state, KeyCode::Char('/'));
        type_text(&db, &mut state, "内部");
        assert_eq!(state.visible_ideas().len(), 1);
        assert_eq!(state.focus, Focus::Search);

        press(&db, &mut state, KeyCode::Esc);
        assert_eq!(state.focus, Focus::List);
        assert_eq!(store::load(&db).unwrap().len(), 3);
    }

    #[test]
    fn quit_keys_depend_on_context() {
        let (db, mut state) = setup();
        press(&db, &mut state, KeyCode::Char('n'));
        assert!(!press(&db, &mut state, KeyCode::Char('q')));
        assert_eq!(state.form.title.value(), "q");
        assert!(!press(&db, &mut state, KeyCode::Esc));
        assert!(press(&db, &mut state, KeyCode::Char('q')));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        state.open_create();
        assert!(handle_tui_key(&db, &mut state, ctrl_c, Instant::now()));
    }

    #[test]
    fn key_release_is_ignored() {
        let (db, mut state) = setup();
        let release = KeyEvent {
            code: KeyCode::Char('n'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(!handle_tui_key(&db, &mut state, release, Instant::now()));
        assert_eq!(state.modal(), Modal::None);
    }

    #[test]
    fn backdrop_click_closes_but_inner_click_does_not() {
        let (db, mut state) = setup();
        state.open_create();
        let form = form_area(SCREEN);
        click(&db, &mut state, form.x + 2, form.bottom() - 2, Instant::now());
        assert_eq!(state.modal(), Modal::Form);

        let fields = form_layout(form);
        click(&db, &mut state, fields.description.x + 2, fields.description.y + 1, Instant::now());
        assert_eq!(state.form.active, Field::Description);

        click(&db, &mut state, 0, SCREEN.bottom() - 1, Instant::now());
        assert_eq!(state.modal(), Modal::None);

        state.request_delete(IdeaId::from(3));
        let confirm = confirm_area(SCREEN);
        click(&db, &mut state, confirm.x + 1, confirm.y + 1, Instant::now());
        assert_eq!(state.modal(), Modal::ConfirmDelete);
        click(&db, &mut state, 0, 0, Instant::now());
        assert_eq!(state.modal(), Modal::None);
        assert_eq!(state.ideas.len(), 3);
    }

    #[test]
    fn avatar_click_shows_tooltip_until_timeout() {
        let (db, mut state) = setup();
        let areas = screen_layout(SCREEN);
        let start = Instant::now();
        click(&db, &mut state, areas.avatar.x, areas.avatar.y, start);
        assert!(state.tooltip.is_visible());

        state.tick(start + Duration::from_millis(3500));
        assert!(!state.tooltip.is_visible());
    }

    #[test]
    fn clicking_a_card_selects_it() {
        let (db, mut state) = setup();
        state.focus_search();
        let list = screen_layout(SCREEN).list;
        // Seed cards take three rows each below the list border.
        click(&db, &mut state, list.x + 4, list.y + 1 + 3 + 1, Instant::now());
        assert_eq!(state.selected, Some(1));
        assert_eq!(state.focus, Focus::List);

        click(&db, &mut state, list.x + 4, list.y + 1 + 6, Instant::now());
        assert_eq!(state.selected, Some(2));

        click(&db, &mut state, list.x + 4, list.bottom() - 2, Instant::now());
        assert_eq!(state.selected, Some(2));

        press(&db, &mut state, KeyCode::Char('e'));
        assert_eq!(state.form.editing(), Some(IdeaId::from(3)));
    }

    #[test]
    fn banner_action_click_opens_create_form() {
        let (db, mut state) = setup();
        let areas = screen_layout(SCREEN);
        click(&db, &mut state, areas.post_action.x, areas.post_action.y, Instant::now());
        assert_eq!(state.modal(), Modal::Form);
        assert_eq!(state.form.editing(), None);
    }

    #[test]
    fn edit_flow_updates_selected_card() {
        let db = Db::open_in_memory().unwrap();
        let mut state = TuiState::new(IdeaList::new(crate::domain::idea::default_ideas()));
        press(&db, &mut state, KeyCode::Char('j'));
        press(&db, &mut state, KeyCode::Char('e'));
        assert_eq!(state.form.editing(), Some(IdeaId::from(2)));

        press(&db, &mut state, KeyCode::End);
        for _ in 0.."内部创意征集活动".chars().count() {
            press(&db, &mut state, KeyCode::Backspace);
        }
        type_text(&db, &mut state, "已编辑的创意");
        press(&db, &mut state, KeyCode::Enter);

        assert_eq!(state.modal(), Modal::None);
        let edited = state.ideas.get(IdeaId::from(2)).unwrap();
        assert_eq!(edited.title, "已编辑的创意");
        assert_eq!(store::load(&db).unwrap()[1].title, "已编辑的创意");
    }
}
