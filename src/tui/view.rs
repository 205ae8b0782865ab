use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use super::{
    form::{Field, FormState, TextField},
    state::{Focus, Modal, TuiState},
    tooltip::TOOLTIP_TEXT,
};
use crate::{
    domain::idea::Idea,
    format::{format_display_time, wrap_to_width},
};

const APP_TITLE: &str = "创意管理与协作系统";
const BANNER_HEADING: &str = "创意管理与协作";
const POST_ACTION: &str = "[n] 发表创意";
const AVATAR: &str = "[我]";
const SEARCH_PLACEHOLDER: &str = "请输入关键字搜索创意";
const EMPTY_LIST: &str = "暂无创意，快来提交您的第一个创意吧！";
const NO_MATCHES: &str = "没有找到匹配的创意";

const FORM_WIDTH: u16 = 60;
const FORM_HEIGHT: u16 = 13;
const DESCRIPTION_ROWS: u16 = 3;
const HIGHLIGHT_SYMBOL: &str = "> ";
const CONFIRM_WIDTH: u16 = 56;
const CONFIRM_HEIGHT: u16 = 7;

pub(crate) fn draw_tui(frame: &mut Frame<'_>, state: &TuiState) {
    let screen = frame.area();
    let areas = screen_layout(screen);

    draw_header(frame, &areas);
    draw_banner(frame, &areas);
    draw_search(frame, state, areas.search);
    draw_ideas(frame, state, areas.list);
    draw_footer(frame, state, areas.footer);
    if state.tooltip.is_visible() {
        draw_tooltip(frame, screen, areas.avatar);
    }

    match state.modal() {
        Modal::None => {}
        Modal::Form => draw_form(frame, &state.form, form_area(screen)),
        Modal::ConfirmDelete => {
            if let Some(idea) = state.pending_delete.as_ref() {
                draw_confirm(frame, idea, confirm_area(screen));
            }
        }
    }
}

pub(crate) fn delete_prompt(title: &str) -> String {
    format!("确定要删除「{}」这条创意吗？删除后将不可恢复。", title)
}

fn draw_header(frame: &mut Frame<'_>, areas: &ScreenAreas) {
    let header = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, areas.header);
    let avatar = Paragraph::new(AVATAR).style(Style::default().fg(Color::Cyan));
    frame.render_widget(avatar, areas.avatar);
}

fn draw_banner(frame: &mut Frame<'_>, areas: &ScreenAreas) {
    let banner = Paragraph::new(Line::from(Span::styled(
        BANNER_HEADING,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, areas.banner);
    let action = Paragraph::new(POST_ACTION).style(Style::default().fg(Color::Yellow));
    frame.render_widget(action, areas.post_action);
}

fn draw_search(frame: &mut Frame<'_>, state: &TuiState, area: Rect) {
    let line = if state.search.query.is_empty() {
        Line::from(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(state.search.query.as_str())
    };
    let search = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("搜索")
            .border_style(focus_style(state, Focus::Search)),
    );
    frame.render_widget(search, area);
    if matches!(state.focus, Focus::Search) && state.modal() == Modal::None {
        frame.set_cursor_position(state.search.cursor_position(area));
    }
}

fn draw_ideas(frame: &mut Frame<'_>, state: &TuiState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("创意列表 ({})", state.ideas.len()))
        .border_style(focus_style(state, Focus::List));
    let visible = state.visible_ideas();
    if visible.is_empty() {
        let message = if state.ideas.is_empty() {
            EMPTY_LIST
        } else {
            NO_MATCHES
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = card_width(area);
    let items: Vec<ListItem> = visible.iter().map(|idea| idea_card(idea, width)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(focus_style(state, Focus::List));
    let mut list_state = ListState::default().with_offset(state.list_offset.get());
    list_state.select(state.selected);
    frame.render_stateful_widget(list, area, &mut list_state);
    state.list_offset.set(list_state.offset());
}

/// Index into the visible ideas of the card drawn on screen row `row`.
pub(crate) fn card_index_at(state: &TuiState, list: Rect, row: u16) -> Option<usize> {
    let body = inner(list);
    if row < body.y || row >= body.bottom() {
        return None;
    }
    let width = card_width(list);
    let mut top = body.y as usize;
    for (index, idea) in state
        .visible_ideas()
        .into_iter()
        .enumerate()
        .skip(state.list_offset.get())
    {
        let bottom = top + idea_card(idea, width).height();
        if (row as usize) < bottom {
            return Some(index);
        }
        top = bottom;
    }
    None
}

fn card_width(list: Rect) -> usize {
    let symbol = UnicodeWidthStr::width(HIGHLIGHT_SYMBOL) as u16;
    list.width.saturating_sub(2 + symbol) as usize
}

fn idea_card(idea: &Idea, width: usize) -> ListItem<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'static>> = wrap_to_width(&idea.title, width)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, bold)))
        .collect();
    for paragraph in idea.description.lines() {
        lines.extend(wrap_to_width(paragraph, width).into_iter().map(Line::from));
    }
    if let Some(created_at) = idea.created_at.as_deref() {
        lines.push(Line::from(Span::styled(
            format_display_time(created_at),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}

fn draw_footer(frame: &mut Frame<'_>, state: &TuiState, area: Rect) {
    let hints = match (state.modal(), state.focus) {
        (Modal::ConfirmDelete, _) => "Enter/y 确认  Esc/n 取消",
        (Modal::Form, _) => "Tab 切换字段  Enter 提交  Esc 取消",
        (Modal::None, Focus::Search) => "输入关键字过滤  Enter/Esc 返回列表",
        (Modal::None, Focus::List) => {
            "n 新建  e 编辑  d 删除  / 搜索  j/k 移动  a 头像  q 退出"
        }
    };
    let footer = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn draw_tooltip(frame: &mut Frame<'_>, screen: Rect, avatar: Rect) {
    let width = (UnicodeWidthStr::width(TOOLTIP_TEXT) as u16 + 2).min(screen.width);
    let x = avatar.right().saturating_sub(width).max(screen.x);
    let y = avatar.bottom();
    if y >= screen.bottom() {
        return;
    }
    let area = Rect::new(x, y, width, 3.min(screen.bottom() - y));
    frame.render_widget(Clear, area);
    let tooltip = Paragraph::new(TOOLTIP_TEXT)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(tooltip, area);
}

fn draw_form(frame: &mut Frame<'_>, form: &FormState, area: Rect) {
    let (heading, submit_label) = if form.editing().is_some() {
        ("编辑创意", "更新创意")
    } else {
        ("发表创意", "提交创意")
    };
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(heading)
            .border_style(Style::default().fg(Color::Green)),
        area,
    );

    let fields = form_layout(area);
    draw_field(frame, form, Field::Title, "创意标题", fields.title);
    draw_error(frame, form.errors.title.map(|err| err.to_string()), fields.title_error);
    draw_field(frame, form, Field::Description, "创意描述", fields.description);
    draw_error(
        frame,
        form.errors.description.map(|err| err.to_string()),
        fields.description_error,
    );
    let actions = Paragraph::new(format!("[Enter] {}   [Esc] 取消", submit_label))
        .alignment(Alignment::Right);
    frame.render_widget(actions, fields.actions);

    let active = match form.active {
        Field::Title => (&form.title, fields.title),
        Field::Description => (&form.description, fields.description),
    };
    frame.set_cursor_position(active.0.cursor_position(active.1));
}

fn draw_field(frame: &mut Frame<'_>, form: &FormState, field: Field, label: &str, area: Rect) {
    let input: &TextField = match field {
        Field::Title => &form.title,
        Field::Description => &form.description,
    };
    let border_style = if form.active == field {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let rows: Vec<Line> = input.view(area).rows.into_iter().map(Line::from).collect();
    let widget = Paragraph::new(Text::from(rows)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string())
            .border_style(border_style),
    );
    frame.render_widget(widget, area);
}

fn draw_error(frame: &mut Frame<'_>, message: Option<String>, area: Rect) {
    if let Some(message) = message {
        let widget = Paragraph::new(message).style(Style::default().fg(Color::Red));
        frame.render_widget(widget, area);
    }
}

fn draw_confirm(frame: &mut Frame<'_>, idea: &Idea, area: Rect) {
    frame.render_widget(Clear, area);
    let body = Text::from(vec![
        Line::from(delete_prompt(&idea.title)),
        Line::from(""),
        Line::from("[Enter/y] 确认删除   [Esc/n] 取消"),
    ]);
    let dialog = Paragraph::new(body).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("确认删除")
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(dialog, area);
}

fn focus_style(state: &TuiState, target: Focus) -> Style {
    if state.focus == target && state.modal() == Modal::None {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

pub(crate) struct ScreenAreas {
    pub(crate) header: Rect,
    pub(crate) avatar: Rect,
    pub(crate) banner: Rect,
    pub(crate) post_action: Rect,
    pub(crate) search: Rect,
    pub(crate) list: Rect,
    pub(crate) footer: Rect,
}

pub(crate) fn screen_layout(area: Rect) -> ScreenAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let header = rows[0];
    let banner = rows[1];
    ScreenAreas {
        header,
        avatar: right_aligned(header, header.y, UnicodeWidthStr::width(AVATAR) as u16),
        banner,
        post_action: right_aligned(
            inner(banner),
            banner.y + 1,
            UnicodeWidthStr::width(POST_ACTION) as u16,
        ),
        search: rows[2],
        list: rows[3],
        footer: rows[4],
    }
}

pub(crate) struct FormAreas {
    pub(crate) title: Rect,
    pub(crate) title_error: Rect,
    pub(crate) description: Rect,
    pub(crate) description_error: Rect,
    pub(crate) actions: Rect,
}

pub(crate) fn form_layout(modal: Rect) -> FormAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(DESCRIPTION_ROWS + 2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner(modal));
    FormAreas {
        title: rows[0],
        title_error: rows[1],
        description: rows[2],
        description_error: rows[3],
        actions: rows[4],
    }
}

pub(crate) fn form_area(screen: Rect) -> Rect {
    centered(screen, FORM_WIDTH, FORM_HEIGHT)
}

pub(crate) fn confirm_area(screen: Rect) -> Rect {
    centered(screen, CONFIRM_WIDTH, CONFIRM_HEIGHT)
}

pub(crate) fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

fn centered(screen: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}

fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

fn right_aligned(area: Rect, y: u16, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(area.right() - width, y, width, 1)
}
