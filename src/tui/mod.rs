use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::{
    io,
    time::{Duration, Instant},
};
use tracing::info;

use crate::{db::Db, store};

mod form;
mod handler;
mod state;
mod tooltip;
mod view;

use handler::{handle_tui_key, handle_tui_mouse};
use state::TuiState;
use view::draw_tui;

pub(crate) use view::delete_prompt;

const TUI_POLL_MS: u64 = 200;

pub(crate) fn run_tui(db: &Db) -> Result<()> {
    let mut state = TuiState::new(store::open_list(db));
    let (mut terminal, keyboard_enhanced) = setup_terminal()?;
    info!(ideas = state.ideas.len(), "ui started");

    let result = run_tui_loop(&mut terminal, db, &mut state);
    restore_terminal(&mut terminal, keyboard_enhanced)?;
    info!("ui stopped");
    result
}

fn setup_terminal() -> Result<(Terminal<CrosstermBackend<io::Stdout>>, bool)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok((Terminal::new(backend)?, keyboard_enhanced))
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    keyboard_enhanced: bool,
) -> Result<()> {
    if keyboard_enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    db: &Db,
    state: &mut TuiState,
) -> Result<()> {
    loop {
        state.tick(Instant::now());
        terminal.draw(|frame| draw_tui(frame, state))?;
        if !poll_event(state)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if handle_tui_key(db, state, key, Instant::now()) {
                    break;
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let screen = Rect::new(0, 0, size.width, size.height);
                handle_tui_mouse(db, state, mouse, screen, Instant::now());
            }
            _ => {}
        }
    }
    Ok(())
}

/// Waits for input, waking early when the tooltip is due to hide.
fn poll_event(state: &TuiState) -> Result<bool> {
    let mut timeout = Duration::from_millis(TUI_POLL_MS);
    if let Some(left) = state.tooltip.time_left(Instant::now()) {
        timeout = timeout.min(left);
    }
    Ok(event::poll(timeout)?)
}
