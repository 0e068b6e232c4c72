pub mod render;
pub mod state;

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures_util::StreamExt;
use ratatui::layout::Position;
use ratatui::prelude::*;
use state::{AppState, Focus};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Commands the TUI sends back to the engine loop. One command per discrete
/// user intent; the engine applies them serially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetFocus(Focus),
    FocusNext,
    FocusPrev,
    Type(char),
    Backspace,
    Submit,
    SelectUp,
    SelectDown,
    RemoveSelected,
    RemoveAt(usize),
    Quit,
}

/// Run the TUI. Reads state from `state_rx`, sends commands on `cmd_tx`.
pub async fn run_tui(
    state_rx: watch::Receiver<AppState>,
    cmd_tx: mpsc::Sender<Command>,
    tick: Duration,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_rx, cmd_tx, tick).await;

    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state_rx: watch::Receiver<AppState>,
    cmd_tx: mpsc::Sender<Command>,
    tick: Duration,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(tick);
    let mut spinner_frame: u8 = 0;

    loop {
        let state = state_rx.borrow().clone();
        terminal.draw(|f| render::draw(f, &state, spinner_frame))?;

        tokio::select! {
            _ = state_rx.changed() => {}
            _ = ticker.tick() => {
                if state.any_loading() {
                    spinner_frame = spinner_frame.wrapping_add(1);
                }
            }
            maybe_event = events.next() => {
                let Some(event) = maybe_event else { return Ok(()) };
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                for cmd in translate(&event?, &state, area) {
                    let quit = cmd == Command::Quit;
                    let _ = cmd_tx.send(cmd).await;
                    if quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn translate(event: &Event, state: &AppState, area: Rect) -> Vec<Command> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key, state),
        Event::Mouse(mouse) => translate_mouse(mouse, state, area),
        _ => Vec::new(),
    }
}

fn translate_key(key: &KeyEvent, state: &AppState) -> Vec<Command> {
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return vec![Command::Quit];
    }
    match key.code {
        KeyCode::Tab => return vec![Command::FocusNext],
        KeyCode::BackTab => return vec![Command::FocusPrev],
        _ => {}
    }

    match state.focus {
        Focus::NameInput | Focus::UrlInput => match key.code {
            KeyCode::Char(c) => vec![Command::Type(c)],
            KeyCode::Backspace => vec![Command::Backspace],
            KeyCode::Enter => vec![Command::Submit],
            _ => Vec::new(),
        },
        Focus::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Command::SelectUp],
            KeyCode::Down | KeyCode::Char('j') => vec![Command::SelectDown],
            KeyCode::Enter | KeyCode::Delete => vec![Command::RemoveSelected],
            _ => Vec::new(),
        },
    }
}

fn translate_mouse(mouse: &MouseEvent, state: &AppState, area: Rect) -> Vec<Command> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Vec::new();
    }
    let chunks = render::screen_chunks(area);
    let position = Position::new(mouse.column, mouse.row);

    if chunks.name_input.contains(position) {
        return vec![Command::SetFocus(Focus::NameInput)];
    }
    if chunks.url_input.contains(position) {
        return vec![Command::SetFocus(Focus::UrlInput)];
    }
    if chunks.button.contains(position) {
        return vec![Command::Submit];
    }
    if let Some(index) = render::row_at(
        chunks.list,
        state.thumb_rows,
        state.selected,
        state.rows.len(),
        mouse.column,
        mouse.row,
    ) {
        return vec![Command::RemoveAt(index)];
    }
    Vec::new()
}
