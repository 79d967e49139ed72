// Terminal UI: setup/teardown, the event loop, and keyboard dispatch.
//
// The loop multiplexes three sources with tokio::select!: crossterm key
// events, a 200ms redraw tick that drives the spinner, and streaming
// fragments coming back from the chat worker task.

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod markdown;
pub mod ui;

use crate::chat::gemini::GeminiClient;
use crate::chat::{ChatEvent, QUICK_PROMPTS};
use crate::config::Config;
use crate::data::overview::CATEGORIES;
use crate::logging::LogBuffer;
use crate::theme::ThemeKind;
use anyhow::{Context, Result};
use app::{App, View};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn init_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Bring up the terminal, run the event loop until quit, restore the
/// terminal even when the loop errors.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let mut terminal = init_terminal()?;

    // The chat client only exists when a credential is configured; the
    // controller renders the config-error transcript otherwise.
    let client = config.api_key.as_ref().map(|key| {
        GeminiClient::new(key.clone(), config.api_base.clone(), config.model.clone())
    });

    let theme = ThemeKind::from_name(&config.theme);
    let mut app = App::new(theme, log_buffer, client.is_some());

    // Streaming events flow worker -> event loop over this channel
    let (chat_tx, mut chat_rx) = mpsc::channel::<ChatEvent>(64);

    let result = run_event_loop(&mut terminal, &mut app, client, chat_tx, &mut chat_rx).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn run_event_loop(
    terminal: &mut Term,
    app: &mut App,
    client: Option<GeminiClient>,
    chat_tx: mpsc::Sender<ChatEvent>,
    chat_rx: &mut mpsc::Receiver<ChatEvent>,
) -> Result<()> {
    let mut redraw = tokio::time::interval(Duration::from_millis(200));

    while !app.should_quit {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input, polled so the branch never blocks the others
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Spinner animation
            _ = redraw.tick() => {
                app.tick_animation();
            }

            Some(chat_event) = chat_rx.recv() => {
                app.apply_chat_event(chat_event);
            }
        }

        // An accepted send queues a dispatch; spawning here keeps the
        // input handlers synchronous
        if app.take_pending_dispatch().is_some() {
            if let Some(client) = &client {
                spawn_chat_worker(client.clone(), app.chat.history(), chat_tx.clone());
            }
        }
    }

    Ok(())
}

/// Issue the outbound request on a background task. The worker reports
/// back over the channel; if the receiver is gone it just exits.
fn spawn_chat_worker(
    client: GeminiClient,
    history: Vec<(bool, String)>,
    tx: mpsc::Sender<ChatEvent>,
) {
    tokio::spawn(async move {
        let outcome = match client.stream_reply(&history, &tx).await {
            Ok(()) => ChatEvent::Completed,
            Err(e) => ChatEvent::Failed(e.to_string()),
        };
        let _ = tx.send(outcome).await;
    });
}

/// Layered dispatch: chat typing, then global bindings, then the keys
/// of the active view.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Ctrl+C always quits, even mid-typing
    if key_event.kind == KeyEventKind::Press
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    if app.view == View::Chat && handle_chat_input(app, &key_event) {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    handle_view_keys(app, &key_event);
}

/// Chat input layer - returns true if the key was absorbed by the
/// input box. F-keys and navigation fall through to the other layers.
fn handle_chat_input(app: &mut App, key_event: &KeyEvent) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    match key_event.code {
        // Alt+1..3 fire the quick prompts
        KeyCode::Char(c) if key_event.modifiers.contains(KeyModifiers::ALT) => {
            let index = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1));
            if let Some((_, prompt)) = index.and_then(|i| QUICK_PROMPTS.get(i)) {
                app.chat_quick_prompt(prompt);
                return true;
            }
            false
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.chat_input_char(c);
            true
        }
        KeyCode::Backspace => {
            app.chat_input_backspace();
            true
        }
        KeyCode::Enter => {
            if app.handle_key_press(KeyCode::Enter) {
                app.chat_submit();
            }
            true
        }
        _ => false,
    }
}

/// Bindings that work the same in every view. Inside the chat view
/// letters are typed text, so only the non-printable ones reach here.
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }
    let key = key_event.code;

    let is_global = matches!(
        key,
        KeyCode::Char('q' | 'Q' | 't' | 'T' | 'r' | 'R')
            | KeyCode::F(1..=5)
            | KeyCode::PageUp
            | KeyCode::PageDown
    );
    if !is_global {
        return false;
    }

    // Debounced: a held key fires its action once
    if app.handle_key_press(key) {
        match key {
            KeyCode::Char('q' | 'Q') => app.should_quit = true,
            KeyCode::F(n) => app.set_view(View::all()[usize::from(n) - 1]),
            KeyCode::PageDown => app.next_view(),
            KeyCode::PageUp => app.prev_view(),
            KeyCode::Char('t' | 'T') => app.next_theme(),
            KeyCode::Char('r' | 'R') => app.refresh_data(),
            _ => {}
        }
    }
    true
}

/// Keys whose meaning depends on the active view: paging, tab cycling,
/// and page jumps.
fn handle_view_keys(app: &mut App, key_event: &KeyEvent) {
    match key_event.kind {
        KeyEventKind::Press => {
            let key = key_event.code;
            if !app.handle_key_press(key) {
                return;
            }
            match key {
                KeyCode::Left => app.page_prev(),
                KeyCode::Right => app.page_next(),
                KeyCode::Tab => match app.view {
                    View::Overview => app.toggle_ranked_tab(),
                    View::Channels => app.set_channel(app.active_channel.next()),
                    View::Categories => app.set_category(app.active_category + 1),
                    _ => {}
                },
                KeyCode::BackTab => match app.view {
                    View::Overview => app.toggle_ranked_tab(),
                    View::Channels => app.set_channel(app.active_channel.prev()),
                    View::Categories => {
                        app.set_category(app.active_category + CATEGORIES.len() - 1)
                    }
                    _ => {}
                },
                // Jump straight to a page of the current list
                KeyCode::Char(c @ '1'..='9') => {
                    app.page_set(c as usize - '0' as usize);
                }
                KeyCode::Esc => app.set_view(View::Overview),
                _ => {}
            }
        }
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
        }
        _ => {}
    }
}
