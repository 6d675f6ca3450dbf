// TUI event loop and terminal management
use crate::app::{App, InputMode, Tab};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use folio_core::{ContactService, FormStatus, SubmissionHandle};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

pub async fn run_tui(mut app: App, service: ContactService, tick_rate: Duration) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &service, tick_rate).await;

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    service: &ContactService,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    // At most one submission is ever in flight
    let mut pending: Option<SubmissionHandle> = None;

    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        // Poll instead of blocking so a finished submission shows up without a keypress
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key, service, &mut pending);
                }
            }
        }

        if pending.as_ref().is_some_and(|h| h.is_finished()) {
            if let Some(handle) = pending.take() {
                let status = FormStatus::from_outcome(handle.outcome().await);
                app.set_form_status(status);
            }
        }

        if app.should_quit {
            if let Some(handle) = pending.take() {
                handle.cancel();
            }
            info!("Leaving TUI");
            break;
        }
    }

    Ok(())
}

fn handle_key(
    app: &mut App,
    key: KeyEvent,
    service: &ContactService,
    pending: &mut Option<SubmissionHandle>,
) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.input_mode {
        InputMode::Searching => match key.code {
            KeyCode::Char(c) => app.push_search_char(c),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Enter | KeyCode::Esc => app.enter_normal_mode(),
            KeyCode::Down => app.next_result(),
            KeyCode::Up => app.previous_result(),
            _ => {}
        },
        InputMode::EditingForm => match key.code {
            KeyCode::Esc => match pending {
                Some(handle) => handle.cancel(),
                None => app.enter_normal_mode(),
            },
            KeyCode::Enter => {
                if pending.is_none() {
                    start_submission(app, service, pending);
                }
            }
            KeyCode::Tab | KeyCode::Down => app.next_field(),
            KeyCode::BackTab | KeyCode::Up => app.previous_field(),
            KeyCode::Left => app.cycle_subject(false),
            KeyCode::Right => app.cycle_subject(true),
            KeyCode::Char(c) => app.push_form_char(c),
            KeyCode::Backspace => app.pop_form_char(),
            _ => {}
        },
        InputMode::Normal => {
            if app.show_help {
                // Any key closes help
                app.toggle_help();
                return;
            }

            match key.code {
                KeyCode::Char('q') => app.quit(),
                KeyCode::Char('?') => app.toggle_help(),
                KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => app.next_tab(),
                KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => app.previous_tab(),
                KeyCode::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    app.set_tab(Tab::ALL[index]);
                }
                code => handle_page_key(app, code, pending),
            }
        }
    }
}

fn handle_page_key(app: &mut App, code: KeyCode, pending: &mut Option<SubmissionHandle>) {
    match app.tab {
        Tab::Home => {}
        Tab::About => match code {
            KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
            KeyCode::Char('o') => app.toggle_timeline_order(),
            _ => {}
        },
        Tab::Projects => match code {
            KeyCode::Char('j') | KeyCode::Down => app.next_result(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_result(),
            KeyCode::Char('/') => app.enter_search_mode(),
            KeyCode::Char('c') => app.cycle_category(true),
            KeyCode::Char('C') => app.cycle_category(false),
            KeyCode::Char('r') => app.reset_filter(),
            _ => {}
        },
        Tab::Contact => match code {
            KeyCode::Enter | KeyCode::Char('i') => app.enter_form_mode(),
            KeyCode::Esc => {
                if let Some(handle) = pending {
                    handle.cancel();
                }
            }
            _ => {}
        },
    }
}

fn start_submission(app: &mut App, service: &ContactService, pending: &mut Option<SubmissionHandle>) {
    match service.submit(app.form.clone()) {
        Ok(handle) => {
            debug!("Contact submission started");
            app.set_form_status(FormStatus::Submitting);
            *pending = Some(handle);
        }
        // Validation failed before anything was spawned
        Err(e) => app.set_form_status(FormStatus::from_outcome(Err(e))),
    }
}
