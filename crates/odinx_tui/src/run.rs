//! TUI run loop: terminal setup, key handling, draw.
//!
//! Key events are read in a dedicated thread so the main loop never blocks on
//! terminal input. Requests run on the caller's tokio runtime and report back
//! through a channel; the loop hands each result to [TuiState::finish].

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use odinx_core::Mode;
use odinx_runtime::{FormulationService, LabError, LabInput, LabResult, Ticket};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Handle;
use tokio::sync::mpsc as tokio_mpsc;

use crate::state::{Focus, Screen, TuiState};
use crate::view;

const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

type Finished = (Ticket<LabInput>, Result<LabResult, LabError>);

/// Run the interactive lab until the user quits.
///
/// `handle` runs the provider calls; the loop itself is blocking and should be
/// started with `spawn_blocking`. Lines from `log_rx` go to the log screen (Ctrl+D).
pub fn run_tui(
    service: FormulationService,
    log_rx: Option<tokio_mpsc::Receiver<String>>,
    handle: Handle,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = TuiState::new(format!("{} · {}", service.provider_id(), service.model()));
    state.push_trace_line(format!(
        "[log] lab started with {} ({}). Ctrl+D toggles this screen.",
        service.provider_id(),
        service.model()
    ));
    let result = run_loop(&mut terminal, &mut state, &service, log_rx, &handle);

    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    disable_raw_mode()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    service: &FormulationService,
    mut log_rx: Option<tokio_mpsc::Receiver<String>>,
    handle: &Handle,
) -> anyhow::Result<()> {
    let (key_tx, key_rx) = mpsc::channel();
    let _reader = std::thread::spawn(move || {
        loop {
            if event::poll(Duration::from_millis(50)).unwrap_or(false)
                && let Ok(ev) = event::read()
                && key_tx.send(ev).is_err()
            {
                break;
            }
        }
    });
    let (done_tx, mut done_rx) = tokio_mpsc::unbounded_channel::<Finished>();

    loop {
        if let Some(ref mut rx) = log_rx {
            while let Ok(line) = rx.try_recv() {
                for l in line.split('\n') {
                    state.push_trace_line(l.to_string());
                }
            }
        }
        while let Ok((ticket, result)) = done_rx.try_recv() {
            state.finish(ticket, result);
        }

        if !state.status_is_error
            && let Some(set_at) = state.status_set_at
            && set_at.elapsed() > STATUS_TIMEOUT
        {
            state.clear_status();
        }

        // Pending requests animate the header spinner.
        if state.needs_redraw || state.lab.is_pending() {
            state.frame_count = state.frame_count.wrapping_add(1);
            terminal.draw(|f| view::draw(f, state, f.area()))?;
            state.needs_redraw = false;
        }

        match key_rx.try_recv() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if handle_key(state, key, service, handle, &done_tx) == Flow::Quit {
                    break;
                }
            }
            Ok(Event::Resize(_, _)) => state.needs_redraw = true,
            Ok(_) => {}
            Err(_) => std::thread::sleep(Duration::from_millis(50)),
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(
    state: &mut TuiState,
    key: KeyEvent,
    service: &FormulationService,
    handle: &Handle,
    done_tx: &tokio_mpsc::UnboundedSender<Finished>,
) -> Flow {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return Flow::Quit,
        KeyCode::Char('d') if ctrl => {
            state.toggle_screen();
            return Flow::Continue;
        }
        _ => {}
    }

    if state.screen == Screen::DebugTraces {
        match key.code {
            KeyCode::Esc => state.toggle_screen(),
            KeyCode::Up => state.trace_scroll_up(1),
            KeyCode::Down => state.trace_scroll_down(1),
            KeyCode::PageUp => state.trace_scroll_up(10),
            KeyCode::PageDown => state.trace_scroll_down(10),
            KeyCode::Char('q') => return Flow::Quit,
            _ => {}
        }
        return Flow::Continue;
    }

    if state.grams_edit.is_some() {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => state.grams_edit_push(c),
            KeyCode::Backspace => state.grams_edit_backspace(),
            KeyCode::Enter => state.commit_grams_edit(),
            KeyCode::Esc => state.cancel_grams_edit(),
            _ => {}
        }
        return Flow::Continue;
    }

    let playground = state.mode() == Mode::Playground;
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Tab => state.toggle_mode(),
        KeyCode::Left if state.focus == Focus::Palette => state.move_cursor(-1),
        KeyCode::Right if state.focus == Focus::Palette => state.move_cursor(1),
        KeyCode::Up => state.move_up(),
        KeyCode::Down => state.move_down(),
        KeyCode::Enter | KeyCode::Char(' ') => match state.focus {
            Focus::Palette => state.activate_cursor(),
            Focus::Mix => state.begin_grams_edit(),
        },
        KeyCode::Char('s') => {
            if let Some(ticket) = state.submit() {
                spawn_request(handle, service, ticket, done_tx.clone());
            }
        }
        KeyCode::Char('x') => state.clear(),
        KeyCode::Esc => {
            state.lab.dismiss();
            state.needs_redraw = true;
        }
        KeyCode::Char('g') if !playground => state.cycle_gray(),
        KeyCode::Char('c') if !playground => state.cycle_condition(),
        KeyCode::Char('b') if playground => state.set_base_from_cursor(),
        KeyCode::Char('r') if playground => state.remove_base(),
        KeyCode::Char('m') if playground => state.toggle_focus(),
        KeyCode::Char('+') | KeyCode::Char('=') if playground => state.adjust_grams(1),
        KeyCode::Char('-') if playground => state.adjust_grams(-1),
        KeyCode::Char('e') if playground => state.begin_grams_edit(),
        KeyCode::Char('d') | KeyCode::Delete if playground => state.remove_selected_mix(),
        _ => {}
    }
    Flow::Continue
}

fn spawn_request(
    handle: &Handle,
    service: &FormulationService,
    ticket: Ticket<LabInput>,
    done_tx: tokio_mpsc::UnboundedSender<Finished>,
) {
    let service = service.clone();
    handle.spawn(async move {
        let result = service.run(ticket.input()).await;
        // The loop may already be gone if the user quit mid-request.
        let _ = done_tx.send((ticket, result));
    });
}
