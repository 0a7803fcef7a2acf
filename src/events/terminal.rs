use crate::events::network::Event as NetworkEvent;
use crate::monday::ColumnType;
use crate::state::{FormField, State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => error!("Failed to read terminal event: {}", e),
                },
                Ok(false) => {}
                Err(e) => error!("Failed to poll terminal events: {}", e),
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, key)),
            Event::Tick => {
                state.tick();
                Ok(true)
            }
        }
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    match key {
        KeyEvent {
            code: KeyCode::Char('c') | KeyCode::Char('q'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        KeyEvent {
            code: KeyCode::Char('l'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            state.toggle_log();
        }
        KeyEvent {
            code: KeyCode::Esc, ..
        } => {
            state.dismiss_toast();
        }
        KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            if state.current_view() != View::ConfigurationRequired {
                state.reload();
            }
        }
        _ if state.current_view() != View::Form => {}
        KeyEvent {
            code: KeyCode::Tab | KeyCode::Down,
            ..
        } => {
            state.next_field();
        }
        KeyEvent {
            code: KeyCode::BackTab | KeyCode::Up,
            ..
        } => {
            state.previous_field();
        }
        KeyEvent {
            code: KeyCode::Left,
            ..
        } => {
            state.cycle_status_option(false);
        }
        KeyEvent {
            code: KeyCode::Right,
            ..
        } => {
            state.cycle_status_option(true);
        }
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } if is_status_focus(state) => {
            state.cycle_status_option(true);
        }
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => submit(state),
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => {
            state.delete_char();
        }
        KeyEvent {
            code: KeyCode::Char('t'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            state.fill_today();
        }
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => {
            state.input_char(c);
        }
        _ => {}
    }
    true
}

/// Start a submission and hand it to the network thread. The submit button
/// is inert while disabled; Enter inside a field always validates.
///
fn submit(state: &mut State) {
    if state.get_focus() == FormField::Submit && !state.can_submit() {
        return;
    }
    match state.begin_submit() {
        Ok(pending) => {
            info!("Submitting item '{}'...", pending.item_name);
            state.dispatch(NetworkEvent::CreateItem(pending));
        }
        Err(e) => debug!("Submission not started: {}", e),
    }
}

fn is_status_focus(state: &State) -> bool {
    state
        .focused_column()
        .map_or(false, |column| column.column_type == ColumnType::Status)
}
