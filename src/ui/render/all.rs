use super::footer::footer;
use super::form::form;
use super::log::log;
use super::message::{configuration_required, load_failed, loading};
use super::toast::toast;
use super::Frame;
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout};

/// Height of the log panel when it is visible.
///
const LOG_PANEL_HEIGHT: u16 = 10;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &State) {
    let mut constraints = vec![Constraint::Min(3)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_PANEL_HEIGHT));
    }
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    let main = chunks[0];
    match state.current_view() {
        View::ConfigurationRequired => configuration_required(frame, main, state),
        View::Loading => loading(frame, main, state),
        View::LoadFailed => load_failed(frame, main, state),
        View::Form => form(frame, main, state),
    }
    if state.is_log_visible() {
        log(frame, chunks[1], state);
    }
    footer(frame, chunks[chunks.len() - 1], state);
    toast(frame, main, state);
}
