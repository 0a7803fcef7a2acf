use super::Frame;
use crate::state::{BoardLoad, State};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const LOADING_TEXT: &str = "Loading board information...";

/// Render the notice shown while required settings are missing.
///
pub fn configuration_required(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Configuration Required ",
            styling::active_block_title_style(),
        ))
        .border_style(styling::error_block_border_style(theme));

    let notice = state.get_config_notice().unwrap_or_default();
    let text = vec![
        Line::from(Span::styled(
            "monday.com is not configured",
            styling::banner_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            notice.to_owned(),
            styling::normal_text_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Restart the application once the settings are in place.",
            styling::muted_text_style(theme),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered_rows(size, 9));
}

/// Render the spinner shown while the board schema loads.
///
pub fn loading(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let line = Line::from(vec![
        Span::styled(
            spinner::frame(state.get_spinner_index()),
            styling::banner_style(theme),
        ),
        Span::raw(" "),
        Span::styled(LOADING_TEXT, styling::normal_text_style(theme)),
    ]);
    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, centered_rows(size, 1));
}

/// Render the reason the board could not be loaded.
///
pub fn load_failed(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let message = match state.get_board() {
        BoardLoad::Failed(message) => message.as_str(),
        _ => "",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Could not load board ",
            styling::active_block_title_style(),
        ))
        .border_style(styling::error_block_border_style(theme));
    let text = vec![
        Line::from(Span::styled(
            message.to_owned(),
            styling::error_text_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl-R to try again.",
            styling::muted_text_style(theme),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered_rows(size, 7));
}

/// Return a full-width band of the given height in the vertical middle.
///
fn centered_rows(size: Rect, height: u16) -> Rect {
    let height = height.min(size.height);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(size)[1]
}
