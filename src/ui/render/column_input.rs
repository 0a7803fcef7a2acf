use super::Frame;
use crate::monday::ColumnType;
use crate::state::{rule_for, InputWidget, State, ITEM_NAME_KEY};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Height of one input including its error line.
///
pub const INPUT_HEIGHT: u16 = 4;

/// A form input to render.
///
pub struct Input<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub column_type: &'a ColumnType,
    pub focused: bool,
}

/// Return the placeholder shown in an empty input.
///
pub fn placeholder(title: &str, widget: InputWidget) -> String {
    match widget {
        InputWidget::Dropdown => format!("Select {}...", title.to_lowercase()),
        InputWidget::DatePicker => "YYYY-MM-DD".to_string(),
        InputWidget::TextField | InputWidget::NumberField => {
            format!("Enter {}...", title.to_lowercase())
        }
    }
}

/// Render a single input box with its error line below.
///
pub fn column_input(frame: &mut Frame, size: Rect, state: &State, input: &Input) {
    let theme = state.get_theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(size);

    let widget = rule_for(input.column_type).widget;
    let value = state.field_text(input.key);
    let error = state.field_error(input.key);

    let border_style = if error.is_some() {
        styling::error_block_border_style(theme)
    } else if input.focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let title = if input.key == ITEM_NAME_KEY {
        format!(" {} * ", input.title)
    } else {
        format!(" {} ", input.title)
    };
    let title_style = if input.focused {
        styling::active_block_title_style()
    } else {
        styling::normal_text_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, title_style))
        .border_style(border_style);

    let mut spans = vec![];
    if value.is_empty() {
        spans.push(Span::styled(
            placeholder(input.title, widget),
            styling::muted_text_style(theme),
        ));
    } else if widget == InputWidget::Dropdown {
        spans.push(Span::styled(
            format!("◀ {} ▶", value),
            styling::normal_text_style(theme),
        ));
    } else {
        spans.push(Span::styled(value, styling::normal_text_style(theme)));
    }
    if input.focused && widget != InputWidget::Dropdown {
        spans.push(Span::styled("▏", styling::active_block_border_style(theme)));
    }
    if input.focused && widget == InputWidget::DatePicker {
        spans.push(Span::styled(
            "  Ctrl-T: today",
            styling::muted_text_style(theme),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), rows[0]);

    if let Some(error) = error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", error),
                styling::error_text_style(theme),
            )),
            rows[1],
        );
    }
}
