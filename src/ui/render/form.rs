use super::column_input::{column_input, Input, INPUT_HEIGHT};
use super::Frame;
use crate::monday::ColumnType;
use crate::state::{FormField, State, ITEM_NAME_KEY};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const TITLE: &str = "Create New Item";
pub const SUBMIT_LABEL: &str = "Create Item";
pub const SUBMITTING_LABEL: &str = "Processing...";
const ITEM_NAME_TITLE: &str = "Item Name";

/// Return the label of the submit button.
///
pub fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

/// Return the index of the first input to show so the focused one is
/// visible.
///
fn scroll_offset(focused: usize, visible: usize, total: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    focused
        .saturating_sub(visible - 1)
        .min(total - visible)
}

/// Render the item form.
///
pub fn form(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", TITLE),
            styling::active_block_title_style(),
        ))
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let error = state.get_status().error();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(if error.is_some() { 2 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(inner);

    let subtitle = Paragraph::new(Span::styled(
        format!("Add a new item to {} board", state.board_title()),
        styling::muted_text_style(theme),
    ));
    frame.render_widget(subtitle, rows[0]);

    if let Some(error) = error {
        let banner = Paragraph::new(Span::styled(
            format!("✖ {}", error),
            styling::error_text_style(theme),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(banner, rows[1]);
    }

    fields(frame, rows[2], state);
    submit_button(frame, rows[3], state);
}

fn fields(frame: &mut Frame, size: Rect, state: &State) {
    let focus = state.get_focus();
    let name_type = ColumnType::Name;
    let mut inputs = vec![Input {
        key: ITEM_NAME_KEY,
        title: ITEM_NAME_TITLE,
        column_type: &name_type,
        focused: focus == FormField::ItemName,
    }];
    inputs.extend(
        state
            .get_input_columns()
            .iter()
            .enumerate()
            .map(|(i, column)| Input {
                key: &column.id,
                title: &column.title,
                column_type: &column.column_type,
                focused: focus == FormField::Column(i),
            }),
    );

    let focused = match focus {
        FormField::ItemName => 0,
        FormField::Column(i) => i + 1,
        FormField::Submit => inputs.len() - 1,
    };
    let visible = (size.height / INPUT_HEIGHT) as usize;
    let offset = scroll_offset(focused, visible, inputs.len());

    for (slot, input) in inputs.iter().skip(offset).take(visible).enumerate() {
        let area = Rect {
            x: size.x,
            y: size.y + slot as u16 * INPUT_HEIGHT,
            width: size.width,
            height: INPUT_HEIGHT,
        };
        column_input(frame, area, state, input);
    }
}

fn submit_button(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let submitting = state.get_form().is_submitting();
    let focused = state.get_focus() == FormField::Submit;
    let style = if !state.can_submit() {
        styling::disabled_button_style(theme)
    } else if focused {
        styling::active_button_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    let border_style = if focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };

    let width = (SUBMIT_LABEL.len().max(SUBMITTING_LABEL.len()) as u16 + 6).min(size.width);
    let area = Rect {
        x: size.x + size.width.saturating_sub(width) / 2,
        y: size.y,
        width,
        height: size.height,
    };
    let button = Paragraph::new(Line::from(Span::styled(submit_label(submitting), style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(button, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_keeps_focus_visible() {
        assert_eq!(scroll_offset(0, 3, 6), 0);
        assert_eq!(scroll_offset(2, 3, 6), 0);
        assert_eq!(scroll_offset(4, 3, 6), 2);
        assert_eq!(scroll_offset(5, 3, 6), 3);
        assert_eq!(scroll_offset(5, 10, 6), 0);
        assert_eq!(scroll_offset(5, 0, 6), 0);
    }

    #[test]
    fn submit_labels() {
        assert_eq!(submit_label(false), "Create Item");
        assert_eq!(submit_label(true), "Processing...");
    }
}
