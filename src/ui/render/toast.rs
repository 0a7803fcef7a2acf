use super::Frame;
use crate::state::{NotificationKind, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the toast, if one is visible, in the top right corner.
///
pub fn toast(frame: &mut Frame, size: Rect, state: &State) {
    let Some(toast) = state.get_status().toast() else {
        return;
    };
    let theme = state.get_theme();
    let style = styling::notification_style(theme, toast.kind);
    let icon = match toast.kind {
        NotificationKind::Success => "✔",
        NotificationKind::Error => "✖",
        NotificationKind::Info => "ℹ",
    };
    let text = format!("{} {}", icon, toast.message);

    let width = (text.chars().count() as u16 + 4).min(size.width);
    let height = 3.min(size.height);
    let area = Rect {
        x: size.right().saturating_sub(width),
        y: size.y,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Esc ", styling::muted_text_style(theme)))
        .border_style(style);
    let paragraph = Paragraph::new(Line::from(Span::styled(text, style))).block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
