use super::Frame;
use crate::state::{State, View};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for a view.
///
fn hints(view: View) -> &'static str {
    match view {
        View::ConfigurationRequired | View::Loading => "Ctrl-L: log  Ctrl-Q: quit",
        View::LoadFailed => "Ctrl-R: retry  Ctrl-L: log  Ctrl-Q: quit",
        View::Form => {
            "Tab/↑↓: fields  ←→: status  Ctrl-T: today  Enter: create  Ctrl-R: reload  Ctrl-L: log  Ctrl-Q: quit"
        }
    }
}

/// Render footer with key hints and submission progress.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let mut spans = vec![];
    if state.get_form().is_submitting() {
        spans.push(Span::styled(
            format!(
                " {} Creating item... ",
                spinner::frame(state.get_spinner_index())
            ),
            styling::banner_style(theme),
        ));
    }
    spans.push(Span::styled(
        format!(" {}", hints(state.current_view())),
        styling::muted_text_style(theme),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), size);
}
