use crate::state::NotificationKind;
use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the border style for blocks holding an invalid value.
///
pub fn error_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.error.to_color())
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

/// Return the style for placeholders and hints.
///
pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for field error messages.
///
pub fn error_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.error.to_color())
}

/// Return the style for the banner.
///
pub fn banner_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.banner.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for an enabled, focused button.
///
pub fn active_button_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for a disabled button.
///
pub fn disabled_button_style(theme: &Theme) -> Style {
    muted_text_style(theme).add_modifier(Modifier::DIM)
}

/// Return the accent style for a notification kind.
///
pub fn notification_style(theme: &Theme, kind: NotificationKind) -> Style {
    let color = match kind {
        NotificationKind::Success => theme.success,
        NotificationKind::Error => theme.error,
        NotificationKind::Info => theme.info,
    };
    Style::default().fg(color.to_color())
}
